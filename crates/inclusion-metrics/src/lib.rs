//! Branch reporting and KRI/KPI scorecards for financial-inclusion programs.
//!
//! Field officers submit monthly branch reports, administrators maintain a
//! weight table, and the metric aggregation engine turns the two into
//! risk and performance scorecards. The [`reporting`] module exposes the
//! workflow and its HTTP router; [`indicators`] holds the pure engine;
//! [`ingest`] reads the spreadsheet template; [`dashboard`] aggregates a
//! period across branches.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod indicators;
pub mod ingest;
pub mod reporting;
pub mod telemetry;
