//! Metric aggregation engine.
//!
//! Pure functions from raw branch counters and an admin weight table to a
//! KRI/KPI scorecard. Nothing in this module performs IO or fails: division
//! by zero collapses to zero, missing weights fall back to documented
//! defaults, and every output is rounded to two decimals.

mod catalogue;
mod fields;
mod math;
mod scorecard;
mod weights;

pub use catalogue::{
    Denominator, MetricCatalogue, PerformanceFormula, RatioSpec, RiskFormula, WeightedTerm,
};
pub use fields::{BranchReportMetrics, ReportField};
pub use math::{round2, safe_divide};
pub use scorecard::{
    IndicatorScorecard, PerformanceIndicator, PerformanceScore, PerformanceScoreView,
    RiskIndicator, RiskScore, RiskScoreView, ScorecardSummary,
};
pub use weights::{WeightCategory, WeightConfig, DEFAULT_RISK_TERM_WEIGHT};
