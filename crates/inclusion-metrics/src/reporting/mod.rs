//! Branch report intake, scoring, and weight administration.
//!
//! Submissions pass a structural intake guard, are stored through the
//! repository port, and are scored on demand by the metric catalogue with
//! whatever weight table the admin store currently holds. Each scoring run
//! pushes one snapshot to the display sink.

pub mod domain;
pub(crate) mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    BranchId, DataQualityFlag, ProjectId, ReportId, ReportStatus, ReportSubmission,
    ReportingPeriod, ValidatedReport,
};
pub use intake::{IntakeViolation, ReportIntakeGuard};
pub use repository::{
    BranchReportRecord, ReportRepository, ReportStatusView, RepositoryError, ScorecardSnapshot,
    SnapshotError, SnapshotPublisher, WeightStore, WeightStoreError,
};
pub use router::report_router;
pub use service::{BranchReportService, ReportServiceError};
