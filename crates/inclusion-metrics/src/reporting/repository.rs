//! Storage and publication ports plus the record and view types they carry.
//!
//! The service is generic over these traits so deployments can plug in
//! whatever backs them: the bundled in-memory stores, a database, or the
//! national reporting gateway.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::indicators::{IndicatorScorecard, ScorecardSummary, WeightConfig};

use super::domain::{
    BranchId, ProjectId, ReportId, ReportStatus, ReportingPeriod, ValidatedReport,
};

/// Stored report: the validated submission plus scoring state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchReportRecord {
    pub report: ValidatedReport,
    pub status: ReportStatus,
    pub scorecard: Option<IndicatorScorecard>,
}

impl BranchReportRecord {
    pub fn scoring_note(&self) -> String {
        match &self.scorecard {
            Some(scorecard) => format!(
                "{} risk and {} performance indicators computed",
                scorecard.risks.len(),
                scorecard.performance.len()
            ),
            None => "pending scoring".to_string(),
        }
    }

    /// Sanitized view exposed to officers and dashboards.
    pub fn status_view(&self) -> ReportStatusView {
        ReportStatusView {
            report_id: self.report.report_id.clone(),
            branch_id: self.report.branch_id.clone(),
            project_id: self.report.project_id.clone(),
            period: self.report.period.label(),
            status: self.status.label(),
            scoring_note: self.scoring_note(),
            data_quality: self
                .report
                .flags
                .iter()
                .map(|flag| flag.detail())
                .collect(),
            scorecard: self.scorecard.as_ref().map(IndicatorScorecard::summary),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportStatusView {
    pub report_id: ReportId,
    pub branch_id: BranchId,
    pub project_id: ProjectId,
    pub period: String,
    pub status: &'static str,
    pub scoring_note: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data_quality: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scorecard: Option<ScorecardSummary>,
}

pub trait ReportRepository: Send + Sync {
    fn insert(&self, record: BranchReportRecord) -> Result<BranchReportRecord, RepositoryError>;
    fn update(&self, record: BranchReportRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ReportId) -> Result<Option<BranchReportRecord>, RepositoryError>;
    fn for_period(
        &self,
        period: ReportingPeriod,
    ) -> Result<Vec<BranchReportRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("a report with this identifier already exists")]
    Conflict,
    #[error("report not found")]
    NotFound,
    #[error("report store unavailable: {0}")]
    Unavailable(String),
}

/// Snapshot of one scoring run, pushed to display caches.
///
/// Snapshots are write-only from the service's point of view: dashboards may
/// serve them, but scoring never reads them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorecardSnapshot {
    pub report_id: ReportId,
    pub branch_id: BranchId,
    pub project_id: ProjectId,
    pub period: ReportingPeriod,
    pub as_of: NaiveDate,
    pub scorecard: IndicatorScorecard,
}

pub trait SnapshotPublisher: Send + Sync {
    fn publish(&self, snapshot: ScorecardSnapshot) -> Result<(), SnapshotError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot sink unavailable: {0}")]
    Sink(String),
}

/// Port for the admin-managed weight table.
pub trait WeightStore: Send + Sync {
    fn load(&self) -> Result<WeightConfig, WeightStoreError>;
    fn replace(&self, weights: WeightConfig) -> Result<(), WeightStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum WeightStoreError {
    #[error("weight store unavailable: {0}")]
    Unavailable(String),
}
