//! Service facade composing intake, storage, weights, and the pure engine.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::indicators::{IndicatorScorecard, MetricCatalogue, WeightConfig};

use super::domain::{ReportId, ReportStatus, ReportSubmission, ReportingPeriod};
use super::intake::{IntakeViolation, ReportIntakeGuard};
use super::repository::{
    BranchReportRecord, ReportRepository, RepositoryError, ScorecardSnapshot, SnapshotError,
    SnapshotPublisher, WeightStore, WeightStoreError,
};

static REPORT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_report_id() -> ReportId {
    let id = REPORT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ReportId(format!("rpt-{id:06}"))
}

#[derive(Debug, thiserror::Error)]
pub enum ReportServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Weights(#[from] WeightStoreError),
}

/// Orchestrates the branch reporting workflow.
///
/// The service owns no business math: scoring is delegated to the
/// [`MetricCatalogue`], with weights loaded fresh from the store on every
/// scoring call so admin changes apply to the next computation.
pub struct BranchReportService<R, S, W> {
    guard: ReportIntakeGuard,
    repository: Arc<R>,
    snapshots: Arc<S>,
    weights: Arc<W>,
    catalogue: MetricCatalogue,
}

impl<R, S, W> BranchReportService<R, S, W>
where
    R: ReportRepository + 'static,
    S: SnapshotPublisher + 'static,
    W: WeightStore + 'static,
{
    pub fn new(repository: Arc<R>, snapshots: Arc<S>, weights: Arc<W>) -> Self {
        Self {
            guard: ReportIntakeGuard,
            repository,
            snapshots,
            weights,
            catalogue: MetricCatalogue::standard(),
        }
    }

    pub fn catalogue(&self) -> &MetricCatalogue {
        &self.catalogue
    }

    /// Validates and stores a submission. Data-quality flags attach to the
    /// stored record; only structural problems reject it.
    pub fn submit(
        &self,
        submission: ReportSubmission,
    ) -> Result<BranchReportRecord, ReportServiceError> {
        let mut report = self.guard.validate(submission)?;
        report.report_id = next_report_id();
        let record = BranchReportRecord {
            report,
            status: ReportStatus::Submitted,
            scorecard: None,
        };
        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Scores a stored report with the current weight table.
    ///
    /// The computed scorecard is cached on the record and one snapshot is
    /// pushed to the display sink; neither is ever read back by scoring.
    pub fn score(
        &self,
        report_id: &ReportId,
        as_of: NaiveDate,
    ) -> Result<IndicatorScorecard, ReportServiceError> {
        let mut record = self
            .repository
            .fetch(report_id)?
            .ok_or(RepositoryError::NotFound)?;
        let weights = self.weights.load()?;
        let scorecard = self.catalogue.scorecard(&record.report.metrics, &weights);

        record.status = ReportStatus::Scored;
        record.scorecard = Some(scorecard.clone());
        self.repository.update(record.clone())?;

        self.snapshots.publish(ScorecardSnapshot {
            report_id: record.report.report_id.clone(),
            branch_id: record.report.branch_id.clone(),
            project_id: record.report.project_id.clone(),
            period: record.report.period,
            as_of,
            scorecard: scorecard.clone(),
        })?;

        Ok(scorecard)
    }

    pub fn get(&self, report_id: &ReportId) -> Result<BranchReportRecord, ReportServiceError> {
        let record = self
            .repository
            .fetch(report_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn reports_for_period(
        &self,
        period: ReportingPeriod,
    ) -> Result<Vec<BranchReportRecord>, ReportServiceError> {
        Ok(self.repository.for_period(period)?)
    }

    pub fn weight_table(&self) -> Result<WeightConfig, ReportServiceError> {
        Ok(self.weights.load()?)
    }

    pub fn replace_weight_table(&self, weights: WeightConfig) -> Result<(), ReportServiceError> {
        Ok(self.weights.replace(weights)?)
    }
}
