use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::indicators::{BranchReportMetrics, RiskIndicator, WeightCategory, WeightConfig};
use crate::reporting::domain::{
    BranchId, ProjectId, ReportId, ReportSubmission, ReportingPeriod,
};
use crate::reporting::repository::{
    BranchReportRecord, ReportRepository, RepositoryError, ScorecardSnapshot, SnapshotError,
    SnapshotPublisher, WeightStore, WeightStoreError,
};
use crate::reporting::service::BranchReportService;

pub(super) fn healthy_metrics() -> BranchReportMetrics {
    BranchReportMetrics {
        members_at_start: 100.0,
        members_at_end: 100.0,
        members_dropped_out: 0.0,
        members_bank_account: 50.0,
        members_applying_accounts: 40.0,
        members_complaining_slow_account: 0.0,
        members_applying_loans: 30.0,
        members_received_loans: 25.0,
        members_complaining_delay: 0.0,
        loans_defaulted: 0.0,
        fraud_cases: 0.0,
        num_mfis: 3.0,
        barrier_reports: 0.0,
        gender_barrier_reports: 0.0,
    }
}

pub(super) fn submission() -> ReportSubmission {
    ReportSubmission {
        branch_id: BranchId("KMB-01".to_string()),
        project_id: ProjectId("FIP-2026".to_string()),
        period: ReportingPeriod::new(2026, 3),
        metrics: healthy_metrics(),
        notes: None,
    }
}

pub(super) fn uniform_weights(value: f64) -> WeightConfig {
    let mut config = WeightConfig::empty();
    for indicator in RiskIndicator::ordered() {
        config.set(WeightCategory::Kri, indicator.key(), value);
    }
    config
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<ReportId, BranchReportRecord>>>,
}

impl ReportRepository for MemoryRepository {
    fn insert(&self, record: BranchReportRecord) -> Result<BranchReportRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("records mutex");
        if guard.contains_key(&record.report.report_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.report.report_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: BranchReportRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("records mutex");
        guard.insert(record.report.report_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ReportId) -> Result<Option<BranchReportRecord>, RepositoryError> {
        let guard = self.records.lock().expect("records mutex");
        Ok(guard.get(id).cloned())
    }

    fn for_period(
        &self,
        period: ReportingPeriod,
    ) -> Result<Vec<BranchReportRecord>, RepositoryError> {
        let guard = self.records.lock().expect("records mutex");
        let mut matching: Vec<BranchReportRecord> = guard
            .values()
            .filter(|record| record.report.period == period)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.report.report_id.0.cmp(&b.report.report_id.0));
        Ok(matching)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemorySnapshots {
    events: Arc<Mutex<Vec<ScorecardSnapshot>>>,
}

impl MemorySnapshots {
    pub(super) fn events(&self) -> Vec<ScorecardSnapshot> {
        self.events.lock().expect("snapshot mutex").clone()
    }
}

impl SnapshotPublisher for MemorySnapshots {
    fn publish(&self, snapshot: ScorecardSnapshot) -> Result<(), SnapshotError> {
        self.events.lock().expect("snapshot mutex").push(snapshot);
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct MemoryWeights {
    table: Mutex<WeightConfig>,
}

impl MemoryWeights {
    pub(super) fn with_table(config: WeightConfig) -> Self {
        Self {
            table: Mutex::new(config),
        }
    }
}

impl WeightStore for MemoryWeights {
    fn load(&self) -> Result<WeightConfig, WeightStoreError> {
        Ok(self.table.lock().expect("weight mutex").clone())
    }

    fn replace(&self, weights: WeightConfig) -> Result<(), WeightStoreError> {
        *self.table.lock().expect("weight mutex") = weights;
        Ok(())
    }
}

pub(super) fn build_service() -> (
    BranchReportService<MemoryRepository, MemorySnapshots, MemoryWeights>,
    Arc<MemoryRepository>,
    Arc<MemorySnapshots>,
    Arc<MemoryWeights>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let snapshots = Arc::new(MemorySnapshots::default());
    let weights = Arc::new(MemoryWeights::with_table(uniform_weights(0.14)));
    let service =
        BranchReportService::new(repository.clone(), snapshots.clone(), weights.clone());
    (service, repository, snapshots, weights)
}
