use inclusion_metrics::indicators::{
    RiskIndicator, WeightCategory, WeightConfig, DEFAULT_RISK_TERM_WEIGHT,
};
use inclusion_metrics::reporting::{
    BranchReportRecord, ReportId, ReportRepository, ReportingPeriod, RepositoryError,
    ScorecardSnapshot, SnapshotError, SnapshotPublisher, WeightStore, WeightStoreError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryReportRepository {
    records: Arc<Mutex<HashMap<ReportId, BranchReportRecord>>>,
}

impl ReportRepository for InMemoryReportRepository {
    fn insert(&self, record: BranchReportRecord) -> Result<BranchReportRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.report.report_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.report.report_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: BranchReportRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.report.report_id) {
            guard.insert(record.report.report_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ReportId) -> Result<Option<BranchReportRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn for_period(
        &self,
        period: ReportingPeriod,
    ) -> Result<Vec<BranchReportRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<BranchReportRecord> = guard
            .values()
            .filter(|record| record.report.period == period)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.report.report_id.0.cmp(&b.report.report_id.0));
        Ok(records)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySnapshotPublisher {
    events: Arc<Mutex<Vec<ScorecardSnapshot>>>,
}

impl SnapshotPublisher for InMemorySnapshotPublisher {
    fn publish(&self, snapshot: ScorecardSnapshot) -> Result<(), SnapshotError> {
        let mut guard = self.events.lock().expect("snapshot mutex poisoned");
        guard.push(snapshot);
        Ok(())
    }
}

impl InMemorySnapshotPublisher {
    pub(crate) fn events(&self) -> Vec<ScorecardSnapshot> {
        self.events.lock().expect("snapshot mutex poisoned").clone()
    }
}

#[derive(Clone)]
pub(crate) struct InMemoryWeightStore {
    table: Arc<Mutex<WeightConfig>>,
}

impl InMemoryWeightStore {
    pub(crate) fn new(table: WeightConfig) -> Self {
        InMemoryWeightStore {
            table: Arc::new(Mutex::new(table)),
        }
    }
}

impl WeightStore for InMemoryWeightStore {
    fn load(&self) -> Result<WeightConfig, WeightStoreError> {
        let guard = self.table.lock().expect("weight mutex poisoned");
        Ok(guard.clone())
    }

    fn replace(&self, weights: WeightConfig) -> Result<(), WeightStoreError> {
        let mut guard = self.table.lock().expect("weight mutex poisoned");
        *guard = weights;
        Ok(())
    }
}

pub(crate) fn uniform_weight_config(value: f64) -> WeightConfig {
    let mut table = WeightConfig::empty();
    for indicator in RiskIndicator::ordered() {
        table.set(WeightCategory::Kri, indicator.key(), value);
    }
    table
}

pub(crate) fn default_weight_config() -> WeightConfig {
    uniform_weight_config(DEFAULT_RISK_TERM_WEIGHT)
}

pub(crate) fn parse_period(raw: &str) -> Result<ReportingPeriod, String> {
    ReportingPeriod::parse(raw).ok_or_else(|| format!("failed to parse '{raw}' as YYYY-MM"))
}

pub(crate) fn deserialize_period<'de, D>(deserializer: D) -> Result<ReportingPeriod, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_period(&raw).map_err(serde::de::Error::custom)
}
