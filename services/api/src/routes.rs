use crate::infra::{deserialize_period, AppState};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use inclusion_metrics::dashboard::{
    BranchScorecardView, DashboardSummary, PortfolioDashboard, PortfolioInsights,
};
use inclusion_metrics::error::AppError;
use inclusion_metrics::ingest::FieldReportCsvImporter;
use inclusion_metrics::reporting::{
    report_router, BranchReportRecord, BranchReportService, ReportIntakeGuard, ReportRepository,
    ReportServiceError, ReportStatus, ReportSubmission, ReportingPeriod, SnapshotPublisher,
    WeightStore,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct DashboardRequest {
    #[serde(deserialize_with = "deserialize_period")]
    pub(crate) period: ReportingPeriod,
    #[serde(default)]
    pub(crate) csv: Option<String>,
    #[serde(default)]
    pub(crate) include_branches: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct DashboardResponse {
    pub(crate) period: String,
    pub(crate) data_source: DashboardDataSource,
    pub(crate) summary: DashboardSummary,
    pub(crate) insights: PortfolioInsights,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) branches: Option<Vec<BranchScorecardView>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum DashboardDataSource {
    Upload,
    Repository,
}

pub(crate) fn with_report_routes<R, S, W>(
    service: Arc<BranchReportService<R, S, W>>,
) -> axum::Router
where
    R: ReportRepository + 'static,
    S: SnapshotPublisher + 'static,
    W: WeightStore + 'static,
{
    report_router(service.clone())
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .merge(
            axum::Router::new()
                .route("/api/v1/dashboard", axum::routing::post(dashboard_endpoint))
                .with_state(service),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn dashboard_endpoint<R, S, W>(
    State(service): State<Arc<BranchReportService<R, S, W>>>,
    Json(payload): Json<DashboardRequest>,
) -> Result<Json<DashboardResponse>, AppError>
where
    R: ReportRepository + 'static,
    S: SnapshotPublisher + 'static,
    W: WeightStore + 'static,
{
    let DashboardRequest {
        period,
        csv,
        include_branches,
    } = payload;

    let (records, data_source) = match csv {
        Some(csv) => {
            let reader = Cursor::new(csv.into_bytes());
            let submissions = FieldReportCsvImporter::from_reader(reader)?;
            let records = validate_upload(submissions, period)?;
            (records, DashboardDataSource::Upload)
        }
        None => {
            let records = service.reports_for_period(period)?;
            (records, DashboardDataSource::Repository)
        }
    };

    let weights = service.weight_table()?;
    let dashboard =
        PortfolioDashboard::from_records(period, &records, service.catalogue(), &weights);
    let summary = dashboard.summary();
    let insights = dashboard.insights();
    let branches = include_branches.then(|| dashboard.branch_details());

    Ok(Json(DashboardResponse {
        period: period.label(),
        data_source,
        summary,
        insights,
        branches,
    }))
}

/// Uploaded rows pass the same intake checks as API submissions but are
/// never persisted; the dashboard scores them in place.
fn validate_upload(
    submissions: Vec<ReportSubmission>,
    period: ReportingPeriod,
) -> Result<Vec<BranchReportRecord>, AppError> {
    let guard = ReportIntakeGuard::default();
    let mut records = Vec::with_capacity(submissions.len());
    for submission in submissions {
        let report = guard
            .validate(submission)
            .map_err(ReportServiceError::from)?;
        if report.period != period {
            continue;
        }
        records.push(BranchReportRecord {
            report,
            status: ReportStatus::Submitted,
            scorecard: None,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{
        default_weight_config, InMemoryReportRepository, InMemorySnapshotPublisher,
        InMemoryWeightStore,
    };
    use inclusion_metrics::indicators::{BranchReportMetrics, PerformanceIndicator};
    use inclusion_metrics::reporting::{BranchId, ProjectId};

    const UPLOAD: &str = "Branch,Project,Period,Members at Start,Members at End,Dropped Out,With Bank Account,Applying for Accounts,Slow Account Complaints,Applying for Loans,Received Loans,Delay Complaints,Loans Defaulted,Fraud Cases,Partner MFIs,Barrier Reports,Gender Barrier Reports,Notes\nKMB-01,FIP-2026,2026-03,100,100,0,50,40,0,30,25,0,0,0,3,0,0,\nKMB-02,FIP-2026,2026-04,80,80,0,40,20,0,10,8,0,0,0,2,0,0,\n";

    fn build_service() -> Arc<
        BranchReportService<InMemoryReportRepository, InMemorySnapshotPublisher, InMemoryWeightStore>,
    > {
        Arc::new(BranchReportService::new(
            Arc::new(InMemoryReportRepository::default()),
            Arc::new(InMemorySnapshotPublisher::default()),
            Arc::new(InMemoryWeightStore::new(default_weight_config())),
        ))
    }

    fn sample_metrics() -> BranchReportMetrics {
        BranchReportMetrics {
            members_at_start: 100.0,
            members_at_end: 100.0,
            members_bank_account: 50.0,
            members_applying_accounts: 40.0,
            members_applying_loans: 30.0,
            members_received_loans: 25.0,
            num_mfis: 3.0,
            ..BranchReportMetrics::default()
        }
    }

    #[tokio::test]
    async fn dashboard_endpoint_scores_uploaded_rows_for_the_requested_period() {
        let service = build_service();
        let request = DashboardRequest {
            period: ReportingPeriod::new(2026, 3),
            csv: Some(UPLOAD.to_string()),
            include_branches: true,
        };

        let Json(body) = dashboard_endpoint(State(service), Json(request))
            .await
            .expect("dashboard builds");

        assert_eq!(body.data_source, DashboardDataSource::Upload);
        assert_eq!(body.period, "2026-03");
        // The 2026-04 row is outside the requested period.
        assert_eq!(body.summary.branches, 1);
        let branches = body.branches.expect("branch details returned");
        assert_eq!(branches.len(), 1);
        assert_eq!(branches[0].branch_id, "KMB-01");
    }

    #[tokio::test]
    async fn dashboard_endpoint_reads_stored_reports() {
        let service = build_service();
        service
            .submit(ReportSubmission {
                branch_id: BranchId("KMB-07".to_string()),
                project_id: ProjectId("FIP-2026".to_string()),
                period: ReportingPeriod::new(2026, 3),
                metrics: sample_metrics(),
                notes: None,
            })
            .expect("submission accepted");

        let request = DashboardRequest {
            period: ReportingPeriod::new(2026, 3),
            csv: None,
            include_branches: false,
        };

        let Json(body) = dashboard_endpoint(State(service), Json(request))
            .await
            .expect("dashboard builds");

        assert_eq!(body.data_source, DashboardDataSource::Repository);
        assert_eq!(body.summary.branches, 1);
        assert!(body.branches.is_none());

        let uptake = body
            .summary
            .performance_overview
            .iter()
            .find(|entry| entry.indicator == PerformanceIndicator::AccountUptakeRate)
            .expect("uptake entry present");
        assert_eq!(uptake.average, 0.14);
    }
}
