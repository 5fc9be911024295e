//! HTTP surface for report intake, scoring, and weight administration.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::indicators::WeightConfig;

use super::domain::{ReportId, ReportSubmission};
use super::repository::{ReportRepository, RepositoryError, SnapshotPublisher, WeightStore};
use super::service::{BranchReportService, ReportServiceError};

pub fn report_router<R, S, W>(service: Arc<BranchReportService<R, S, W>>) -> Router
where
    R: ReportRepository + 'static,
    S: SnapshotPublisher + 'static,
    W: WeightStore + 'static,
{
    Router::new()
        .route("/api/v1/reports", post(submit_report))
        .route("/api/v1/reports/:report_id", get(fetch_report))
        .route("/api/v1/reports/:report_id/scorecard", post(score_report))
        .route("/api/v1/weights", get(fetch_weights).put(replace_weights))
        .with_state(service)
}

async fn submit_report<R, S, W>(
    State(service): State<Arc<BranchReportService<R, S, W>>>,
    Json(submission): Json<ReportSubmission>,
) -> impl IntoResponse
where
    R: ReportRepository + 'static,
    S: SnapshotPublisher + 'static,
    W: WeightStore + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::ACCEPTED, Json(record.status_view())).into_response(),
        Err(ReportServiceError::Intake(violation)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": violation.to_string() })),
        )
            .into_response(),
        Err(ReportServiceError::Repository(RepositoryError::Conflict)) => (
            StatusCode::CONFLICT,
            Json(json!({ "error": "a report with this identifier already exists" })),
        )
            .into_response(),
        Err(other) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": other.to_string() })),
        )
            .into_response(),
    }
}

async fn fetch_report<R, S, W>(
    State(service): State<Arc<BranchReportService<R, S, W>>>,
    Path(report_id): Path<String>,
) -> impl IntoResponse
where
    R: ReportRepository + 'static,
    S: SnapshotPublisher + 'static,
    W: WeightStore + 'static,
{
    let id = ReportId(report_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, Json(record.status_view())).into_response(),
        Err(ReportServiceError::Repository(RepositoryError::NotFound)) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "report not found", "report_id": id.0 })),
        )
            .into_response(),
        Err(other) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": other.to_string() })),
        )
            .into_response(),
    }
}

async fn score_report<R, S, W>(
    State(service): State<Arc<BranchReportService<R, S, W>>>,
    Path(report_id): Path<String>,
) -> impl IntoResponse
where
    R: ReportRepository + 'static,
    S: SnapshotPublisher + 'static,
    W: WeightStore + 'static,
{
    let id = ReportId(report_id);
    let as_of = chrono::Local::now().date_naive();
    match service.score(&id, as_of) {
        Ok(scorecard) => (
            StatusCode::OK,
            Json(json!({
                "report_id": id.0,
                "as_of": as_of,
                "scorecard": scorecard.summary(),
            })),
        )
            .into_response(),
        Err(ReportServiceError::Repository(RepositoryError::NotFound)) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "report not found", "report_id": id.0 })),
        )
            .into_response(),
        Err(other) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": other.to_string() })),
        )
            .into_response(),
    }
}

async fn fetch_weights<R, S, W>(
    State(service): State<Arc<BranchReportService<R, S, W>>>,
) -> impl IntoResponse
where
    R: ReportRepository + 'static,
    S: SnapshotPublisher + 'static,
    W: WeightStore + 'static,
{
    match service.weight_table() {
        Ok(weights) => (StatusCode::OK, Json(weights)).into_response(),
        Err(error) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": error.to_string() })),
        )
            .into_response(),
    }
}

async fn replace_weights<R, S, W>(
    State(service): State<Arc<BranchReportService<R, S, W>>>,
    Json(weights): Json<WeightConfig>,
) -> impl IntoResponse
where
    R: ReportRepository + 'static,
    S: SnapshotPublisher + 'static,
    W: WeightStore + 'static,
{
    match service.replace_weight_table(weights) {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "updated" }))).into_response(),
        Err(error) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": error.to_string() })),
        )
            .into_response(),
    }
}
