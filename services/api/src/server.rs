use crate::cli::ServeArgs;
use crate::infra::{
    default_weight_config, AppState, InMemoryReportRepository, InMemorySnapshotPublisher,
    InMemoryWeightStore,
};
use crate::routes::with_report_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use inclusion_metrics::config::AppConfig;
use inclusion_metrics::error::AppError;
use inclusion_metrics::reporting::BranchReportService;
use inclusion_metrics::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryReportRepository::default());
    let snapshots = Arc::new(InMemorySnapshotPublisher::default());
    let weights = Arc::new(InMemoryWeightStore::new(default_weight_config()));
    let report_service = Arc::new(BranchReportService::new(repository, snapshots, weights));

    let app = with_report_routes(report_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "branch reporting service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
