use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_analysis_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use waspas::analysis::{AnalysisService, InMemoryNormalizedStore};
use waspas::config::AppConfig;
use waspas::error::AppError;
use waspas::telemetry;

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

    let store = Arc::new(InMemoryNormalizedStore::with_capacity(
        config.analysis.cache_capacity,
    ));
    let analysis_service = Arc::new(AnalysisService::new(store, config.analysis));

    let app = with_analysis_routes(analysis_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        lambda = %config.analysis.default_lambda,
        divisions = config.analysis.sweep_divisions,
        "waspas decision engine ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
