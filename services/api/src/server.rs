use crate::cli::ServeArgs;
use crate::demo::build_demo_services;
use crate::infra::AppState;
use crate::routes::with_okr_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use okr_tracker::config::AppConfig;
use okr_tracker::error::AppError;
use okr_tracker::telemetry;
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

    // No durable storage yet; serve the sample organization so every
    // endpoint is exercisable out of the box.
    let (scoring, evaluations) = build_demo_services();

    let app = with_okr_routes(scoring, evaluations)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "okr tracker service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
