use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use okr_tracker::okr::{
    okr_router, DepartmentRepository, EvaluationRepository, EvaluationService, EvaluatorDirectory,
    OkrScoringService, ScoreLevelStore,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_okr_routes<D, L, E, U>(
    scoring: Arc<OkrScoringService<D, L, E>>,
    evaluations: Arc<EvaluationService<E, U>>,
) -> axum::Router
where
    D: DepartmentRepository + 'static,
    L: ScoreLevelStore + 'static,
    E: EvaluationRepository + 'static,
    U: EvaluatorDirectory + 'static,
{
    okr_router(scoring, evaluations)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
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
