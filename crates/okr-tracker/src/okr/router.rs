use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::DepartmentId;
use super::evaluations::domain::{
    EvaluationId, EvaluationRequest, EvaluationStatus, EvaluationTarget, EvaluatorId,
};
use super::evaluations::service::{EvaluationError, EvaluationService};
use super::export;
use super::repository::{
    DepartmentRepository, EvaluationRepository, EvaluatorDirectory, ScoreLevelStore,
};
use super::service::{OkrScoringService, ScoringError};

/// Router builder exposing the scoring and evaluation endpoints.
pub fn okr_router<D, L, E, U>(
    scoring: Arc<OkrScoringService<D, L, E>>,
    evaluations: Arc<EvaluationService<E, U>>,
) -> Router
where
    D: DepartmentRepository + 'static,
    L: ScoreLevelStore + 'static,
    E: EvaluationRepository + 'static,
    U: EvaluatorDirectory + 'static,
{
    let scoring_routes = Router::new()
        .route(
            "/api/v1/departments/:department_id/score",
            get(department_score_handler::<D, L, E>),
        )
        .route(
            "/api/v1/departments/:department_id/score/combined",
            get(combined_score_handler::<D, L, E>),
        )
        .route(
            "/api/v1/departments/:department_id/scorecard",
            get(scorecard_handler::<D, L, E>),
        )
        .route("/api/v1/scorecard.csv", get(export_handler::<D, L, E>))
        .with_state(scoring);

    let evaluation_routes = Router::new()
        .route("/api/v1/evaluations", post(create_evaluation_handler::<E, U>))
        .route("/api/v1/evaluations", get(list_evaluations_handler::<E, U>))
        .route(
            "/api/v1/evaluations/:evaluation_id/submit",
            post(submit_evaluation_handler::<E, U>),
        )
        .route(
            "/api/v1/evaluations/:evaluation_id",
            delete(delete_evaluation_handler::<E, U>),
        )
        .route(
            "/api/v1/evaluators/:evaluator_id/evaluations",
            get(evaluations_by_evaluator_handler::<E, U>),
        )
        .with_state(evaluations);

    scoring_routes.merge(evaluation_routes)
}

async fn department_score_handler<D, L, E>(
    State(scoring): State<Arc<OkrScoringService<D, L, E>>>,
    Path(department_id): Path<String>,
) -> Response
where
    D: DepartmentRepository + 'static,
    L: ScoreLevelStore + 'static,
    E: EvaluationRepository + 'static,
{
    match scoring.department_score(&DepartmentId(department_id)) {
        Ok(score) => (StatusCode::OK, axum::Json(score)).into_response(),
        Err(error) => scoring_error_response(error),
    }
}

async fn combined_score_handler<D, L, E>(
    State(scoring): State<Arc<OkrScoringService<D, L, E>>>,
    Path(department_id): Path<String>,
) -> Response
where
    D: DepartmentRepository + 'static,
    L: ScoreLevelStore + 'static,
    E: EvaluationRepository + 'static,
{
    match scoring.department_score_with_evaluations(&DepartmentId(department_id)) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => scoring_error_response(error),
    }
}

async fn scorecard_handler<D, L, E>(
    State(scoring): State<Arc<OkrScoringService<D, L, E>>>,
    Path(department_id): Path<String>,
) -> Response
where
    D: DepartmentRepository + 'static,
    L: ScoreLevelStore + 'static,
    E: EvaluationRepository + 'static,
{
    match scoring.department_scorecard(&DepartmentId(department_id)) {
        Ok(scorecard) => (StatusCode::OK, axum::Json(scorecard)).into_response(),
        Err(error) => scoring_error_response(error),
    }
}

async fn export_handler<D, L, E>(
    State(scoring): State<Arc<OkrScoringService<D, L, E>>>,
) -> Response
where
    D: DepartmentRepository + 'static,
    L: ScoreLevelStore + 'static,
    E: EvaluationRepository + 'static,
{
    let scorecards = match scoring.scorecards() {
        Ok(scorecards) => scorecards,
        Err(error) => return scoring_error_response(error),
    };

    match export::scorecards_to_string(&scorecards) {
        Ok(csv) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv")],
            csv,
        )
            .into_response(),
        Err(error) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({ "error": error.to_string() })),
        )
            .into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct CreateEvaluationBody {
    evaluator_id: String,
    #[serde(flatten)]
    request: EvaluationRequest,
}

async fn create_evaluation_handler<E, U>(
    State(evaluations): State<Arc<EvaluationService<E, U>>>,
    axum::Json(body): axum::Json<CreateEvaluationBody>,
) -> Response
where
    E: EvaluationRepository + 'static,
    U: EvaluatorDirectory + 'static,
{
    match evaluations.create(body.request, &EvaluatorId(body.evaluator_id)) {
        Ok(evaluation) => (StatusCode::CREATED, axum::Json(evaluation)).into_response(),
        Err(error) => evaluation_error_response(error),
    }
}

#[derive(Debug, Deserialize)]
struct CallerQuery {
    evaluator_id: String,
}

async fn submit_evaluation_handler<E, U>(
    State(evaluations): State<Arc<EvaluationService<E, U>>>,
    Path(evaluation_id): Path<String>,
    Query(caller): Query<CallerQuery>,
) -> Response
where
    E: EvaluationRepository + 'static,
    U: EvaluatorDirectory + 'static,
{
    match evaluations.submit(
        &EvaluationId(evaluation_id),
        &EvaluatorId(caller.evaluator_id),
    ) {
        Ok(evaluation) => (StatusCode::OK, axum::Json(evaluation)).into_response(),
        Err(error) => evaluation_error_response(error),
    }
}

async fn delete_evaluation_handler<E, U>(
    State(evaluations): State<Arc<EvaluationService<E, U>>>,
    Path(evaluation_id): Path<String>,
    Query(caller): Query<CallerQuery>,
) -> Response
where
    E: EvaluationRepository + 'static,
    U: EvaluatorDirectory + 'static,
{
    match evaluations.delete(
        &EvaluationId(evaluation_id),
        &EvaluatorId(caller.evaluator_id),
    ) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => evaluation_error_response(error),
    }
}

#[derive(Debug, Deserialize)]
struct EvaluationListQuery {
    target: EvaluationTarget,
    target_id: String,
    #[serde(default)]
    status: Option<EvaluationStatus>,
}

async fn list_evaluations_handler<E, U>(
    State(evaluations): State<Arc<EvaluationService<E, U>>>,
    Query(query): Query<EvaluationListQuery>,
) -> Response
where
    E: EvaluationRepository + 'static,
    U: EvaluatorDirectory + 'static,
{
    match evaluations.for_target(query.target, &query.target_id, query.status) {
        Ok(list) => (StatusCode::OK, axum::Json(list)).into_response(),
        Err(error) => evaluation_error_response(error),
    }
}

async fn evaluations_by_evaluator_handler<E, U>(
    State(evaluations): State<Arc<EvaluationService<E, U>>>,
    Path(evaluator_id): Path<String>,
) -> Response
where
    E: EvaluationRepository + 'static,
    U: EvaluatorDirectory + 'static,
{
    match evaluations.by_evaluator(&EvaluatorId(evaluator_id)) {
        Ok(list) => (StatusCode::OK, axum::Json(list)).into_response(),
        Err(error) => evaluation_error_response(error),
    }
}

fn scoring_error_response(error: ScoringError) -> Response {
    let status = match error {
        ScoringError::DepartmentNotFound => StatusCode::NOT_FOUND,
        ScoringError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, axum::Json(json!({ "error": error.to_string() }))).into_response()
}

fn evaluation_error_response(error: EvaluationError) -> Response {
    let status = match error {
        EvaluationError::EvaluatorNotFound | EvaluationError::EvaluationNotFound => {
            StatusCode::NOT_FOUND
        }
        EvaluationError::PermissionDenied(_) => StatusCode::FORBIDDEN,
        EvaluationError::Conflict => StatusCode::CONFLICT,
        EvaluationError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EvaluationError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, axum::Json(json!({ "error": error.to_string() }))).into_response()
}
