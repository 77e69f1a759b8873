use crate::config::ConfigError;
use crate::okr::evaluations::service::EvaluationError;
use crate::okr::service::ScoringError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Umbrella error for the service binary and HTTP surface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error("scoring error: {0}")]
    Scoring(#[from] ScoringError),
    #[error("evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),
    #[error("export error: {0}")]
    Export(#[from] csv::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Scoring(ScoringError::DepartmentNotFound) => StatusCode::NOT_FOUND,
            AppError::Evaluation(EvaluationError::EvaluatorNotFound)
            | AppError::Evaluation(EvaluationError::EvaluationNotFound) => StatusCode::NOT_FOUND,
            AppError::Evaluation(EvaluationError::PermissionDenied(_)) => StatusCode::FORBIDDEN,
            AppError::Evaluation(EvaluationError::Conflict) => StatusCode::CONFLICT,
            AppError::Evaluation(EvaluationError::Validation(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Evaluation(EvaluationError::Repository(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Scoring(_) | AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
