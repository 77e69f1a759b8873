//! Objective/key-result scoring: leaf metric interpolation, hierarchical
//! aggregation, the human evaluation lifecycle, and score blending.

pub mod domain;
pub mod evaluations;
pub mod export;
pub mod levels;
pub mod repository;
pub mod router;
pub mod service;
pub(crate) mod scoring;

#[cfg(test)]
mod tests;

pub use domain::{
    Department, DepartmentId, KeyResult, KeyResultId, MetricType, Objective, ObjectiveId,
    Thresholds,
};
pub use evaluations::{
    blend::DepartmentScoreResult,
    domain::{
        Evaluation, EvaluationId, EvaluationRequest, EvaluationStatus, EvaluationTarget,
        Evaluator, EvaluatorId, EvaluatorType, LetterRating, Role,
    },
    service::{EvaluationError, EvaluationService},
};
pub use levels::{LevelSnapshot, ScoreLevel};
pub use repository::{
    DepartmentRepository, EvaluationRepository, EvaluatorDirectory, RepositoryError,
    ScoreLevelStore,
};
pub use router::okr_router;
pub use scoring::{ScoreResult, Scorer};
pub use service::{
    DepartmentScorecard, KeyResultScoreView, ObjectiveScoreView, OkrScoringService, ScoringError,
};
