//! Human evaluation lifecycle and blending with the automatic score.

pub mod blend;
pub mod domain;
pub(crate) mod policy;
pub mod service;

pub use blend::DepartmentScoreResult;
pub use domain::{
    Evaluation, EvaluationId, EvaluationRequest, EvaluationStatus, EvaluationTarget, Evaluator,
    EvaluatorId, EvaluatorType, LetterRating, Role,
};
pub use service::{EvaluationError, EvaluationService};
