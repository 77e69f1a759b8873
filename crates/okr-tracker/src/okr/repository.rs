use super::domain::{Department, DepartmentId};
use super::evaluations::domain::{
    Evaluation, EvaluationId, EvaluationStatus, EvaluationTarget, Evaluator, EvaluatorId,
    EvaluatorType,
};
use super::levels::ScoreLevel;

/// Error enumeration for storage collaborators.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Read-only view of the department hierarchy. The engine never mutates
/// departments, objectives, or key results.
pub trait DepartmentRepository: Send + Sync {
    fn fetch(&self, id: &DepartmentId) -> Result<Option<Department>, RepositoryError>;
    fn list(&self) -> Result<Vec<Department>, RepositoryError>;
}

/// Supplies the configured scoring bands, ordered by display order. An empty
/// list means the built-in defaults apply.
pub trait ScoreLevelStore: Send + Sync {
    fn load_ordered(&self) -> Result<Vec<ScoreLevel>, RepositoryError>;
}

/// Identity lookup so the evaluation lifecycle can resolve roles.
pub trait EvaluatorDirectory: Send + Sync {
    fn fetch(&self, id: &EvaluatorId) -> Result<Option<Evaluator>, RepositoryError>;
}

/// Storage abstraction for evaluations so the lifecycle service can be
/// exercised in isolation. Implementations must enforce uniqueness of the
/// `(evaluator, target, target_id, evaluator_type)` tuple on insert; the
/// service's existence check alone is racy under concurrent creates.
pub trait EvaluationRepository: Send + Sync {
    fn insert(&self, evaluation: Evaluation) -> Result<Evaluation, RepositoryError>;
    fn update(&self, evaluation: Evaluation) -> Result<(), RepositoryError>;
    fn remove(&self, id: &EvaluationId) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &EvaluationId) -> Result<Option<Evaluation>, RepositoryError>;
    fn exists_for(
        &self,
        evaluator: &EvaluatorId,
        target: EvaluationTarget,
        target_id: &str,
        evaluator_type: EvaluatorType,
    ) -> Result<bool, RepositoryError>;
    fn for_target(
        &self,
        target: EvaluationTarget,
        target_id: &str,
        status: Option<EvaluationStatus>,
    ) -> Result<Vec<Evaluation>, RepositoryError>;
    fn by_evaluator(&self, evaluator: &EvaluatorId) -> Result<Vec<Evaluation>, RepositoryError>;
}
