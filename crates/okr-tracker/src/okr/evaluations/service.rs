use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::super::repository::{EvaluationRepository, EvaluatorDirectory, RepositoryError};
use super::domain::{
    Evaluation, EvaluationId, EvaluationRequest, EvaluationStatus, EvaluationTarget, EvaluatorId,
};
use super::policy;

/// Error raised by the evaluation lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("evaluator not found")]
    EvaluatorNotFound,
    #[error("evaluation not found")]
    EvaluationNotFound,
    #[error("{0}")]
    PermissionDenied(String),
    #[error("an evaluation of this type already exists for the target")]
    Conflict,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

static EVALUATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_evaluation_id() -> EvaluationId {
    let id = EVALUATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EvaluationId(format!("eval-{id:06}"))
}

/// Lifecycle service enforcing permissions, uniqueness, rating validation,
/// and the draft/submitted state machine.
pub struct EvaluationService<R, U> {
    repository: Arc<R>,
    evaluators: Arc<U>,
}

impl<R, U> EvaluationService<R, U>
where
    R: EvaluationRepository + 'static,
    U: EvaluatorDirectory + 'static,
{
    pub fn new(repository: Arc<R>, evaluators: Arc<U>) -> Self {
        Self {
            repository,
            evaluators,
        }
    }

    /// Create a draft evaluation for the caller.
    pub fn create(
        &self,
        request: EvaluationRequest,
        evaluator_id: &EvaluatorId,
    ) -> Result<Evaluation, EvaluationError> {
        let evaluator = self
            .evaluators
            .fetch(evaluator_id)?
            .ok_or(EvaluationError::EvaluatorNotFound)?;

        policy::authorize(evaluator.role, request.evaluator_type, request.target)?;

        if self.repository.exists_for(
            evaluator_id,
            request.target,
            &request.target_id,
            request.evaluator_type,
        )? {
            return Err(EvaluationError::Conflict);
        }

        // Directors may rate in stars; convert before range validation.
        let numeric_rating = match request.star_rating {
            Some(stars) if request.evaluator_type == super::domain::EvaluatorType::Director => {
                Some(policy::stars_to_numeric(stars)?)
            }
            _ => request.numeric_rating,
        };

        policy::validate_rating(request.evaluator_type, numeric_rating, request.letter_rating)?;

        let now = Utc::now();
        let evaluation = Evaluation {
            id: next_evaluation_id(),
            evaluator: evaluator_id.clone(),
            evaluator_type: request.evaluator_type,
            target: request.target,
            target_id: request.target_id,
            numeric_rating,
            letter_rating: request.letter_rating,
            comment: request.comment,
            status: EvaluationStatus::Draft,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(evaluation).map_err(|err| match err {
            RepositoryError::Conflict => EvaluationError::Conflict,
            other => EvaluationError::Repository(other),
        })?;
        info!(
            evaluation = %stored.id.0,
            evaluator_type = stored.evaluator_type.label(),
            target_id = %stored.target_id,
            "evaluation draft created"
        );
        Ok(stored)
    }

    /// Transition a draft to submitted. Only the original evaluator may do
    /// this and only while the evaluation is still a draft.
    pub fn submit(
        &self,
        id: &EvaluationId,
        caller: &EvaluatorId,
    ) -> Result<Evaluation, EvaluationError> {
        let mut evaluation = self
            .repository
            .fetch(id)?
            .ok_or(EvaluationError::EvaluationNotFound)?;

        self.check_owned_draft(&evaluation, caller, "submitted")?;

        evaluation.status = EvaluationStatus::Submitted;
        evaluation.updated_at = Utc::now();
        self.repository.update(evaluation.clone())?;
        info!(evaluation = %evaluation.id.0, "evaluation submitted");
        Ok(evaluation)
    }

    /// Remove a draft. Submitted evaluations are immutable.
    pub fn delete(&self, id: &EvaluationId, caller: &EvaluatorId) -> Result<(), EvaluationError> {
        let evaluation = self
            .repository
            .fetch(id)?
            .ok_or(EvaluationError::EvaluationNotFound)?;

        self.check_owned_draft(&evaluation, caller, "deleted")?;

        self.repository.remove(id)?;
        info!(evaluation = %id.0, "evaluation draft deleted");
        Ok(())
    }

    /// Evaluations pointed at a target, optionally filtered by status.
    pub fn for_target(
        &self,
        target: EvaluationTarget,
        target_id: &str,
        status: Option<EvaluationStatus>,
    ) -> Result<Vec<Evaluation>, EvaluationError> {
        Ok(self.repository.for_target(target, target_id, status)?)
    }

    /// Evaluations created by one evaluator.
    pub fn by_evaluator(
        &self,
        evaluator: &EvaluatorId,
    ) -> Result<Vec<Evaluation>, EvaluationError> {
        Ok(self.repository.by_evaluator(evaluator)?)
    }

    fn check_owned_draft(
        &self,
        evaluation: &Evaluation,
        caller: &EvaluatorId,
        action: &str,
    ) -> Result<(), EvaluationError> {
        if &evaluation.evaluator != caller {
            return Err(EvaluationError::Validation(format!(
                "only your own evaluations can be {action}"
            )));
        }
        if evaluation.status != EvaluationStatus::Draft {
            return Err(EvaluationError::Validation(format!(
                "only draft evaluations can be {action}"
            )));
        }
        Ok(())
    }
}
