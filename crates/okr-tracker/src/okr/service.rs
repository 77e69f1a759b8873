use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::domain::{Department, DepartmentId, KeyResultId, MetricType, ObjectiveId, Thresholds};
use super::evaluations::blend::{blend, DepartmentScoreResult};
use super::evaluations::domain::{EvaluationStatus, EvaluationTarget};
use super::levels::LevelSnapshot;
use super::repository::{
    DepartmentRepository, EvaluationRepository, RepositoryError, ScoreLevelStore,
};
use super::scoring::{ScoreResult, Scorer};

/// Error raised by the scoring facade.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("department not found")]
    DepartmentNotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Facade composing the repositories with the pure scoring engine.
///
/// Each operation is one logical scoring pass: the band snapshot is loaded
/// once at the top, threaded through every computation, and dropped when the
/// call returns on any path.
pub struct OkrScoringService<D, L, E> {
    departments: Arc<D>,
    levels: Arc<L>,
    evaluations: Arc<E>,
}

impl<D, L, E> OkrScoringService<D, L, E>
where
    D: DepartmentRepository + 'static,
    L: ScoreLevelStore + 'static,
    E: EvaluationRepository + 'static,
{
    pub fn new(departments: Arc<D>, levels: Arc<L>, evaluations: Arc<E>) -> Self {
        Self {
            departments,
            levels,
            evaluations,
        }
    }

    /// Automatic score for one department.
    pub fn department_score(&self, id: &DepartmentId) -> Result<ScoreResult, ScoringError> {
        let department = self.fetch_department(id)?;
        let snapshot = self.snapshot()?;
        let scorer = Scorer::new(&snapshot);
        Ok(scorer.department(&department.objectives))
    }

    /// Automatic score blended with the submitted human evaluations.
    pub fn department_score_with_evaluations(
        &self,
        id: &DepartmentId,
    ) -> Result<DepartmentScoreResult, ScoringError> {
        let department = self.fetch_department(id)?;
        let snapshot = self.snapshot()?;
        let scorer = Scorer::new(&snapshot);
        let automatic = scorer.department(&department.objectives);

        let submitted = self.evaluations.for_target(
            EvaluationTarget::Department,
            &id.0,
            Some(EvaluationStatus::Submitted),
        )?;
        info!(
            department = %id.0,
            submitted = submitted.len(),
            "blending department score with submitted evaluations"
        );

        Ok(blend(&automatic, &submitted, &snapshot))
    }

    /// Full score breakdown for one department: per key result, per
    /// objective, and the department roll-up.
    pub fn department_scorecard(
        &self,
        id: &DepartmentId,
    ) -> Result<DepartmentScorecard, ScoringError> {
        let department = self.fetch_department(id)?;
        let snapshot = self.snapshot()?;
        Ok(scorecard_for(&department, &snapshot))
    }

    /// Scorecards for every known department, sharing one band snapshot.
    pub fn scorecards(&self) -> Result<Vec<DepartmentScorecard>, ScoringError> {
        let departments = self.departments.list()?;
        let snapshot = self.snapshot()?;
        Ok(departments
            .iter()
            .map(|department| scorecard_for(department, &snapshot))
            .collect())
    }

    fn fetch_department(&self, id: &DepartmentId) -> Result<Department, ScoringError> {
        self.departments
            .fetch(id)?
            .ok_or(ScoringError::DepartmentNotFound)
    }

    fn snapshot(&self) -> Result<LevelSnapshot, ScoringError> {
        let configured = self.levels.load_ordered()?;
        debug!(bands = configured.len(), "loaded score level snapshot");
        Ok(LevelSnapshot::from_levels(configured))
    }
}

fn scorecard_for(department: &Department, snapshot: &LevelSnapshot) -> DepartmentScorecard {
    let scorer = Scorer::new(snapshot);

    let objectives = department
        .objectives
        .iter()
        .map(|objective| ObjectiveScoreView {
            objective_id: objective.id.clone(),
            name: objective.name.clone(),
            weight: objective.weight,
            score: scorer.objective(objective),
            key_results: objective
                .key_results
                .iter()
                .map(|kr| KeyResultScoreView {
                    key_result_id: kr.id.clone(),
                    name: kr.name.clone(),
                    metric_type: kr.metric_type,
                    unit: kr.unit.clone(),
                    actual_value: kr.actual_value.clone(),
                    thresholds: kr.thresholds,
                    score: scorer.key_result(kr),
                })
                .collect(),
        })
        .collect();

    DepartmentScorecard {
        department_id: department.id.clone(),
        name: department.name.clone(),
        score: scorer.department(&department.objectives),
        objectives,
    }
}

/// Scored view of a key result, for presentation and export collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyResultScoreView {
    pub key_result_id: KeyResultId,
    pub name: String,
    pub metric_type: MetricType,
    pub unit: Option<String>,
    pub actual_value: Option<String>,
    pub thresholds: Thresholds,
    pub score: ScoreResult,
}

/// Scored view of an objective with its key results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveScoreView {
    pub objective_id: ObjectiveId,
    pub name: String,
    pub weight: Option<f64>,
    pub score: ScoreResult,
    pub key_results: Vec<KeyResultScoreView>,
}

/// Scored view of a department and everything beneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentScorecard {
    pub department_id: DepartmentId,
    pub name: String,
    pub score: ScoreResult,
    pub objectives: Vec<ObjectiveScoreView>,
}
