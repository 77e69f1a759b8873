//! In-memory repository implementations and fixtures shared by the
//! integration suites.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use okr_tracker::okr::{
    Department, DepartmentId, DepartmentRepository, Evaluation, EvaluationId, EvaluationRepository,
    EvaluationRequest, EvaluationService, EvaluationStatus, EvaluationTarget, Evaluator,
    EvaluatorDirectory, EvaluatorId, EvaluatorType, KeyResult, KeyResultId, LetterRating,
    MetricType, Objective, ObjectiveId, OkrScoringService, RepositoryError, Role, ScoreLevel,
    ScoreLevelStore, Thresholds,
};

pub fn percent_thresholds() -> Thresholds {
    Thresholds {
        below: 50.0,
        meets: 70.0,
        good: 80.0,
        very_good: 90.0,
        exceptional: 100.0,
    }
}

/// Department scoring exactly 4.2 under default bands: objectives weighted
/// 60/40 with key result scores 5.0 and 3.0.
pub fn sales_department() -> Department {
    Department {
        id: DepartmentId("dept-sales".to_string()),
        name: "Sales".to_string(),
        objectives: vec![
            Objective {
                id: ObjectiveId("obj-growth".to_string()),
                name: "Grow pipeline".to_string(),
                weight: Some(60.0),
                key_results: vec![KeyResult {
                    id: KeyResultId("kr-pipeline".to_string()),
                    name: "Pipeline coverage".to_string(),
                    description: None,
                    metric_type: MetricType::HigherBetter,
                    unit: Some("%".to_string()),
                    weight: None,
                    thresholds: percent_thresholds(),
                    actual_value: Some("100".to_string()),
                }],
            },
            Objective {
                id: ObjectiveId("obj-quality".to_string()),
                name: "Raise deal quality".to_string(),
                weight: Some(40.0),
                key_results: vec![KeyResult {
                    id: KeyResultId("kr-reviews".to_string()),
                    name: "Deal review grade".to_string(),
                    description: None,
                    metric_type: MetricType::Qualitative,
                    unit: None,
                    weight: None,
                    thresholds: percent_thresholds(),
                    actual_value: Some("E".to_string()),
                }],
            },
        ],
    }
}

pub fn evaluation_request(evaluator_type: EvaluatorType, target_id: &str) -> EvaluationRequest {
    let (numeric_rating, letter_rating) = match evaluator_type {
        EvaluatorType::Director => (Some(4.5), None),
        EvaluatorType::Hr => (None, Some(LetterRating::B)),
        EvaluatorType::BusinessBlock => (Some(3.0), None),
    };

    EvaluationRequest {
        evaluator_type,
        target: EvaluationTarget::Department,
        target_id: target_id.to_string(),
        numeric_rating,
        star_rating: None,
        letter_rating,
        comment: Some("steady quarter".to_string()),
    }
}

#[derive(Default, Clone)]
pub struct MemoryDepartments {
    records: Arc<Mutex<HashMap<DepartmentId, Department>>>,
}

impl MemoryDepartments {
    pub fn with(departments: Vec<Department>) -> Self {
        let repo = Self::default();
        {
            let mut guard = repo.records.lock().expect("department mutex poisoned");
            for department in departments {
                guard.insert(department.id.clone(), department);
            }
        }
        repo
    }
}

impl DepartmentRepository for MemoryDepartments {
    fn fetch(&self, id: &DepartmentId) -> Result<Option<Department>, RepositoryError> {
        let guard = self.records.lock().expect("department mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Department>, RepositoryError> {
        let guard = self.records.lock().expect("department mutex poisoned");
        let mut departments: Vec<Department> = guard.values().cloned().collect();
        departments.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(departments)
    }
}

#[derive(Default, Clone)]
pub struct MemoryLevels {
    levels: Arc<Mutex<Vec<ScoreLevel>>>,
}

impl MemoryLevels {
    pub fn with(levels: Vec<ScoreLevel>) -> Self {
        Self {
            levels: Arc::new(Mutex::new(levels)),
        }
    }

    pub fn replace(&self, levels: Vec<ScoreLevel>) {
        *self.levels.lock().expect("level mutex poisoned") = levels;
    }
}

impl ScoreLevelStore for MemoryLevels {
    fn load_ordered(&self) -> Result<Vec<ScoreLevel>, RepositoryError> {
        let mut levels = self.levels.lock().expect("level mutex poisoned").clone();
        levels.sort_by_key(|level| level.display_order);
        Ok(levels)
    }
}

#[derive(Default, Clone)]
pub struct MemoryEvaluators {
    records: Arc<Mutex<HashMap<EvaluatorId, Evaluator>>>,
}

impl MemoryEvaluators {
    pub fn with_defaults() -> Self {
        let directory = Self::default();
        for (id, name, role) in [
            ("dir-1", "Dana Director", Role::Director),
            ("hr-1", "Harper Reyes", Role::Hr),
            ("bb-1", "Blake Block", Role::BusinessBlock),
            ("admin-1", "Avery Admin", Role::Admin),
            ("emp-1", "Emery Staff", Role::Employee),
        ] {
            directory
                .records
                .lock()
                .expect("evaluator mutex poisoned")
                .insert(
                    EvaluatorId(id.to_string()),
                    Evaluator {
                        id: EvaluatorId(id.to_string()),
                        full_name: name.to_string(),
                        role,
                    },
                );
        }
        directory
    }
}

impl EvaluatorDirectory for MemoryEvaluators {
    fn fetch(&self, id: &EvaluatorId) -> Result<Option<Evaluator>, RepositoryError> {
        let guard = self.records.lock().expect("evaluator mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub struct MemoryEvaluations {
    records: Arc<Mutex<HashMap<EvaluationId, Evaluation>>>,
}

impl EvaluationRepository for MemoryEvaluations {
    fn insert(&self, evaluation: Evaluation) -> Result<Evaluation, RepositoryError> {
        let mut guard = self.records.lock().expect("evaluation mutex poisoned");
        let duplicate = guard.values().any(|existing| {
            existing.evaluator == evaluation.evaluator
                && existing.target == evaluation.target
                && existing.target_id == evaluation.target_id
                && existing.evaluator_type == evaluation.evaluator_type
        });
        if duplicate || guard.contains_key(&evaluation.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(evaluation.id.clone(), evaluation.clone());
        Ok(evaluation)
    }

    fn update(&self, evaluation: Evaluation) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("evaluation mutex poisoned");
        if !guard.contains_key(&evaluation.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(evaluation.id.clone(), evaluation);
        Ok(())
    }

    fn remove(&self, id: &EvaluationId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("evaluation mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn fetch(&self, id: &EvaluationId) -> Result<Option<Evaluation>, RepositoryError> {
        let guard = self.records.lock().expect("evaluation mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn exists_for(
        &self,
        evaluator: &EvaluatorId,
        target: EvaluationTarget,
        target_id: &str,
        evaluator_type: EvaluatorType,
    ) -> Result<bool, RepositoryError> {
        let guard = self.records.lock().expect("evaluation mutex poisoned");
        Ok(guard.values().any(|existing| {
            &existing.evaluator == evaluator
                && existing.target == target
                && existing.target_id == target_id
                && existing.evaluator_type == evaluator_type
        }))
    }

    fn for_target(
        &self,
        target: EvaluationTarget,
        target_id: &str,
        status: Option<EvaluationStatus>,
    ) -> Result<Vec<Evaluation>, RepositoryError> {
        let guard = self.records.lock().expect("evaluation mutex poisoned");
        let mut matches: Vec<Evaluation> = guard
            .values()
            .filter(|evaluation| {
                evaluation.target == target
                    && evaluation.target_id == target_id
                    && status.map_or(true, |wanted| evaluation.status == wanted)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(matches)
    }

    fn by_evaluator(&self, evaluator: &EvaluatorId) -> Result<Vec<Evaluation>, RepositoryError> {
        let guard = self.records.lock().expect("evaluation mutex poisoned");
        let mut matches: Vec<Evaluation> = guard
            .values()
            .filter(|evaluation| &evaluation.evaluator == evaluator)
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(matches)
    }
}

pub type SharedScoring = Arc<OkrScoringService<MemoryDepartments, MemoryLevels, MemoryEvaluations>>;
pub type SharedEvaluations = Arc<EvaluationService<MemoryEvaluations, MemoryEvaluators>>;

pub fn build_services(
    departments: Vec<Department>,
    levels: Vec<ScoreLevel>,
) -> (SharedScoring, SharedEvaluations) {
    let department_repo = Arc::new(MemoryDepartments::with(departments));
    let level_store = Arc::new(MemoryLevels::with(levels));
    let evaluation_repo = Arc::new(MemoryEvaluations::default());
    let evaluators = Arc::new(MemoryEvaluators::with_defaults());

    let scoring = Arc::new(OkrScoringService::new(
        department_repo,
        level_store,
        evaluation_repo.clone(),
    ));
    let evaluations = Arc::new(EvaluationService::new(evaluation_repo, evaluators));
    (scoring, evaluations)
}
