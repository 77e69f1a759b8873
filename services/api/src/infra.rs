use metrics_exporter_prometheus::PrometheusHandle;
use okr_tracker::okr::{
    Department, DepartmentId, DepartmentRepository, Evaluation, EvaluationId, EvaluationRepository,
    EvaluationStatus, EvaluationTarget, Evaluator, EvaluatorDirectory, EvaluatorId, EvaluatorType,
    RepositoryError, ScoreLevel, ScoreLevelStore,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryDepartmentRepository {
    records: Arc<Mutex<HashMap<DepartmentId, Department>>>,
}

impl InMemoryDepartmentRepository {
    pub(crate) fn seeded(departments: Vec<Department>) -> Self {
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

impl DepartmentRepository for InMemoryDepartmentRepository {
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

/// Level store starting empty, so the engine falls back to the five default
/// bands until an operator configures custom ones.
#[derive(Default, Clone)]
pub(crate) struct InMemoryScoreLevelStore {
    levels: Arc<Mutex<Vec<ScoreLevel>>>,
}

impl ScoreLevelStore for InMemoryScoreLevelStore {
    fn load_ordered(&self) -> Result<Vec<ScoreLevel>, RepositoryError> {
        let mut levels = self.levels.lock().expect("level mutex poisoned").clone();
        levels.sort_by_key(|level| level.display_order);
        Ok(levels)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryEvaluatorDirectory {
    records: Arc<Mutex<HashMap<EvaluatorId, Evaluator>>>,
}

impl InMemoryEvaluatorDirectory {
    pub(crate) fn seeded(evaluators: Vec<Evaluator>) -> Self {
        let directory = Self::default();
        {
            let mut guard = directory.records.lock().expect("evaluator mutex poisoned");
            for evaluator in evaluators {
                guard.insert(evaluator.id.clone(), evaluator);
            }
        }
        directory
    }
}

impl EvaluatorDirectory for InMemoryEvaluatorDirectory {
    fn fetch(&self, id: &EvaluatorId) -> Result<Option<Evaluator>, RepositoryError> {
        let guard = self.records.lock().expect("evaluator mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryEvaluationRepository {
    records: Arc<Mutex<HashMap<EvaluationId, Evaluation>>>,
}

impl EvaluationRepository for InMemoryEvaluationRepository {
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
