use super::super::domain::{KeyResult, Objective};
use super::{ScoreResult, Scorer};

pub(crate) fn objective_score(scorer: &Scorer<'_>, key_results: &[KeyResult]) -> ScoreResult {
    if key_results.is_empty() {
        return scorer.empty();
    }

    let total: f64 = key_results
        .iter()
        .map(|kr| scorer.key_result(kr).score)
        .sum();

    scorer.from_score(total / key_results.len() as f64)
}

pub(crate) fn department_score(scorer: &Scorer<'_>, objectives: &[Objective]) -> ScoreResult {
    if objectives.is_empty() {
        return scorer.empty();
    }

    let with_key_results = objectives
        .iter()
        .filter(|objective| !objective.key_results.is_empty())
        .count();
    if with_key_results == 0 {
        return scorer.empty();
    }

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for objective in objectives {
        if objective.key_results.is_empty() {
            continue;
        }

        let weight = objective
            .weight
            .unwrap_or(100.0 / with_key_results as f64);
        let score = objective_score(scorer, &objective.key_results);
        weighted_sum += score.score * weight;
        total_weight += weight;
    }

    let average = if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    };
    scorer.from_score(average)
}
