mod aggregate;
mod interpolate;

use super::domain::{KeyResult, MetricType, Objective};
use super::levels::LevelSnapshot;
use serde::{Deserialize, Serialize};

/// Normalized score for one node of the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub level: String,
    pub color: String,
    pub percentage: f64,
}

/// Pure scorer over one band snapshot. Build one per logical scoring pass and
/// drop it afterwards; it holds no other state.
pub struct Scorer<'a> {
    levels: &'a LevelSnapshot,
}

impl<'a> Scorer<'a> {
    pub fn new(levels: &'a LevelSnapshot) -> Self {
        Self { levels }
    }

    pub fn levels(&self) -> &LevelSnapshot {
        self.levels
    }

    /// Score one key result from its actual value, thresholds, and metric type.
    ///
    /// Silent defaults, kept for compatibility with the established behavior:
    /// an unparseable quantitative value scores as 0.0 and an unrecognized
    /// qualitative grade scores as E. Neither raises an error.
    pub fn key_result(&self, key_result: &KeyResult) -> ScoreResult {
        if key_result.metric_type == MetricType::Qualitative {
            return self.qualitative(key_result.actual_value.as_deref());
        }

        let actual = key_result
            .actual_value
            .as_deref()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .unwrap_or(0.0);

        let (raw_score, level) = interpolate::quantitative(
            actual,
            key_result.metric_type,
            &key_result.thresholds,
            self.levels,
        );

        let score = round2(self.levels.clamp(raw_score));
        ScoreResult {
            score,
            color: self.levels.color_for_level(&level),
            percentage: self.levels.percentage(score),
            level,
        }
    }

    /// Unweighted arithmetic mean of the objective's key result scores.
    pub fn objective(&self, objective: &Objective) -> ScoreResult {
        aggregate::objective_score(self, &objective.key_results)
    }

    /// Weighted mean of the objectives' scores; objectives without key
    /// results are excluded from both numerator and denominator.
    pub fn department(&self, objectives: &[Objective]) -> ScoreResult {
        aggregate::department_score(self, objectives)
    }

    fn qualitative(&self, grade: Option<&str>) -> ScoreResult {
        let normalized = grade.map(|g| g.trim().to_uppercase());
        let (score, level) = interpolate::qualitative_grade(normalized.as_deref());
        ScoreResult {
            score,
            level: level.to_string(),
            color: self.levels.color_for_level(level),
            percentage: self.levels.percentage(score),
        }
    }

    /// Derive level, color, and percentage for an aggregate score.
    pub(crate) fn from_score(&self, score: f64) -> ScoreResult {
        let level = self.levels.level_for_score(score);
        ScoreResult {
            score: round2(score),
            color: self.levels.color_for_level(&level),
            percentage: self.levels.percentage(score),
            level,
        }
    }

    /// Sentinel for nodes with nothing to aggregate.
    pub(crate) fn empty(&self) -> ScoreResult {
        ScoreResult {
            score: 3.0,
            level: "below".to_string(),
            color: self.levels.color_for_level("below"),
            percentage: 0.0,
        }
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
