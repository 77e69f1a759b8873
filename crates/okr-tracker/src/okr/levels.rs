use serde::{Deserialize, Serialize};

/// Configurable scoring band: display name, anchor score, and chart color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreLevel {
    pub name: String,
    pub score_value: f64,
    pub color: String,
    pub display_order: i32,
}

impl ScoreLevel {
    fn new(name: &str, score_value: f64, color: &str, display_order: i32) -> Self {
        Self {
            name: name.to_string(),
            score_value,
            color: color.to_string(),
            display_order,
        }
    }
}

/// Ordered band list captured once per logical scoring pass.
///
/// The snapshot is an owned value created at the start of a pass, threaded by
/// reference through every scoring call, and dropped when the pass ends, so a
/// stale band list can never leak into an unrelated later pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSnapshot {
    bands: Vec<ScoreLevel>,
}

impl LevelSnapshot {
    /// Build a snapshot from the configured bands, ordered by display order.
    /// An empty list falls back to the five fixed default bands.
    pub fn from_levels(mut levels: Vec<ScoreLevel>) -> Self {
        if levels.is_empty() {
            return Self::default_bands();
        }
        levels.sort_by_key(|level| level.display_order);
        Self { bands: levels }
    }

    /// The five built-in bands used when nothing is configured.
    pub fn default_bands() -> Self {
        Self {
            bands: vec![
                ScoreLevel::new("below", 3.00, "#d9534f", 1),
                ScoreLevel::new("meets", 4.25, "#f0ad4e", 2),
                ScoreLevel::new("good", 4.50, "#5cb85c", 3),
                ScoreLevel::new("very good", 4.75, "#28a745", 4),
                ScoreLevel::new("exceptional", 5.00, "#1e7b34", 5),
            ],
        }
    }

    pub fn bands(&self) -> &[ScoreLevel] {
        &self.bands
    }

    pub fn min_score(&self) -> f64 {
        self.bands[0].score_value
    }

    pub fn max_score(&self) -> f64 {
        self.bands[self.bands.len() - 1].score_value
    }

    /// Resolve the band identifier for a numeric score by walking the bands
    /// from the top down; scores under the lowest anchor map to the lowest band.
    pub fn level_for_score(&self, score: f64) -> String {
        for band in self.bands.iter().rev() {
            if score >= band.score_value {
                return level_slug(&band.name);
            }
        }
        level_slug(&self.bands[0].name)
    }

    /// Resolve the color for a band identifier. Matching is case-insensitive
    /// with space/underscore normalization; no match falls back to the lowest
    /// band's color.
    pub fn color_for_level(&self, level: &str) -> String {
        let wanted = level.replace('_', " ");
        for band in &self.bands {
            if band.name.eq_ignore_ascii_case(&wanted) {
                return band.color.clone();
            }
        }
        self.bands[0].color.clone()
    }

    /// Position of a score within the band range, as a percentage rounded to
    /// one decimal place. A zero-width range yields 0.0.
    pub fn percentage(&self, score: f64) -> f64 {
        let min = self.min_score();
        let range = self.max_score() - min;
        if range == 0.0 {
            return 0.0;
        }
        (((score - min) / range) * 1000.0).round() / 10.0
    }

    pub(crate) fn clamp(&self, score: f64) -> f64 {
        score.max(self.min_score()).min(self.max_score())
    }
}

/// Normalize a band display name into its stable lowercase identifier.
pub(crate) fn level_slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}
