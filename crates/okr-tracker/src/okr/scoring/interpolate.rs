use super::super::domain::{MetricType, Thresholds};
use super::super::levels::{level_slug, LevelSnapshot};

/// Fixed grade anchors for qualitative metrics. Anything else scores as E.
const QUALITATIVE_GRADES: [(&str, f64, &str); 5] = [
    ("A", 5.00, "exceptional"),
    ("B", 4.75, "very_good"),
    ("C", 4.50, "good"),
    ("D", 4.25, "meets"),
    ("E", 3.00, "below"),
];

pub(crate) fn qualitative_grade(grade: Option<&str>) -> (f64, &'static str) {
    let wanted = grade.unwrap_or("E");
    for (letter, score, level) in QUALITATIVE_GRADES {
        if letter == wanted {
            return (score, level);
        }
    }
    (3.00, "below")
}

/// Piecewise-linear interpolation of an actual value onto the band anchors.
///
/// The five threshold boundaries bracket the value; the bracket index maps
/// onto the configured bands (clamped when fewer than five are configured).
/// The `max(span, 1)` denominator is a fixed epsilon guard against division
/// by zero carried over from the established behavior; it understates the
/// ratio whenever a threshold spread is smaller than 1.
pub(crate) fn quantitative(
    actual: f64,
    metric_type: MetricType,
    t: &Thresholds,
    levels: &LevelSnapshot,
) -> (f64, String) {
    let bands = levels.bands();
    let last = bands.len() - 1;

    let (score, idx) = match metric_type {
        MetricType::HigherBetter => {
            if actual >= t.exceptional {
                (bands[last].score_value, last)
            } else if actual >= t.very_good {
                rising(actual, t.very_good, t.exceptional, levels, band_index(last, 1))
            } else if actual >= t.good {
                rising(actual, t.good, t.very_good, levels, band_index(last, 2))
            } else if actual >= t.meets {
                rising(actual, t.meets, t.good, levels, band_index(last, 3))
            } else if actual >= t.below {
                rising(actual, t.below, t.meets, levels, 0)
            } else {
                (bands[0].score_value, 0)
            }
        }
        // Lower is better: the comparison direction inverts and each segment
        // ratio is mirrored.
        MetricType::LowerBetter => {
            if actual <= t.exceptional {
                (bands[last].score_value, last)
            } else if actual <= t.very_good {
                falling(actual, t.exceptional, t.very_good, levels, band_index(last, 1))
            } else if actual <= t.good {
                falling(actual, t.very_good, t.good, levels, band_index(last, 2))
            } else if actual <= t.meets {
                falling(actual, t.good, t.meets, levels, band_index(last, 3))
            } else if actual <= t.below {
                falling(actual, t.meets, t.below, levels, 0)
            } else {
                (bands[0].score_value, 0)
            }
        }
        MetricType::Qualitative => unreachable!("qualitative metrics take the grade path"),
    };

    (score, level_slug(&bands[idx].name))
}

/// Band index for a bracket counted down from the top, clamped into range.
fn band_index(last: usize, from_top: usize) -> usize {
    last.saturating_sub(from_top).min(4 - from_top)
}

fn rising(
    actual: f64,
    lower: f64,
    upper: f64,
    levels: &LevelSnapshot,
    idx: usize,
) -> (f64, usize) {
    let ratio = (actual - lower) / (upper - lower).max(1.0);
    segment(ratio, levels, idx)
}

fn falling(
    actual: f64,
    lower: f64,
    upper: f64,
    levels: &LevelSnapshot,
    idx: usize,
) -> (f64, usize) {
    let ratio = 1.0 - (actual - lower) / (upper - lower).max(1.0);
    segment(ratio, levels, idx)
}

fn segment(ratio: f64, levels: &LevelSnapshot, idx: usize) -> (f64, usize) {
    let bands = levels.bands();
    let last = bands.len() - 1;
    let start = bands[idx].score_value;
    let end = bands[(idx + 1).min(last)].score_value;
    (start + ratio * (end - start), idx)
}
