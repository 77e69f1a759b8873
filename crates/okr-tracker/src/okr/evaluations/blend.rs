use serde::{Deserialize, Serialize};

use super::super::levels::LevelSnapshot;
use super::super::scoring::{round2, ScoreResult};
use super::domain::{Evaluation, EvaluatorType, LetterRating};

/// Automatic-plus-human composite for one department.
///
/// The blended figure exists only when the automatic score, a director
/// rating, and an HR rating are all present; there is no partial blending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentScoreResult {
    pub automatic_okr_score: f64,
    pub automatic_okr_percentage: f64,
    pub director_evaluation: Option<f64>,
    pub director_stars: Option<u8>,
    pub director_comment: Option<String>,
    pub hr_evaluation_letter: Option<LetterRating>,
    pub hr_evaluation_numeric: Option<f64>,
    pub hr_comment: Option<String>,
    pub business_block_evaluation: Option<f64>,
    pub business_block_comment: Option<String>,
    pub final_combined_score: Option<f64>,
    pub final_percentage: Option<f64>,
    pub score_level: String,
    pub color: String,
    pub has_director_evaluation: bool,
    pub has_hr_evaluation: bool,
    pub has_business_block_evaluation: bool,
}

const AUTOMATIC_WEIGHT: f64 = 0.60;
const DIRECTOR_WEIGHT: f64 = 0.20;
const HR_WEIGHT: f64 = 0.20;

/// Merge the automatic department score with the submitted evaluations.
/// Uniqueness of the evaluation tuple should make duplicates impossible; if
/// one slips through anyway, the first encountered wins.
pub(crate) fn blend(
    automatic: &ScoreResult,
    submitted: &[Evaluation],
    levels: &LevelSnapshot,
) -> DepartmentScoreResult {
    let mut director: Option<&Evaluation> = None;
    let mut hr: Option<&Evaluation> = None;
    let mut business_block: Option<&Evaluation> = None;

    for evaluation in submitted {
        let slot = match evaluation.evaluator_type {
            EvaluatorType::Director => &mut director,
            EvaluatorType::Hr => &mut hr,
            EvaluatorType::BusinessBlock => &mut business_block,
        };
        if slot.is_none() {
            *slot = Some(evaluation);
        }
    }

    let director_score = director.and_then(|e| e.numeric_rating);
    let director_stars = director_score.and_then(numeric_to_stars);
    let director_comment = director.and_then(|e| e.comment.clone());

    let hr_letter = hr.and_then(|e| e.letter_rating);
    let hr_score = hr_letter.map(LetterRating::numeric_value);
    let hr_comment = hr.and_then(|e| e.comment.clone());

    let business_block_score = business_block.and_then(|e| e.numeric_rating);
    let business_block_comment = business_block.and_then(|e| e.comment.clone());

    let final_score = match (director_score, hr_score) {
        (Some(director), Some(hr)) => Some(round2(
            automatic.score * AUTOMATIC_WEIGHT + director * DIRECTOR_WEIGHT + hr * HR_WEIGHT,
        )),
        _ => None,
    };

    let score_level = match final_score {
        Some(score) => levels.level_for_score(score),
        None => automatic.level.clone(),
    };
    let color = levels.color_for_level(&score_level);

    DepartmentScoreResult {
        automatic_okr_score: automatic.score,
        automatic_okr_percentage: automatic.percentage,
        director_evaluation: director_score,
        director_stars,
        director_comment,
        hr_evaluation_letter: hr_letter,
        hr_evaluation_numeric: hr_score,
        hr_comment,
        business_block_evaluation: business_block_score,
        business_block_comment,
        final_combined_score: final_score,
        final_percentage: final_score.map(|score| levels.percentage(score)),
        score_level,
        color,
        has_director_evaluation: director_score.is_some(),
        has_hr_evaluation: hr_score.is_some(),
        has_business_block_evaluation: business_block_score.is_some(),
    }
}

/// Reverse of the star conversion, for UI display. Scores outside the
/// director range have no star equivalent.
pub(crate) fn numeric_to_stars(score: f64) -> Option<u8> {
    if !(4.25..=5.0).contains(&score) {
        return None;
    }
    Some((1.0 + (score - 4.25) / 0.1875).round() as u8)
}
