use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored evaluations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvaluationId(pub String);

/// Identifier wrapper for the person submitting an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvaluatorId(pub String);

/// Independent human-scoring channels blended with the automatic score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorType {
    Director,
    Hr,
    BusinessBlock,
}

impl EvaluatorType {
    pub const fn label(self) -> &'static str {
        match self {
            EvaluatorType::Director => "Director",
            EvaluatorType::Hr => "HR",
            EvaluatorType::BusinessBlock => "Business Block",
        }
    }
}

/// Entity kinds an evaluation can point at. Departments are the only target
/// today; the closed enum keeps the door open without free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationTarget {
    Department,
}

impl EvaluationTarget {
    pub const fn label(self) -> &'static str {
        match self {
            EvaluationTarget::Department => "department",
        }
    }
}

/// Workflow state. `Draft` can be submitted or deleted; `Submitted` is
/// terminal and immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    Draft,
    Submitted,
}

impl EvaluationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EvaluationStatus::Draft => "draft",
            EvaluationStatus::Submitted => "submitted",
        }
    }
}

/// Organizational role of an evaluator identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Director,
    Hr,
    BusinessBlock,
    Employee,
}

/// HR letter scale. Deliberately narrower than the key-result qualitative
/// scale: E is not a valid HR input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterRating {
    A,
    B,
    C,
    D,
}

impl LetterRating {
    pub const fn as_str(self) -> &'static str {
        match self {
            LetterRating::A => "A",
            LetterRating::B => "B",
            LetterRating::C => "C",
            LetterRating::D => "D",
        }
    }

    /// Numeric equivalent used when blending with the automatic score.
    pub const fn numeric_value(self) -> f64 {
        match self {
            LetterRating::A => 5.0,
            LetterRating::B => 4.75,
            LetterRating::C => 4.5,
            LetterRating::D => 4.25,
        }
    }
}

/// Minimal identity view the lifecycle needs: who is evaluating and with
/// which role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluator {
    pub id: EvaluatorId,
    pub full_name: String,
    pub role: Role,
}

/// Stored human evaluation of a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: EvaluationId,
    pub evaluator: EvaluatorId,
    pub evaluator_type: EvaluatorType,
    pub target: EvaluationTarget,
    pub target_id: String,
    #[serde(default)]
    pub numeric_rating: Option<f64>,
    #[serde(default)]
    pub letter_rating: Option<LetterRating>,
    #[serde(default)]
    pub comment: Option<String>,
    pub status: EvaluationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a draft evaluation. Directors may supply a 1-5 star
/// rating instead of the numeric score; it is converted before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub evaluator_type: EvaluatorType,
    pub target: EvaluationTarget,
    pub target_id: String,
    #[serde(default)]
    pub numeric_rating: Option<f64>,
    #[serde(default)]
    pub star_rating: Option<u8>,
    #[serde(default)]
    pub letter_rating: Option<LetterRating>,
    #[serde(default)]
    pub comment: Option<String>,
}
