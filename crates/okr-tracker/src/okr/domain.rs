use serde::{Deserialize, Serialize};

/// Identifier wrapper for departments, the root aggregation unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepartmentId(pub String);

/// Identifier wrapper for objectives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectiveId(pub String);

/// Identifier wrapper for key results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyResultId(pub String);

/// Direction (or absence) of the numeric comparison for a key result metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    HigherBetter,
    LowerBetter,
    Qualitative,
}

impl MetricType {
    pub const fn label(self) -> &'static str {
        match self {
            MetricType::HigherBetter => "Higher is better",
            MetricType::LowerBetter => "Lower is better",
            MetricType::Qualitative => "Qualitative",
        }
    }
}

/// Five interpolation anchors ordered by quality, from `below` up to
/// `exceptional`. Values ascend numerically for `HigherBetter` metrics and
/// descend for `LowerBetter` ones. Qualitative metrics ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Thresholds {
    pub below: f64,
    pub meets: f64,
    pub good: f64,
    pub very_good: f64,
    pub exceptional: f64,
}

/// Leaf metric: thresholds plus the free-form actual value.
///
/// `actual_value` carries a numeric string for quantitative metrics or a
/// letter grade A-E for qualitative ones. `weight` is informational only;
/// objective aggregation uses an unweighted mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyResult {
    pub id: KeyResultId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub metric_type: MetricType,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub weight: Option<u8>,
    pub thresholds: Thresholds,
    #[serde(default)]
    pub actual_value: Option<String>,
}

/// Weighted group of key results. `weight` is the intended share (0-100) of
/// the parent department; when unset the department aggregation assigns an
/// equal share across objectives that have key results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub id: ObjectiveId,
    pub name: String,
    #[serde(default)]
    pub weight: Option<f64>,
    pub key_results: Vec<KeyResult>,
}

/// Root aggregation unit and the target of human evaluations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub objectives: Vec<Objective>,
}
