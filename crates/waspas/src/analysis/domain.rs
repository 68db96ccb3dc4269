use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether larger or smaller raw values are preferred for a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Benefit,
    Cost,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Benefit => "Benefit",
            Direction::Cost => "Cost",
        }
    }

    /// Accepts the spellings found in spreadsheet exports (`benefit`, `max`, `1`, ...).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "benefit" | "max" | "maximize" | "1" | "+1" => Some(Self::Benefit),
            "cost" | "min" | "minimize" | "-1" => Some(Self::Cost),
            _ => None,
        }
    }
}

/// Column definition of a decision matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub key: String,
    pub name: String,
    pub direction: Direction,
    pub weight: f64,
}

impl Criterion {
    pub fn new(key: &str, name: &str, direction: Direction, weight: f64) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            direction,
            weight,
        }
    }

    pub fn benefit(key: &str, name: &str, weight: f64) -> Self {
        Self::new(key, name, Direction::Benefit, weight)
    }

    pub fn cost(key: &str, name: &str, weight: f64) -> Self {
        Self::new(key, name, Direction::Cost, weight)
    }
}

/// A candidate with one raw value per criterion key.
///
/// Serializes flat, e.g. `{"name": "Silver", "H": 350, "C": 2}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub name: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl Alternative {
    pub fn new<I, K>(name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            name: name.to_string(),
            values: values
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        }
    }

    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }
}

/// Ordered list of alternatives sharing the same criterion keys.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionMatrix {
    alternatives: Vec<Alternative>,
}

impl DecisionMatrix {
    pub fn new(alternatives: Vec<Alternative>) -> Self {
        Self { alternatives }
    }

    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Alternative> {
        self.alternatives.iter()
    }
}

impl From<Vec<Alternative>> for DecisionMatrix {
    fn from(alternatives: Vec<Alternative>) -> Self {
        Self::new(alternatives)
    }
}

/// Criteria table plus the matrix it describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionProblem {
    pub criteria: Vec<Criterion>,
    pub alternatives: DecisionMatrix,
}

impl DecisionProblem {
    pub fn new(criteria: Vec<Criterion>, alternatives: DecisionMatrix) -> Self {
        Self {
            criteria,
            alternatives,
        }
    }

    pub fn criterion(&self, key: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|criterion| criterion.key == key)
    }

    pub fn total_weight(&self) -> f64 {
        self.criteria.iter().map(|criterion| criterion.weight).sum()
    }
}

/// One alternative after normalization; every value is "higher is better".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub name: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl NormalizedRow {
    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }
}

/// Scores for one alternative at a given λ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub name: String,
    /// Weighted sum model aggregate.
    pub q1: f64,
    /// Weighted product model aggregate.
    pub q2: f64,
    /// Blended score used for ranking.
    pub q: f64,
    pub rank: usize,
}

/// Blend parameter between the weighted product (0) and weighted sum (1) models.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Lambda(f64);

impl Lambda {
    pub const DEFAULT: Lambda = Lambda(0.5);

    /// Values outside `[0, 1]` are rejected rather than clamped.
    pub fn new(value: f64) -> Result<Self, AnalysisError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AnalysisError::InvalidParameter(ParameterIssue::LambdaOutOfRange {
                value,
            }))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn blend(self, q1: f64, q2: f64) -> f64 {
        self.0 * q1 + (1.0 - self.0) * q2
    }
}

impl Default for Lambda {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Lambda {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        Lambda::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Failures raised while normalizing, scoring, or sweeping a decision problem.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("invalid input: {0}")]
    InvalidInput(InputIssue),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(ConfigurationIssue),
    #[error("invalid parameter: {0}")]
    InvalidParameter(ParameterIssue),
}

impl AnalysisError {
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::InvalidInput(_) => "invalid_input",
            AnalysisError::InvalidConfiguration(_) => "invalid_configuration",
            AnalysisError::InvalidParameter(_) => "invalid_parameter",
        }
    }
}

/// Raw value outside the model domain.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputIssue {
    #[error("alternative '{alternative}' has non-positive value {value} for criterion '{criterion}'")]
    NonPositiveValue {
        alternative: String,
        criterion: String,
        value: f64,
    },
    #[error("alternative '{alternative}' has non-finite value for criterion '{criterion}'")]
    NonFiniteValue {
        alternative: String,
        criterion: String,
    },
}

/// Criteria table and matrix disagree, or the table itself is unusable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationIssue {
    #[error("at least one criterion is required")]
    NoCriteria,
    #[error("at least one alternative is required")]
    NoAlternatives,
    #[error("criterion key '{0}' is declared more than once")]
    DuplicateCriterion(String),
    #[error("alternative '{0}' is declared more than once")]
    DuplicateAlternative(String),
    #[error("criterion '{key}' has invalid weight {weight}; weights must be finite and non-negative")]
    InvalidWeight { key: String, weight: f64 },
    #[error("alternative '{alternative}' is missing a value for criterion '{criterion}'")]
    MissingValue {
        alternative: String,
        criterion: String,
    },
}

/// Caller-supplied tuning parameter outside its domain.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterIssue {
    #[error("lambda {value} must lie within [0, 1]")]
    LambdaOutOfRange { value: f64 },
    #[error("sweep requires at least one division")]
    ZeroDivisions,
    #[error("sweep of {requested} divisions exceeds the limit of {max}")]
    TooManyDivisions { requested: usize, max: usize },
    #[error("sweep of {requested} lambda values exceeds the limit of {max}")]
    TooManyLambdas { requested: usize, max: usize },
}

impl From<InputIssue> for AnalysisError {
    fn from(issue: InputIssue) -> Self {
        Self::InvalidInput(issue)
    }
}

impl From<ConfigurationIssue> for AnalysisError {
    fn from(issue: ConfigurationIssue) -> Self {
        Self::InvalidConfiguration(issue)
    }
}

impl From<ParameterIssue> for AnalysisError {
    fn from(issue: ParameterIssue) -> Self {
        Self::InvalidParameter(issue)
    }
}
