use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::domain::{
    AnalysisError, ConfigurationIssue, Criterion, DecisionMatrix, Direction, InputIssue,
    NormalizedRow,
};

/// Column extremes observed across the alternatives currently in the matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnLimits {
    pub key: String,
    pub direction: Direction,
    pub max: f64,
    pub min: f64,
}

impl ColumnLimits {
    /// The raw value that normalizes to exactly `1.0`.
    pub fn optimum(&self) -> f64 {
        match self.direction {
            Direction::Benefit => self.max,
            Direction::Cost => self.min,
        }
    }

    fn normalize(&self, raw: f64) -> f64 {
        match self.direction {
            Direction::Benefit => raw / self.max,
            Direction::Cost => self.min / raw,
        }
    }
}

/// Convert raw values into dimensionless "higher is better" ratios.
///
/// Benefit columns divide by the column maximum, cost columns divide the column minimum by
/// the raw value, so the column optimum always lands on `1.0`.
pub fn normalize(
    matrix: &DecisionMatrix,
    criteria: &[Criterion],
) -> Result<Vec<NormalizedRow>, AnalysisError> {
    let limits = column_limits(matrix, criteria)?;

    matrix
        .iter()
        .map(|alternative| {
            let values = limits
                .iter()
                .map(|limit| {
                    let raw = alternative.value(&limit.key).ok_or_else(|| {
                        ConfigurationIssue::MissingValue {
                            alternative: alternative.name.clone(),
                            criterion: limit.key.clone(),
                        }
                    })?;
                    Ok((limit.key.clone(), limit.normalize(raw)))
                })
                .collect::<Result<BTreeMap<_, _>, AnalysisError>>()?;

            Ok(NormalizedRow {
                name: alternative.name.clone(),
                values,
            })
        })
        .collect()
}

/// Validate the matrix against the criteria table and compute per-column max/min.
pub fn column_limits(
    matrix: &DecisionMatrix,
    criteria: &[Criterion],
) -> Result<Vec<ColumnLimits>, AnalysisError> {
    validate_criteria(criteria)?;
    validate_matrix(matrix, criteria)?;

    let limits = criteria
        .iter()
        .map(|criterion| {
            let mut max = f64::NEG_INFINITY;
            let mut min = f64::INFINITY;
            for alternative in matrix.iter() {
                if let Some(value) = alternative.value(&criterion.key) {
                    max = max.max(value);
                    min = min.min(value);
                }
            }

            ColumnLimits {
                key: criterion.key.clone(),
                direction: criterion.direction,
                max,
                min,
            }
        })
        .collect();

    Ok(limits)
}

pub(crate) fn validate_criteria(criteria: &[Criterion]) -> Result<(), AnalysisError> {
    if criteria.is_empty() {
        return Err(ConfigurationIssue::NoCriteria.into());
    }

    let mut seen = HashSet::new();
    for criterion in criteria {
        if !seen.insert(criterion.key.as_str()) {
            return Err(ConfigurationIssue::DuplicateCriterion(criterion.key.clone()).into());
        }
        if !criterion.weight.is_finite() || criterion.weight < 0.0 {
            return Err(ConfigurationIssue::InvalidWeight {
                key: criterion.key.clone(),
                weight: criterion.weight,
            }
            .into());
        }
    }

    Ok(())
}

fn validate_matrix(matrix: &DecisionMatrix, criteria: &[Criterion]) -> Result<(), AnalysisError> {
    if matrix.is_empty() {
        return Err(ConfigurationIssue::NoAlternatives.into());
    }

    let mut names = HashSet::new();
    for alternative in matrix.iter() {
        if !names.insert(alternative.name.as_str()) {
            return Err(ConfigurationIssue::DuplicateAlternative(alternative.name.clone()).into());
        }

        for criterion in criteria {
            let value = alternative.value(&criterion.key).ok_or_else(|| {
                ConfigurationIssue::MissingValue {
                    alternative: alternative.name.clone(),
                    criterion: criterion.key.clone(),
                }
            })?;

            if !value.is_finite() {
                return Err(InputIssue::NonFiniteValue {
                    alternative: alternative.name.clone(),
                    criterion: criterion.key.clone(),
                }
                .into());
            }
            if value <= 0.0 {
                return Err(InputIssue::NonPositiveValue {
                    alternative: alternative.name.clone(),
                    criterion: criterion.key.clone(),
                    value,
                }
                .into());
            }
        }
    }

    Ok(())
}
