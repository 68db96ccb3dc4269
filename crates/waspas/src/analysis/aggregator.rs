use serde::{Deserialize, Serialize};

use super::domain::{
    AnalysisError, ConfigurationIssue, Criterion, InputIssue, Lambda, NormalizedRow, ScoredResult,
};
use super::normalizer::validate_criteria;

/// Per-criterion share of an alternative's WSM and WPM aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionContribution {
    pub key: String,
    pub normalized: f64,
    pub weight: f64,
    /// `normalized * weight`
    pub wsm: f64,
    /// `normalized ^ weight`
    pub wpm: f64,
}

/// Break a normalized row down into its weighted terms, in declared criterion order.
///
/// Normalized values must be finite and strictly positive, as [`normalize`] produces them.
///
/// [`normalize`]: super::normalizer::normalize
pub fn contributions(
    row: &NormalizedRow,
    criteria: &[Criterion],
) -> Result<Vec<CriterionContribution>, AnalysisError> {
    criteria
        .iter()
        .map(|criterion| {
            let normalized =
                row.value(&criterion.key)
                    .ok_or_else(|| ConfigurationIssue::MissingValue {
                        alternative: row.name.clone(),
                        criterion: criterion.key.clone(),
                    })?;

            if !normalized.is_finite() {
                return Err(InputIssue::NonFiniteValue {
                    alternative: row.name.clone(),
                    criterion: criterion.key.clone(),
                }
                .into());
            }
            if normalized <= 0.0 {
                return Err(InputIssue::NonPositiveValue {
                    alternative: row.name.clone(),
                    criterion: criterion.key.clone(),
                    value: normalized,
                }
                .into());
            }

            Ok(CriterionContribution {
                key: criterion.key.clone(),
                normalized,
                weight: criterion.weight,
                wsm: normalized * criterion.weight,
                wpm: normalized.powf(criterion.weight),
            })
        })
        .collect()
}

/// Weighted sum (Q1) and weighted product (Q2) for one row.
pub fn aggregate(row: &NormalizedRow, criteria: &[Criterion]) -> Result<(f64, f64), AnalysisError> {
    let terms = contributions(row, criteria)?;
    let q1 = terms.iter().fold(0.0, |sum, term| sum + term.wsm);
    let q2 = terms.iter().fold(1.0, |product, term| product * term.wpm);
    Ok((q1, q2))
}

/// Score every row at `lambda` and rank by the blended score, best first.
///
/// The sort is stable, so alternatives with identical scores keep their input order.
pub fn score(
    normalized: &[NormalizedRow],
    criteria: &[Criterion],
    lambda: f64,
) -> Result<Vec<ScoredResult>, AnalysisError> {
    let lambda = Lambda::new(lambda)?;
    score_with(normalized, criteria, lambda)
}

pub(crate) fn score_with(
    normalized: &[NormalizedRow],
    criteria: &[Criterion],
    lambda: Lambda,
) -> Result<Vec<ScoredResult>, AnalysisError> {
    validate_criteria(criteria)?;

    let mut results = normalized
        .iter()
        .map(|row| {
            let (q1, q2) = aggregate(row, criteria)?;
            Ok(ScoredResult {
                name: row.name.clone(),
                q1,
                q2,
                q: lambda.blend(q1, q2),
                rank: 0,
            })
        })
        .collect::<Result<Vec<_>, AnalysisError>>()?;

    results.sort_by(|a, b| b.q.total_cmp(&a.q));
    for (index, result) in results.iter_mut().enumerate() {
        result.rank = index + 1;
    }

    Ok(results)
}
