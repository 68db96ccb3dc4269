use serde::Serialize;

use super::aggregator::{contributions, CriterionContribution};
use super::domain::{AnalysisError, Criterion, Lambda, NormalizedRow, ScoredResult};
use super::normalizer::ColumnLimits;

/// Full walk-through of one analysis: limits, normalized rows, per-criterion terms, ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaspasReport {
    pub lambda: Lambda,
    pub criteria: Vec<Criterion>,
    pub limits: Vec<ColumnLimits>,
    pub normalized: Vec<NormalizedRow>,
    pub breakdown: Vec<AlternativeBreakdown>,
    pub ranking: Vec<ScoredResult>,
}

/// Weighted terms for one alternative, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternativeBreakdown {
    pub name: String,
    pub contributions: Vec<CriterionContribution>,
}

impl WaspasReport {
    pub(crate) fn build(
        lambda: Lambda,
        criteria: &[Criterion],
        limits: Vec<ColumnLimits>,
        normalized: Vec<NormalizedRow>,
        ranking: Vec<ScoredResult>,
    ) -> Result<Self, AnalysisError> {
        let breakdown = normalized
            .iter()
            .map(|row| {
                Ok(AlternativeBreakdown {
                    name: row.name.clone(),
                    contributions: contributions(row, criteria)?,
                })
            })
            .collect::<Result<Vec<_>, AnalysisError>>()?;

        Ok(Self {
            lambda,
            criteria: criteria.to_vec(),
            limits,
            normalized,
            breakdown,
            ranking,
        })
    }

    pub fn leader(&self) -> Option<&ScoredResult> {
        self.ranking.first()
    }

    pub fn result_for(&self, name: &str) -> Option<&ScoredResult> {
        self.ranking.iter().find(|result| result.name == name)
    }
}
