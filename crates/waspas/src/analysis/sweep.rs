use serde::{Deserialize, Serialize};

use super::aggregator::score_with;
use super::domain::{AnalysisError, Criterion, Lambda, NormalizedRow, ParameterIssue, ScoredResult};

/// Padding applied around the observed score range when sizing a chart axis.
pub const DEFAULT_AXIS_PADDING: f64 = 0.05;

/// Finest λ grid a sweep will build; explicit λ lists are capped at `MAX_SWEEP_DIVISIONS + 1`.
pub const MAX_SWEEP_DIVISIONS: usize = 10_000;

/// Evenly spaced λ values from 0 to 1 inclusive, `divisions + 1` points.
///
/// Each point is computed as `i / divisions` so 0.1 steps do not accumulate drift.
pub fn lambda_steps(divisions: usize) -> Result<Vec<f64>, AnalysisError> {
    if divisions == 0 {
        return Err(ParameterIssue::ZeroDivisions.into());
    }
    if divisions > MAX_SWEEP_DIVISIONS {
        return Err(ParameterIssue::TooManyDivisions {
            requested: divisions,
            max: MAX_SWEEP_DIVISIONS,
        }
        .into());
    }

    let total = divisions as f64;
    Ok((0..=divisions).map(|step| step as f64 / total).collect())
}

/// Ranked results for a single λ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub lambda: f64,
    pub results: Vec<ScoredResult>,
}

impl SweepPoint {
    pub fn leader(&self) -> Option<&ScoredResult> {
        self.results.first()
    }

    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.results
            .iter()
            .find(|result| result.name == name)
            .map(|result| result.rank)
    }
}

/// Smallest and largest blended score seen anywhere in a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl ScoreRange {
    fn include(range: Option<Self>, value: f64) -> Self {
        match range {
            Some(range) => Self {
                min: range.min.min(value),
                max: range.max.max(value),
            },
            None => Self {
                min: value,
                max: value,
            },
        }
    }
}

/// Ranking family across a set of λ values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivitySweep {
    pub points: Vec<SweepPoint>,
    pub score_range: Option<ScoreRange>,
}

impl SensitivitySweep {
    pub fn point(&self, lambda: f64) -> Option<&SweepPoint> {
        self.points
            .iter()
            .find(|point| (point.lambda - lambda).abs() <= f64::EPSILON)
    }

    /// Display range around the observed scores; the lower edge never drops below zero.
    pub fn axis_bounds(&self, padding: f64) -> Option<ScoreRange> {
        self.score_range.map(|range| ScoreRange {
            min: (range.min - padding).max(0.0),
            max: range.max + padding,
        })
    }

    /// `(λ, rank)` pairs for one alternative, in sweep order.
    pub fn rank_trajectory(&self, name: &str) -> Vec<(f64, usize)> {
        self.points
            .iter()
            .filter_map(|point| point.rank_of(name).map(|rank| (point.lambda, rank)))
            .collect()
    }

    /// Top-ranked alternative at every λ.
    pub fn leaders(&self) -> Vec<(f64, &str)> {
        self.points
            .iter()
            .filter_map(|point| {
                point
                    .leader()
                    .map(|leader| (point.lambda, leader.name.as_str()))
            })
            .collect()
    }

    /// True when every point produces the same ordering of alternatives.
    pub fn is_rank_stable(&self) -> bool {
        let mut orderings = self
            .points
            .iter()
            .map(|point| point.results.iter().map(|result| result.name.as_str()));

        match orderings.next() {
            Some(first) => {
                let first = first.collect::<Vec<_>>();
                orderings.all(|ordering| ordering.eq(first.iter().copied()))
            }
            None => true,
        }
    }
}

/// Run the aggregator once per λ, reusing the same normalized rows.
pub fn sweep(
    normalized: &[NormalizedRow],
    criteria: &[Criterion],
    lambdas: &[f64],
) -> Result<SensitivitySweep, AnalysisError> {
    if lambdas.len() > MAX_SWEEP_DIVISIONS + 1 {
        return Err(ParameterIssue::TooManyLambdas {
            requested: lambdas.len(),
            max: MAX_SWEEP_DIVISIONS + 1,
        }
        .into());
    }

    let lambdas = lambdas
        .iter()
        .map(|value| Lambda::new(*value))
        .collect::<Result<Vec<_>, _>>()?;

    let mut points = Vec::with_capacity(lambdas.len());
    let mut score_range = None;

    for lambda in lambdas {
        let results = score_with(normalized, criteria, lambda)?;
        for result in &results {
            score_range = Some(ScoreRange::include(score_range, result.q));
        }
        points.push(SweepPoint {
            lambda: lambda.value(),
            results,
        });
    }

    Ok(SensitivitySweep {
        points,
        score_range,
    })
}
