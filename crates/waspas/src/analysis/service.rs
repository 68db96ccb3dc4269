use std::sync::Arc;

use tracing::debug;

use super::aggregator::score_with;
use super::cache::{MatrixFingerprint, NormalizedMatrixStore};
use super::domain::{AnalysisError, DecisionProblem, Lambda, NormalizedRow, ScoredResult};
use super::normalizer::{column_limits, normalize, ColumnLimits};
use super::report::WaspasReport;
use super::settings::AnalysisSettings;
use super::sweep::{lambda_steps, sweep, SensitivitySweep};

/// Service composing the normalization cache with the scoring and sweep functions.
///
/// Normalized rows are cached per matrix fingerprint; scores are recomputed on every call.
pub struct AnalysisService<S> {
    store: Arc<S>,
    settings: AnalysisSettings,
}

impl<S> AnalysisService<S>
where
    S: NormalizedMatrixStore + 'static,
{
    pub fn new(store: Arc<S>, settings: AnalysisSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> AnalysisSettings {
        self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Normalized rows for the problem, computed at most once per matrix content.
    pub fn normalize(
        &self,
        problem: &DecisionProblem,
    ) -> Result<Arc<Vec<NormalizedRow>>, AnalysisError> {
        let fingerprint = MatrixFingerprint::of(&problem.alternatives, &problem.criteria);

        if let Some(rows) = self.store.fetch(&fingerprint) {
            debug!(%fingerprint, "normalized matrix cache hit");
            return Ok(rows);
        }

        let rows = Arc::new(normalize(&problem.alternatives, &problem.criteria)?);
        debug!(
            %fingerprint,
            alternatives = rows.len(),
            criteria = problem.criteria.len(),
            "normalized matrix cached"
        );
        self.store.insert(fingerprint, rows.clone());
        Ok(rows)
    }

    pub fn limits(&self, problem: &DecisionProblem) -> Result<Vec<ColumnLimits>, AnalysisError> {
        column_limits(&problem.alternatives, &problem.criteria)
    }

    /// Ranked results at `lambda`, or at the configured default when `None`.
    pub fn score(
        &self,
        problem: &DecisionProblem,
        lambda: Option<Lambda>,
    ) -> Result<Vec<ScoredResult>, AnalysisError> {
        let lambda = lambda.unwrap_or(self.settings.default_lambda);
        let normalized = self.normalize(problem)?;
        let results = score_with(&normalized, &problem.criteria, lambda)?;

        if let Some(leader) = results.first() {
            debug!(%lambda, leader = %leader.name, q = leader.q, "scored decision problem");
        }
        Ok(results)
    }

    /// Sweep over explicit λ values, or an even grid of `divisions` (default from settings).
    pub fn sweep(
        &self,
        problem: &DecisionProblem,
        lambdas: Option<&[f64]>,
        divisions: Option<usize>,
    ) -> Result<SensitivitySweep, AnalysisError> {
        let normalized = self.normalize(problem)?;

        let result = match lambdas {
            Some(lambdas) => sweep(&normalized, &problem.criteria, lambdas)?,
            None => {
                let steps =
                    lambda_steps(divisions.unwrap_or(self.settings.sweep_divisions))?;
                sweep(&normalized, &problem.criteria, &steps)?
            }
        };

        debug!(
            points = result.points.len(),
            stable = result.is_rank_stable(),
            "sensitivity sweep complete"
        );
        Ok(result)
    }

    pub fn report(
        &self,
        problem: &DecisionProblem,
        lambda: Option<Lambda>,
    ) -> Result<WaspasReport, AnalysisError> {
        let lambda = lambda.unwrap_or(self.settings.default_lambda);
        let limits = self.limits(problem)?;
        let normalized = self.normalize(problem)?;
        let ranking = score_with(&normalized, &problem.criteria, lambda)?;

        WaspasReport::build(
            lambda,
            &problem.criteria,
            limits,
            normalized.as_ref().clone(),
            ranking,
        )
    }
}
