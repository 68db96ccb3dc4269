//! WASPAS ranking: normalization, weighted sum/product aggregation, λ blending, and
//! sensitivity sweeps over the blend parameter.
//!
//! The free functions in [`normalizer`], [`aggregator`] and [`sweep`] are pure and reentrant.
//! [`AnalysisService`] layers a normalization cache on top so that repeated λ changes against
//! the same matrix reuse the normalized rows while scores are always recomputed.

pub mod aggregator;
pub mod cache;
mod dataset;
pub mod domain;
pub mod import;
pub mod normalizer;
pub mod report;
pub mod router;
pub mod service;
mod settings;
pub mod sweep;

#[cfg(test)]
mod tests;

pub use aggregator::{aggregate, contributions, score, CriterionContribution};
pub use cache::{
    InMemoryNormalizedStore, MatrixFingerprint, NormalizedMatrixStore, DEFAULT_CACHE_CAPACITY,
};
pub use domain::{
    Alternative, AnalysisError, ConfigurationIssue, Criterion, DecisionMatrix, DecisionProblem,
    Direction, InputIssue, Lambda, NormalizedRow, ParameterIssue, ScoredResult,
};
pub use import::{MatrixImportError, MatrixImporter};
pub use normalizer::{column_limits, normalize, ColumnLimits};
pub use report::{AlternativeBreakdown, WaspasReport};
pub use router::analysis_router;
pub use service::AnalysisService;
pub use settings::AnalysisSettings;
pub use sweep::{
    lambda_steps, sweep, ScoreRange, SensitivitySweep, SweepPoint, DEFAULT_AXIS_PADDING,
    MAX_SWEEP_DIVISIONS,
};
