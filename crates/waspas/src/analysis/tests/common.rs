use std::sync::Arc;

use crate::analysis::domain::{
    Alternative, Criterion, DecisionMatrix, DecisionProblem, NormalizedRow,
};
use crate::analysis::{
    normalize, AnalysisService, AnalysisSettings, InMemoryNormalizedStore, ScoredResult,
};

pub(super) const TOLERANCE: f64 = 1e-12;

pub(super) fn reference() -> DecisionProblem {
    DecisionProblem::electroplating()
}

pub(super) fn reference_normalized() -> Vec<NormalizedRow> {
    let problem = reference();
    normalize(&problem.alternatives, &problem.criteria).expect("reference normalizes")
}

/// Two benefit columns and one cost column with hand-checkable ratios.
pub(super) fn small_problem() -> DecisionProblem {
    let criteria = vec![
        Criterion::benefit("quality", "Quality", 0.5),
        Criterion::benefit("speed", "Speed", 0.2),
        Criterion::cost("price", "Price", 0.3),
    ];
    let alternatives = DecisionMatrix::new(vec![
        Alternative::new("alpha", [("quality", 8.0), ("speed", 4.0), ("price", 20.0)]),
        Alternative::new("beta", [("quality", 4.0), ("speed", 8.0), ("price", 10.0)]),
        Alternative::new("gamma", [("quality", 2.0), ("speed", 2.0), ("price", 40.0)]),
    ]);
    DecisionProblem::new(criteria, alternatives)
}

pub(super) fn service() -> (
    Arc<AnalysisService<InMemoryNormalizedStore>>,
    Arc<InMemoryNormalizedStore>,
) {
    let store = Arc::new(InMemoryNormalizedStore::new());
    let service = Arc::new(AnalysisService::new(
        store.clone(),
        AnalysisSettings::default(),
    ));
    (service, store)
}

pub(super) fn names(results: &[ScoredResult]) -> Vec<&str> {
    results.iter().map(|result| result.name.as_str()).collect()
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= TOLERANCE,
        "expected {expected}, got {actual}"
    );
}
