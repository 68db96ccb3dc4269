use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use waspas::analysis::{DecisionProblem, Lambda, MatrixImporter, MAX_SWEEP_DIVISIONS};
use waspas::error::AppError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Where a CLI run got its decision problem from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProblemSource {
    Reference,
    Imported,
}

impl ProblemSource {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            ProblemSource::Reference => "Reference electroplating dataset",
            ProblemSource::Imported => "CSV import",
        }
    }
}

pub(crate) fn parse_lambda(raw: &str) -> Result<Lambda, String> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse '{raw}' as a number ({err})"))?;
    Lambda::new(value).map_err(|err| err.to_string())
}

pub(crate) fn parse_divisions(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err("divisions must be at least 1".to_string()),
        Ok(divisions) if divisions > MAX_SWEEP_DIVISIONS => Err(format!(
            "divisions must not exceed {MAX_SWEEP_DIVISIONS}"
        )),
        Ok(divisions) => Ok(divisions),
        Err(err) => Err(format!("failed to parse '{raw}' as a whole number ({err})")),
    }
}

/// Load the problem from CSV when a matrix is supplied; criteria default to the reference table.
pub(crate) fn load_problem(
    criteria_csv: Option<PathBuf>,
    matrix_csv: Option<PathBuf>,
) -> Result<(DecisionProblem, ProblemSource), AppError> {
    let reference = DecisionProblem::electroplating();

    match (criteria_csv, matrix_csv) {
        (None, None) => Ok((reference, ProblemSource::Reference)),
        (Some(criteria), Some(matrix)) => Ok((
            MatrixImporter::from_paths(criteria, matrix)?,
            ProblemSource::Imported,
        )),
        (None, Some(matrix)) => {
            let alternatives = MatrixImporter::matrix_from_path(matrix)?;
            Ok((
                DecisionProblem::new(reference.criteria, alternatives),
                ProblemSource::Imported,
            ))
        }
        (Some(criteria), None) => {
            let criteria = MatrixImporter::criteria_from_path(criteria)?;
            Ok((
                DecisionProblem::new(criteria, reference.alternatives),
                ProblemSource::Imported,
            ))
        }
    }
}
