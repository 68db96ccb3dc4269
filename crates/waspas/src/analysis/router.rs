use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::cache::{MatrixFingerprint, NormalizedMatrixStore};
use super::domain::{AnalysisError, DecisionProblem, Lambda, NormalizedRow, ScoredResult};
use super::normalizer::ColumnLimits;
use super::service::AnalysisService;
use super::sweep::{ScoreRange, SweepPoint, DEFAULT_AXIS_PADDING};

/// Body shared by the analysis endpoints; an omitted problem means the reference dataset.
#[derive(Debug, Default, Deserialize)]
pub struct ProblemRequest {
    #[serde(default)]
    pub problem: Option<DecisionProblem>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub problem: Option<DecisionProblem>,
    #[serde(default)]
    pub lambda: Option<Lambda>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SweepRequest {
    #[serde(default)]
    pub problem: Option<DecisionProblem>,
    #[serde(default)]
    pub divisions: Option<usize>,
    #[serde(default)]
    pub lambdas: Option<Vec<f64>>,
}

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub fingerprint: MatrixFingerprint,
    pub limits: Vec<ColumnLimits>,
    pub normalized: Vec<NormalizedRow>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub lambda: Lambda,
    pub results: Vec<ScoredResult>,
}

#[derive(Debug, Serialize)]
pub struct SweepResponse {
    pub points: Vec<SweepPoint>,
    pub score_range: Option<ScoreRange>,
    pub axis_bounds: Option<ScoreRange>,
    pub rank_stable: bool,
}

/// Router builder exposing the normalization, scoring, sweep, and report endpoints.
pub fn analysis_router<S>(service: Arc<AnalysisService<S>>) -> Router
where
    S: NormalizedMatrixStore + 'static,
{
    Router::new()
        .route("/api/v1/waspas/reference", get(reference_handler))
        .route("/api/v1/waspas/normalize", post(normalize_handler::<S>))
        .route("/api/v1/waspas/score", post(score_handler::<S>))
        .route("/api/v1/waspas/sweep", post(sweep_handler::<S>))
        .route("/api/v1/waspas/report", post(report_handler::<S>))
        .with_state(service)
}

pub(crate) async fn reference_handler() -> Json<DecisionProblem> {
    Json(DecisionProblem::electroplating())
}

pub(crate) async fn normalize_handler<S>(
    State(service): State<Arc<AnalysisService<S>>>,
    Json(request): Json<ProblemRequest>,
) -> Response
where
    S: NormalizedMatrixStore + 'static,
{
    let problem = request
        .problem
        .unwrap_or_else(DecisionProblem::electroplating);

    let outcome = service.limits(&problem).and_then(|limits| {
        let normalized = service.normalize(&problem)?;
        Ok(NormalizeResponse {
            fingerprint: MatrixFingerprint::of(&problem.alternatives, &problem.criteria),
            limits,
            normalized: normalized.as_ref().clone(),
        })
    });

    match outcome {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(error) => analysis_error_response(&error),
    }
}

pub(crate) async fn score_handler<S>(
    State(service): State<Arc<AnalysisService<S>>>,
    Json(request): Json<ScoreRequest>,
) -> Response
where
    S: NormalizedMatrixStore + 'static,
{
    let problem = request
        .problem
        .unwrap_or_else(DecisionProblem::electroplating);
    let lambda = request
        .lambda
        .unwrap_or(service.settings().default_lambda);

    match service.score(&problem, Some(lambda)) {
        Ok(results) => (StatusCode::OK, Json(ScoreResponse { lambda, results })).into_response(),
        Err(error) => analysis_error_response(&error),
    }
}

pub(crate) async fn sweep_handler<S>(
    State(service): State<Arc<AnalysisService<S>>>,
    Json(request): Json<SweepRequest>,
) -> Response
where
    S: NormalizedMatrixStore + 'static,
{
    let problem = request
        .problem
        .unwrap_or_else(DecisionProblem::electroplating);

    match service.sweep(&problem, request.lambdas.as_deref(), request.divisions) {
        Ok(sweep) => {
            let body = SweepResponse {
                score_range: sweep.score_range,
                axis_bounds: sweep.axis_bounds(DEFAULT_AXIS_PADDING),
                rank_stable: sweep.is_rank_stable(),
                points: sweep.points,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => analysis_error_response(&error),
    }
}

pub(crate) async fn report_handler<S>(
    State(service): State<Arc<AnalysisService<S>>>,
    Json(request): Json<ScoreRequest>,
) -> Response
where
    S: NormalizedMatrixStore + 'static,
{
    let problem = request
        .problem
        .unwrap_or_else(DecisionProblem::electroplating);

    match service.report(&problem, request.lambda) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => analysis_error_response(&error),
    }
}

fn analysis_error_response(error: &AnalysisError) -> Response {
    let payload = json!({
        "error": error.to_string(),
        "kind": error.kind(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}
