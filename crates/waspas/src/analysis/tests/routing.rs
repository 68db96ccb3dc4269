use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Json;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::analysis::router::{score_handler, sweep_handler, ScoreRequest, SweepRequest};
use crate::analysis::{analysis_router, InMemoryNormalizedStore, NormalizedMatrixStore};

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}

fn post(uri: &str, payload: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn score_handler_defaults_to_reference_problem() {
    let (service, _) = service();

    let response = score_handler::<InMemoryNormalizedStore>(
        State(service),
        Json(ScoreRequest::default()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["lambda"], json!(0.5));
    assert_eq!(body["results"][0]["name"], "Chromium");
    assert_eq!(body["results"][0]["rank"], 1);
    assert_eq!(body["results"].as_array().map(Vec::len), Some(7));
}

#[tokio::test]
async fn sweep_handler_reports_axis_and_stability() {
    let (service, _) = service();

    let response = sweep_handler::<InMemoryNormalizedStore>(
        State(service),
        Json(SweepRequest::default()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["points"].as_array().map(Vec::len), Some(11));
    assert_eq!(body["rank_stable"], json!(false));
    let axis_min = body["axis_bounds"]["min"].as_f64().expect("axis min");
    let observed_min = body["score_range"]["min"].as_f64().expect("observed min");
    assert!(axis_min < observed_min);
}

#[tokio::test]
async fn score_route_accepts_custom_problems() {
    let (service, _) = service();
    let router = analysis_router(service);

    let payload = json!({
        "lambda": 1.0,
        "problem": {
            "criteria": [
                { "key": "q", "name": "Quality", "direction": "benefit", "weight": 0.7 },
                { "key": "p", "name": "Price", "direction": "cost", "weight": 0.3 }
            ],
            "alternatives": [
                { "name": "budget", "q": 2.0, "p": 10.0 },
                { "name": "premium", "q": 8.0, "p": 40.0 }
            ]
        }
    });

    let response = router
        .oneshot(post("/api/v1/waspas/score", payload))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["results"][0]["name"], "premium");
    assert_eq!(body["results"][1]["name"], "budget");
}

#[tokio::test]
async fn analysis_errors_return_unprocessable_entity() {
    let (service, _) = service();
    let router = analysis_router(service);

    let payload = json!({
        "problem": {
            "criteria": [
                { "key": "p", "name": "Price", "direction": "cost", "weight": 1.0 }
            ],
            "alternatives": [
                { "name": "free", "p": 0.0 },
                { "name": "paid", "p": 4.0 }
            ]
        }
    });

    let response = router
        .oneshot(post("/api/v1/waspas/normalize", payload))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["kind"], "invalid_input");
    assert!(body["error"].as_str().expect("message").contains("free"));
}

#[tokio::test]
async fn out_of_range_lambda_is_rejected_by_extractor() {
    let (service, _) = service();
    let router = analysis_router(service);

    let response = router
        .oneshot(post("/api/v1/waspas/score", json!({ "lambda": 2.0 })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn normalize_route_exposes_limits_and_fingerprint() {
    let (service, store) = service();
    let router = analysis_router(service);

    let response = router
        .oneshot(post("/api/v1/waspas/normalize", json!({})))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["fingerprint"].as_str().map(str::len), Some(64));
    assert_eq!(body["limits"][4]["key"], "C");
    assert_eq!(body["limits"][4]["min"], json!(1.0));
    assert_eq!(body["normalized"][5]["name"], "Chromium");
    assert_eq!(body["normalized"][5]["H"], json!(1.0));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn reference_and_report_routes_respond() {
    let (service, _) = service();
    let router = analysis_router(service);

    let response = router
        .clone()
        .oneshot(
            Request::get("/api/v1/waspas/reference")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["criteria"][4]["direction"], "cost");
    assert_eq!(body["alternatives"][0]["name"], "Silver");
    assert_eq!(body["alternatives"][0]["H"], json!(350.0));

    let response = router
        .oneshot(post("/api/v1/waspas/report", json!({ "lambda": 0.0 })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ranking"][0]["name"], "Platinum");
    assert_eq!(body["breakdown"][0]["contributions"][0]["key"], "H");
}

#[tokio::test]
async fn oversized_sweep_request_is_unprocessable() {
    let (service, _) = service();
    let router = analysis_router(service);

    let response = router
        .oneshot(post(
            "/api/v1/waspas/sweep",
            json!({ "divisions": 18_446_744_073_709_551_615u64 }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["kind"], "invalid_parameter");
}
