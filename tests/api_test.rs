mod common;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use common::test_service;
use pointledger::api::{ApiState, create_router};
use pointledger::ledger::{PointHistory, TransactionType, UserPoint};
use pointledger::types::point::Points;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    create_router(Arc::new(ApiState::new(test_service())))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn patch(uri: &str, amount: i64) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(amount.to_string()))
        .unwrap()
}

fn json<T: DeserializeOwned>(body: &[u8]) -> T {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = send(&app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn test_point_of_unknown_user_is_zero() {
    let (status, body) = send(&app(), get("/point/42")).await;
    assert_eq!(status, StatusCode::OK);

    let point: UserPoint = json(&body);
    assert_eq!(point.point, Points::zero());

    let (_, body) = send(&app(), get("/point/42/histories")).await;
    assert!(json::<Vec<PointHistory>>(&body).is_empty());
}

#[tokio::test]
async fn test_charge_use_and_history_flow() {
    let app = app();

    let (status, body) = send(&app, patch("/point/1/charge", 1000)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json::<UserPoint>(&body).point, Points::from_i64(1000));

    let (status, body) = send(&app, patch("/point/1/use", 400)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json::<UserPoint>(&body).point, Points::from_i64(600));

    let (status, body) = send(&app, patch("/point/1/use", 1000)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let error: serde_json::Value = json(&body);
    assert_eq!(error["code"], "insufficient_balance");

    let (_, body) = send(&app, get("/point/1/histories")).await;
    let histories: Vec<PointHistory> = json(&body);
    let kinds: Vec<_> = histories.iter().map(|h| h.kind).collect();
    assert_eq!(kinds, vec![TransactionType::Charge, TransactionType::Use]);

    let raw: serde_json::Value = json(&body);
    assert_eq!(raw[0]["kind"], "CHARGE");
    assert_eq!(raw[1]["amount"], 400);
}

#[tokio::test]
async fn test_non_positive_amount_is_bad_request() {
    let app = app();

    let (status, body) = send(&app, patch("/point/1/charge", 0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: serde_json::Value = json(&body);
    assert_eq!(error["code"], "invalid_amount");

    let (status, _) = send(&app, patch("/point/1/use", -5)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, get("/point/1/histories")).await;
    assert!(json::<Vec<PointHistory>>(&body).is_empty());
}

#[tokio::test]
async fn test_concurrent_requests_serialize_per_account() {
    let app = app();

    let requests = (0..50).map(|_| {
        let app = app.clone();
        tokio::spawn(async move { send(&app, patch("/point/7/charge", 10)).await })
    });
    for handle in requests.collect::<Vec<_>>() {
        let (status, _) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&app, get("/point/7")).await;
    assert_eq!(json::<UserPoint>(&body).point, Points::from_i64(500));
}

#[tokio::test]
async fn test_metrics_endpoint_renders_text() {
    let (status, _) = send(&app(), get("/metrics")).await;
    assert_eq!(status, StatusCode::OK);
}
