use axum::{
    Router,
    routing::{get, patch},
    extract::{Path, Request, State, Json},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use crate::api::error::ApiError;
use crate::ledger::accounts::UserPoint;
use crate::ledger::history::PointHistory;
use crate::ledger::service::InMemoryPointService;
use crate::observability::metrics::gather_metrics;
use crate::observability::tracing::trace_request;
use crate::types::ids::UserId;
use crate::types::point::Points;

pub struct ApiState {
    pub point_service: Arc<InMemoryPointService>,
}

impl ApiState {
    pub fn new(point_service: InMemoryPointService) -> Self {
        ApiState {
            point_service: Arc::new(point_service),
        }
    }
}

pub fn create_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/point/:id", get(get_point))
        .route("/point/:id/histories", get(get_histories))
        .route("/point/:id/charge", patch(charge))
        .route("/point/:id/use", patch(use_points))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            trace_request(request.method(), request.uri().path())
        }))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn metrics() -> Result<String, ApiError> {
    gather_metrics().map_err(ApiError::from)
}

async fn get_point(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<u64>,
) -> Json<UserPoint> {
    Json(state.point_service.get_point(UserId(id)))
}

async fn get_histories(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<u64>,
) -> Json<Vec<PointHistory>> {
    Json(state.point_service.get_histories(UserId(id)))
}

async fn charge(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<u64>,
    Json(amount): Json<i64>,
) -> Result<Json<UserPoint>, ApiError> {
    tracing::info!(user_id = id, amount, "Charge requested");

    // The ledger blocks on the account lock; keep that off the async workers
    let service = Arc::clone(&state.point_service);
    let updated = tokio::task::spawn_blocking(move || {
        service.charge(UserId(id), Points::from_i64(amount))
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(updated))
}

async fn use_points(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<u64>,
    Json(amount): Json<i64>,
) -> Result<Json<UserPoint>, ApiError> {
    tracing::info!(user_id = id, amount, "Use requested");

    let service = Arc::clone(&state.point_service);
    let updated = tokio::task::spawn_blocking(move || {
        service.use_points(UserId(id), Points::from_i64(amount))
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(updated))
}
