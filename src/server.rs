use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::charts::ChartSet;
use crate::model::ModelState;
use crate::report::EstimateReport;
use crate::types::RideInput;

type ApiError = (StatusCode, Json<serde_json::Value>);

// ---------- Server state ----------

#[derive(Clone)]
pub struct AppState {
    pub model: Arc<ModelState>,
}

fn unprocessable(message: String) -> ApiError {
    tracing::info!("rejected ride: {}", message);
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": message })),
    )
}

/// Bodies that do not parse get the same 422 `{error}` shape as
/// out-of-range values.
fn accept_ride(body: Result<Json<RideInput>, JsonRejection>) -> Result<RideInput, ApiError> {
    let Json(ride) = body.map_err(|rejection| unprocessable(rejection.body_text()))?;
    ride.validate().map_err(|e| unprocessable(e.to_string()))?;
    Ok(ride)
}

// ---------- Handlers ----------

pub async fn estimate(
    State(state): State<AppState>,
    body: Result<Json<RideInput>, JsonRejection>,
) -> Result<Json<EstimateReport>, ApiError> {
    let ride = accept_ride(body)?;
    let report = EstimateReport::build(&state.model, &ride);
    tracing::info!(
        "estimate distance={:.1}mi duration={}min total={:.2} source={:?}",
        ride.trip_distance,
        ride.trip_duration,
        report.total,
        report.source
    );
    Ok(Json(report))
}

pub async fn charts(
    body: Result<Json<RideInput>, JsonRejection>,
) -> Result<Json<ChartSet>, ApiError> {
    let ride = accept_ride(body)?;
    Ok(Json(ChartSet::for_ride(&ride)))
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "model_loaded": state.model.is_loaded() }))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/estimate", post(estimate))
        .route("/charts", post(charts))
        .route("/health", get(health))
        .with_state(state)
}

pub async fn serve(bind_addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
