use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/ping", get(ping))
}

/// Round-trips to the store and reports its clock.
#[instrument(skip(state))]
pub async fn ping(State(state): State<AppState>) -> Result<Json<PingResponse>, ApiError> {
    let time = state
        .users
        .now()
        .await
        .map_err(|e| ApiError::store("Database error", e))?;
    Ok(Json(PingResponse { status: "ok", time }))
}
