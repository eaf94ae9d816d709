use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::shared::{AppError, AppState};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub active_rooms: usize,
}

/// HTTP handler for the health check
///
/// GET /health
/// `active_rooms` reports the total registry size, closed rooms included.
#[instrument(name = "health", skip(state))]
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let active_rooms = state.room_repository.room_count().await?;

    Ok(Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now(),
        active_rooms,
    }))
}
