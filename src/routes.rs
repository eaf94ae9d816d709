use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{health, room, shared::AppState};

/// Assembles the full application router
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/api/rooms", post(room::create_room).get(room::list_rooms))
        .route(
            "/api/rooms/:room_id",
            get(room::get_room).delete(room::close_room),
        )
        .route("/api/rooms/:room_id/join", post(room::join_room))
        .route("/health", get(health::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
