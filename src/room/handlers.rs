use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::{join_url, RoomService},
    types::{
        CloseRoomResponse, JoinRoomRequest, JoinRoomResponse, ListRoomsResponse,
        RoomCreateRequest, RoomCreateResponse, RoomDetailsResponse, RoomRef,
    },
};
use crate::shared::{AppError, AppState};

fn room_service(state: &AppState) -> RoomService {
    RoomService::new(
        Arc::clone(&state.room_repository),
        Arc::clone(&state.id_generator),
    )
}

/// HTTP handler for creating a new room
///
/// POST /api/rooms
/// Returns the created room and its join link
#[instrument(name = "create_room", skip(state))]
pub async fn create_room(
    State(state): State<AppState>,
    Json(request): Json<RoomCreateRequest>,
) -> Result<Json<RoomCreateResponse>, AppError> {
    info!(room_name = %request.room_name, moderator_name = %request.moderator_name, "Creating new room");

    let room = room_service(&state).create_room(request).await?;
    let join_url = join_url(&state.config.base_url, &room.id);

    Ok(Json(RoomCreateResponse {
        success: true,
        room,
        join_url,
    }))
}

/// HTTP handler for fetching a single room by id
///
/// GET /api/rooms/:room_id
/// Closed rooms are still returned
#[instrument(name = "get_room", skip(state))]
pub async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailsResponse>, AppError> {
    let room = room_service(&state).get_room_details(&room_id).await?;

    Ok(Json(RoomDetailsResponse { room }))
}

/// HTTP handler for joining a room
///
/// POST /api/rooms/:room_id/join
/// Returns the new participant and a reduced view of the room
#[instrument(name = "join_room", skip(state))]
pub async fn join_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Json(request): Json<JoinRoomRequest>,
) -> Result<Json<JoinRoomResponse>, AppError> {
    let (participant, room) = room_service(&state)
        .join_room(&room_id, request.participant_name)
        .await?;

    Ok(Json(JoinRoomResponse {
        success: true,
        participant,
        room: RoomRef::from(&room),
    }))
}

/// HTTP handler for listing active rooms
///
/// GET /api/rooms
/// Returns summaries of rooms that are still active
#[instrument(name = "list_rooms", skip(state))]
pub async fn list_rooms(
    State(state): State<AppState>,
) -> Result<Json<ListRoomsResponse>, AppError> {
    let rooms = room_service(&state).list_active_rooms().await?;

    info!(room_count = rooms.len(), "Active rooms listed successfully");

    Ok(Json(ListRoomsResponse { rooms }))
}

/// HTTP handler for closing a room
///
/// DELETE /api/rooms/:room_id
/// Idempotent; the room stays retrievable afterwards
#[instrument(name = "close_room", skip(state))]
pub async fn close_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<CloseRoomResponse>, AppError> {
    room_service(&state).close_room(&room_id).await?;

    Ok(Json(CloseRoomResponse {
        success: true,
        message: "Room closed successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::repository::InMemoryRoomRepository;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::{get, post},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt; // for `oneshot`

    fn test_router() -> Router {
        let room_repository = Arc::new(InMemoryRoomRepository::new());
        let app_state = AppStateBuilder::new()
            .with_room_repository(room_repository)
            .build();

        Router::new()
            .route("/api/rooms", post(create_room).get(list_rooms))
            .route("/api/rooms/:room_id", get(get_room).delete(close_room))
            .route("/api/rooms/:room_id/join", post(join_room))
            .with_state(app_state)
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_create_room_handler() {
        let app = test_router();

        let request = json_request(
            "POST",
            "/api/rooms",
            r#"{"roomName": "Standup", "moderatorName": "Alice"}"#,
        );
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["room"]["name"], "Standup");
        assert_eq!(body["room"]["moderator"], "Alice");
        assert_eq!(body["room"]["isActive"], true);
        assert_eq!(body["room"]["participants"].as_array().unwrap().len(), 0);

        // Join link is derived from the configured base URL and the room id
        let room_id = body["room"]["id"].as_str().unwrap();
        assert!(!room_id.is_empty());
        let join_url = body["joinUrl"].as_str().unwrap();
        assert!(join_url.ends_with(&format!("/room/{}", room_id)));
    }

    #[tokio::test]
    async fn test_create_room_handler_missing_fields() {
        let app = test_router();

        let request = json_request(
            "POST",
            "/api/rooms",
            r#"{"roomName": "", "moderatorName": "Alice"}"#,
        );
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_json(response).await;
        assert_eq!(body["error"], "Room name and moderator name are required");
    }

    #[tokio::test]
    async fn test_create_room_handler_absent_field() {
        let app = test_router();

        // An omitted field must behave like an empty one: 400, not 422
        let request = json_request("POST", "/api/rooms", r#"{"roomName": "Standup"}"#);
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_json(response).await;
        assert_eq!(body["error"], "Room name and moderator name are required");
    }

    #[tokio::test]
    async fn test_create_room_handler_malformed_json() {
        let app = test_router();

        let request = json_request("POST", "/api/rooms", r#"{"roomName": "Stand"#);
        let response = app.oneshot(request).await.unwrap();

        // Should return 400 Bad Request for malformed JSON
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_room_handler() {
        let app = test_router();

        let create = json_request(
            "POST",
            "/api/rooms",
            r#"{"roomName": "Standup", "moderatorName": "Alice"}"#,
        );
        let created = response_json(app.clone().oneshot(create).await.unwrap()).await;
        let room_id = created["room"]["id"].as_str().unwrap().to_string();

        let request = empty_request("GET", &format!("/api/rooms/{}", room_id));
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["room"]["id"], room_id.as_str());
        assert_eq!(body["room"]["name"], "Standup");
    }

    #[tokio::test]
    async fn test_get_room_handler_not_found() {
        let app = test_router();

        let request = empty_request("GET", "/api/rooms/nonexistent-id");
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = response_json(response).await;
        assert_eq!(body["error"], "Room not found");
    }

    #[tokio::test]
    async fn test_join_room_handler() {
        let app = test_router();

        let create = json_request(
            "POST",
            "/api/rooms",
            r#"{"roomName": "Standup", "moderatorName": "Alice"}"#,
        );
        let created = response_json(app.clone().oneshot(create).await.unwrap()).await;
        let room_id = created["room"]["id"].as_str().unwrap().to_string();

        let request = json_request(
            "POST",
            &format!("/api/rooms/{}/join", room_id),
            r#"{"participantName": "Bob"}"#,
        );
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["participant"]["name"], "Bob");
        assert!(!body["participant"]["id"].as_str().unwrap().is_empty());

        // Reduced room view: id, name and moderator only
        assert_eq!(body["room"]["id"], room_id.as_str());
        assert_eq!(body["room"]["name"], "Standup");
        assert_eq!(body["room"]["moderator"], "Alice");
        assert!(body["room"].get("participants").is_none());
    }

    #[tokio::test]
    async fn test_join_room_handler_omitted_participant_name() {
        let app = test_router();

        let create = json_request(
            "POST",
            "/api/rooms",
            r#"{"roomName": "Standup", "moderatorName": "Alice"}"#,
        );
        let created = response_json(app.clone().oneshot(create).await.unwrap()).await;
        let room_id = created["room"]["id"].as_str().unwrap().to_string();

        // participantName is optional on the wire
        let request = json_request("POST", &format!("/api/rooms/{}/join", room_id), r#"{}"#);
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["participant"]["name"], "");
    }

    #[tokio::test]
    async fn test_join_room_handler_not_found() {
        let app = test_router();

        let request = json_request(
            "POST",
            "/api/rooms/nonexistent-id/join",
            r#"{"participantName": "Bob"}"#,
        );
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_join_room_handler_inactive() {
        let app = test_router();

        let create = json_request(
            "POST",
            "/api/rooms",
            r#"{"roomName": "Standup", "moderatorName": "Alice"}"#,
        );
        let created = response_json(app.clone().oneshot(create).await.unwrap()).await;
        let room_id = created["room"]["id"].as_str().unwrap().to_string();

        let close = empty_request("DELETE", &format!("/api/rooms/{}", room_id));
        app.clone().oneshot(close).await.unwrap();

        let request = json_request(
            "POST",
            &format!("/api/rooms/{}/join", room_id),
            r#"{"participantName": "Carol"}"#,
        );
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_json(response).await;
        assert_eq!(body["error"], "Room is not active");
    }

    #[tokio::test]
    async fn test_list_rooms_handler_empty() {
        let app = test_router();

        let request = empty_request("GET", "/api/rooms");
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["rooms"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_list_rooms_handler_excludes_closed() {
        let app = test_router();

        let create1 = json_request(
            "POST",
            "/api/rooms",
            r#"{"roomName": "Standup", "moderatorName": "Alice"}"#,
        );
        let created1 = response_json(app.clone().oneshot(create1).await.unwrap()).await;
        let room1_id = created1["room"]["id"].as_str().unwrap().to_string();

        let create2 = json_request(
            "POST",
            "/api/rooms",
            r#"{"roomName": "Retro", "moderatorName": "Bob"}"#,
        );
        let created2 = response_json(app.clone().oneshot(create2).await.unwrap()).await;
        let room2_id = created2["room"]["id"].as_str().unwrap().to_string();

        let close = empty_request("DELETE", &format!("/api/rooms/{}", room1_id));
        app.clone().oneshot(close).await.unwrap();

        let request = empty_request("GET", "/api/rooms");
        let response = app.oneshot(request).await.unwrap();

        let body = response_json(response).await;
        let rooms = body["rooms"].as_array().unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0]["id"], room2_id.as_str());
        assert_eq!(rooms[0]["participantCount"], 0);
    }

    #[tokio::test]
    async fn test_close_room_handler() {
        let app = test_router();

        let create = json_request(
            "POST",
            "/api/rooms",
            r#"{"roomName": "Standup", "moderatorName": "Alice"}"#,
        );
        let created = response_json(app.clone().oneshot(create).await.unwrap()).await;
        let room_id = created["room"]["id"].as_str().unwrap().to_string();

        let request = empty_request("DELETE", &format!("/api/rooms/{}", room_id));
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Room closed successfully");

        // Closing again succeeds silently
        let again = empty_request("DELETE", &format!("/api/rooms/{}", room_id));
        let response = app.oneshot(again).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_close_room_handler_not_found() {
        let app = test_router();

        let request = empty_request("DELETE", "/api/rooms/nonexistent-id");
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
