use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::{ParticipantModel, RoomModel};

/// Request payload for creating a new room
///
/// Fields default to empty when omitted so absent and empty values both hit
/// the service's validation error rather than a deserialization failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCreateRequest {
    #[serde(default)]
    pub room_name: String,
    #[serde(default)]
    pub moderator_name: String,
}

/// Request payload for joining a room
///
/// `participant_name` defaults to empty when omitted; the service accepts
/// empty participant names.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomRequest {
    #[serde(default)]
    pub participant_name: String,
}

/// Response for room creation
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCreateResponse {
    pub success: bool,
    pub room: RoomModel,
    pub join_url: String,
}

/// Response for fetching a single room by id
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomDetailsResponse {
    pub room: RoomModel,
}

/// Reduced room view echoed back on join (no participant list)
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomRef {
    pub id: String,
    pub name: String,
    pub moderator: String,
}

impl From<&RoomModel> for RoomRef {
    fn from(room: &RoomModel) -> Self {
        Self {
            id: room.id.clone(),
            name: room.name.clone(),
            moderator: room.moderator.clone(),
        }
    }
}

/// Response for joining a room
#[derive(Debug, Serialize, Deserialize)]
pub struct JoinRoomResponse {
    pub success: bool,
    pub participant: ParticipantModel,
    pub room: RoomRef,
}

/// Summary entry in the active-room listing
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub id: String,
    pub name: String,
    pub moderator: String,
    pub participant_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&RoomModel> for RoomSummary {
    fn from(room: &RoomModel) -> Self {
        Self {
            id: room.id.clone(),
            name: room.name.clone(),
            moderator: room.moderator.clone(),
            participant_count: room.participant_count(),
            created_at: room.created_at,
        }
    }
}

/// Response for the active-room listing
#[derive(Debug, Serialize, Deserialize)]
pub struct ListRoomsResponse {
    pub rooms: Vec<RoomSummary>,
}

/// Response for closing a room
#[derive(Debug, Serialize, Deserialize)]
pub struct CloseRoomResponse {
    pub success: bool,
    pub message: String,
}
