use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    generators::IdGenerator,
    models::{ParticipantModel, RoomModel},
    repository::{CloseRoomResult, JoinRoomResult, RoomRepository},
    types::{RoomCreateRequest, RoomSummary},
};
use crate::shared::AppError;

/// Formats the presentational join link for a room.
///
/// Purely a formatting helper; the base URL comes from configuration.
pub fn join_url(base_url: &str, room_id: &str) -> String {
    format!("{}/room/{}", base_url.trim_end_matches('/'), room_id)
}

/// Service for handling room business logic
pub struct RoomService {
    repository: Arc<dyn RoomRepository + Send + Sync>,
    id_generator: Arc<dyn IdGenerator>,
}

impl RoomService {
    pub fn new(
        repository: Arc<dyn RoomRepository + Send + Sync>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            repository,
            id_generator,
        }
    }

    /// Creates a new room with a generated ID
    #[instrument(skip(self))]
    pub async fn create_room(&self, request: RoomCreateRequest) -> Result<RoomModel, AppError> {
        if request.room_name.is_empty() || request.moderator_name.is_empty() {
            return Err(AppError::Validation(
                "Room name and moderator name are required".to_string(),
            ));
        }

        let room_id = self.id_generator.generate().await;
        debug!(room_id = %room_id, "Generated room ID");

        let room = RoomModel::new(room_id, request.room_name, request.moderator_name);
        self.repository.create_room(&room).await?;

        info!(
            room_id = %room.id,
            moderator = %room.moderator,
            "Room created successfully"
        );

        Ok(room)
    }

    /// Gets a room by id, whether active or closed
    #[instrument(skip(self))]
    pub async fn get_room_details(&self, room_id: &str) -> Result<RoomModel, AppError> {
        self.repository
            .get_room(room_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Room not found".to_string()))
    }

    /// Joins an existing active room by appending a new participant.
    ///
    /// The participant name is deliberately not validated; empty names are
    /// accepted.
    #[instrument(skip(self))]
    pub async fn join_room(
        &self,
        room_id: &str,
        participant_name: String,
    ) -> Result<(ParticipantModel, RoomModel), AppError> {
        info!(room_id = %room_id, participant_name = %participant_name, "Attempting to join room");

        let participant_id = self.id_generator.generate().await;
        let participant = ParticipantModel::new(participant_id, participant_name);

        // Existence and activity checks happen atomically in the repository
        let result = self
            .repository
            .try_join_room(room_id, participant.clone())
            .await?;

        match result {
            JoinRoomResult::Success(updated_room) => {
                info!(
                    room_id = %room_id,
                    participant_id = %participant.id,
                    new_participant_count = updated_room.participant_count(),
                    "Participant joined room successfully"
                );
                Ok((participant, updated_room))
            }
            JoinRoomResult::RoomNotFound => {
                Err(AppError::NotFound("Room not found".to_string()))
            }
            JoinRoomResult::RoomInactive => {
                Err(AppError::RoomInactive("Room is not active".to_string()))
            }
        }
    }

    /// Lists summaries of all active rooms.
    ///
    /// Ordering is unspecified; callers must not rely on it.
    #[instrument(skip(self))]
    pub async fn list_active_rooms(&self) -> Result<Vec<RoomSummary>, AppError> {
        debug!("Listing active rooms");

        let rooms = self.repository.list_rooms().await?;

        let summaries: Vec<RoomSummary> = rooms
            .iter()
            .filter(|room| room.is_active)
            .map(RoomSummary::from)
            .collect();

        info!(active_room_count = summaries.len(), "Active rooms listed");

        Ok(summaries)
    }

    /// Closes a room; idempotent on already-closed rooms
    #[instrument(skip(self))]
    pub async fn close_room(&self, room_id: &str) -> Result<(), AppError> {
        let result = self.repository.close_room(room_id).await?;

        match result {
            CloseRoomResult::Success => {
                info!(room_id = %room_id, "Room closed");
                Ok(())
            }
            CloseRoomResult::RoomNotFound => {
                Err(AppError::NotFound("Room not found".to_string()))
            }
        }
    }
}
