use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::models::{ParticipantModel, RoomModel};
use crate::shared::AppError;

/// Result of attempting to join a room
#[derive(Debug, Clone)]
pub enum JoinRoomResult {
    /// Participant appended, returns updated room data
    Success(RoomModel),
    /// Room has been closed and accepts no further joins
    RoomInactive,
    /// Room does not exist
    RoomNotFound,
}

/// Result of attempting to close a room
#[derive(Debug, Clone)]
pub enum CloseRoomResult {
    /// Room is now inactive (also returned when it already was)
    Success,
    /// Room does not exist
    RoomNotFound,
}

/// Trait for room registry operations
#[async_trait]
pub trait RoomRepository {
    async fn create_room(&self, room: &RoomModel) -> Result<(), AppError>;
    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError>;
    async fn list_rooms(&self) -> Result<Vec<RoomModel>, AppError>;

    /// Atomically attempts to append a participant, checking existence and
    /// the active flag under the same lock acquisition so concurrent joins
    /// never observe a half-applied mutation
    async fn try_join_room(
        &self,
        room_id: &str,
        participant: ParticipantModel,
    ) -> Result<JoinRoomResult, AppError>;

    /// Atomically flips a room to inactive; idempotent
    async fn close_room(&self, room_id: &str) -> Result<CloseRoomResult, AppError>;

    /// Total number of rooms in the registry, closed rooms included
    async fn room_count(&self) -> Result<usize, AppError>;
}

/// In-memory implementation of RoomRepository
///
/// A single mutex guards the whole map, which serializes every mutating
/// operation. Listing order follows HashMap iteration and is unspecified.
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<String, RoomModel>>,
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoomRepository {
    /// Creates a new empty in-memory registry
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    #[instrument(skip(self, room))]
    async fn create_room(&self, room: &RoomModel) -> Result<(), AppError> {
        debug!(room_id = %room.id, moderator = %room.moderator, "Creating room in registry");

        let mut rooms = self.rooms.lock().unwrap();
        if rooms.contains_key(&room.id) {
            warn!(room_id = %room.id, "Room id already exists in registry");
            return Err(AppError::Internal);
        }
        rooms.insert(room.id.clone(), room.clone());

        debug!(room_id = %room.id, "Room created successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError> {
        debug!(room_id = %room_id, "Fetching room from registry");

        let rooms = self.rooms.lock().unwrap();
        let room = rooms.get(room_id).cloned();

        match &room {
            Some(r) => {
                debug!(room_id = %room_id, is_active = r.is_active, "Room found in registry")
            }
            None => debug!(room_id = %room_id, "Room not found in registry"),
        }

        Ok(room)
    }

    #[instrument(skip(self))]
    async fn list_rooms(&self) -> Result<Vec<RoomModel>, AppError> {
        debug!("Listing all rooms in registry");

        let rooms = self.rooms.lock().unwrap();
        let room_list = rooms.values().cloned().collect();

        Ok(room_list)
    }

    #[instrument(skip(self, participant))]
    async fn try_join_room(
        &self,
        room_id: &str,
        participant: ParticipantModel,
    ) -> Result<JoinRoomResult, AppError> {
        debug!(room_id = %room_id, participant_name = %participant.name, "Attempting to join room atomically");

        let mut rooms = self.rooms.lock().unwrap();

        // Get the room or return RoomNotFound
        let room = match rooms.get_mut(room_id) {
            Some(room) => room,
            None => {
                debug!(room_id = %room_id, "Room not found");
                return Ok(JoinRoomResult::RoomNotFound);
            }
        };

        // Closed rooms accept no further joins
        if !room.is_active {
            debug!(room_id = %room_id, "Room is not active");
            return Ok(JoinRoomResult::RoomInactive);
        }

        room.participants.push(participant.clone());

        let updated_room = room.clone();

        info!(
            room_id = %room_id,
            participant_id = %participant.id,
            new_participant_count = updated_room.participant_count(),
            "Participant joined room successfully (atomic)"
        );

        Ok(JoinRoomResult::Success(updated_room))
    }

    #[instrument(skip(self))]
    async fn close_room(&self, room_id: &str) -> Result<CloseRoomResult, AppError> {
        info!(room_id = %room_id, "Attempting to close room");

        let mut rooms = self.rooms.lock().unwrap();

        let room = match rooms.get_mut(room_id) {
            Some(room) => room,
            None => {
                debug!(room_id = %room_id, "Room not found");
                return Ok(CloseRoomResult::RoomNotFound);
            }
        };

        // Idempotent: closing an already-closed room is a no-op success
        if !room.is_active {
            debug!(room_id = %room_id, "Room already closed");
            return Ok(CloseRoomResult::Success);
        }

        room.is_active = false;

        info!(room_id = %room_id, "Room closed successfully");
        Ok(CloseRoomResult::Success)
    }

    #[instrument(skip(self))]
    async fn room_count(&self) -> Result<usize, AppError> {
        let rooms = self.rooms.lock().unwrap();
        Ok(rooms.len())
    }
}
