use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A room record as held by the registry.
///
/// Rooms are never deleted: closing a room flips `is_active` to false and
/// leaves the record in place so it stays retrievable by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomModel {
    pub id: String,
    pub name: String,
    pub moderator: String,
    pub participants: Vec<ParticipantModel>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl RoomModel {
    /// Creates a new active room with no participants
    pub fn new(id: String, name: String, moderator: String) -> Self {
        Self {
            id,
            name,
            moderator,
            participants: Vec::new(),
            created_at: Utc::now(),
            is_active: true,
        }
    }

    /// Get the current number of participants
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }
}

/// A participant entry appended to a room at join time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantModel {
    pub id: String,
    pub name: String,
    pub joined_at: DateTime<Utc>,
}

impl ParticipantModel {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            joined_at: Utc::now(),
        }
    }
}
