// Library crate for the room management server
// This file exposes the public API for integration tests

pub mod config;
pub mod health;
pub mod room;
pub mod routes;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use config::AppConfig;
pub use room::{
    generators::{IdGenerator, UuidIdGenerator},
    models::{ParticipantModel, RoomModel},
    repository::{InMemoryRoomRepository, RoomRepository},
};
pub use routes::app_router;
pub use shared::{AppError, AppState};
