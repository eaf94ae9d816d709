// Public API - what other modules can use
pub use handlers::{close_room, create_room, get_room, join_room, list_rooms};

// Internal modules
pub mod generators;
mod handlers;
pub mod models;
pub mod repository;
mod service;
pub mod types;
