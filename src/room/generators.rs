use async_trait::async_trait;

/// Trait for generating opaque unique identifiers
///
/// Injected into the room service so tests can supply deterministic ids.
#[async_trait]
pub trait IdGenerator: Send + Sync {
    async fn generate(&self) -> String;
}

/// Random UUID v4 identifier generator
pub struct UuidIdGenerator;

impl UuidIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UuidIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdGenerator for UuidIdGenerator {
    async fn generate(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
