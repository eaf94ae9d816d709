use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use huddle::{app_router, AppConfig, AppState, InMemoryRoomRepository, UuidIdGenerator};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "huddle=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting room management server");

    let config = AppConfig::from_env();
    let port = config.port;

    // Create shared application state with dependency injection
    let room_repository = Arc::new(InMemoryRoomRepository::new());
    let id_generator = Arc::new(UuidIdGenerator::new());
    let app_state = AppState::new(room_repository, id_generator, config);

    let app = app_router(app_state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .unwrap();
    info!("Server running on http://localhost:{}", port);
    axum::serve(listener, app).await.unwrap();
}
