use axum::{http::Method, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chat_relay::event::EventBus;
use chat_relay::room::registry::{InMemoryRoomRegistry, RoomRegistry};
use chat_relay::shared::AppState;
use chat_relay::websockets::{
    websocket_handler, ConnectionManager, InMemoryConnectionManager, WebSocketRoomSubscriber,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting chat relay server");

    // Wire the in-memory registry, connection routing and the per-room
    // event fan-out
    let room_registry: Arc<dyn RoomRegistry> = Arc::new(InMemoryRoomRegistry::new());
    let connection_manager: Arc<dyn ConnectionManager> = Arc::new(InMemoryConnectionManager::new());
    let event_bus = EventBus::new();
    let room_subscriber = Arc::new(WebSocketRoomSubscriber::new(
        Arc::clone(&room_registry),
        Arc::clone(&connection_manager),
        event_bus.clone(),
    ));

    let app_state = AppState::new(
        room_registry,
        connection_manager,
        event_bus,
        room_subscriber,
    );

    // Browser clients connect from anywhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST]);

    let app = Router::new()
        .route("/", get(|| async { "chat relay running" }))
        .route("/ws", get(websocket_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .unwrap();
    info!("Server running on http://localhost:{}", port);
    axum::serve(listener, app).await.unwrap();
}
