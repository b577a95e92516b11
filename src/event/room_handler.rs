use async_trait::async_trait;
use thiserror::Error;

use super::events::RoomEvent;

/// Errors that can occur when handling room events
#[derive(Debug, Error)]
pub enum RoomEventError {
    #[error("Room not found: {0}")]
    RoomNotFound(String),

    #[error("Handler error: {0}")]
    HandlerError(String),
}

/// Trait for components that react to room events.
///
/// Keeps event consumers decoupled from the WebSocket transport; the
/// subscription task logs failures and keeps the room alive.
#[async_trait]
pub trait RoomEventHandler: Send + Sync {
    /// Handle a single room event to completion
    async fn handle_room_event(
        &self,
        room_id: &str,
        event: RoomEvent,
    ) -> Result<(), RoomEventError>;

    /// Human-readable name for this handler (for logging/debugging)
    fn handler_name(&self) -> &'static str;
}
