use std::sync::Arc;
use tracing::debug;

use crate::{
    event::RoomEventError,
    room::registry::RoomRegistry,
    websockets::{connection_manager::ConnectionManager, messages::ServerEvent},
};

use super::shared::MessageBroadcaster;

/// Ephemeral typing indicator relay. Nothing is persisted and nothing is
/// debounced server-side; clients reset their own 2-second timer.
pub struct TypingEventHandlers {
    registry: Arc<dyn RoomRegistry>,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl TypingEventHandlers {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            registry,
            connection_manager,
        }
    }

    pub async fn handle_typing_started(
        &self,
        room_id: &str,
        connection_id: &str,
        username: &str,
    ) -> Result<(), RoomEventError> {
        self.relay_indicator(room_id, connection_id, ServerEvent::typing(username))
            .await
    }

    pub async fn handle_typing_stopped(
        &self,
        room_id: &str,
        connection_id: &str,
    ) -> Result<(), RoomEventError> {
        self.relay_indicator(room_id, connection_id, ServerEvent::typing_cleared())
            .await
    }

    async fn relay_indicator(
        &self,
        room_id: &str,
        connection_id: &str,
        indicator: ServerEvent,
    ) -> Result<(), RoomEventError> {
        let Some(room) = self.registry.get_room(room_id).await else {
            debug!(room_id = %room_id, "No such room, typing indicator dropped");
            return Ok(());
        };

        MessageBroadcaster::broadcast(
            &self.connection_manager,
            &room.member_ids_except(connection_id),
            &indicator,
        )
        .await?;

        Ok(())
    }
}
