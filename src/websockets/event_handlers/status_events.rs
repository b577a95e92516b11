use std::sync::Arc;
use tracing::debug;

use crate::{
    event::RoomEventError,
    room::registry::RoomRegistry,
    websockets::{connection_manager::ConnectionManager, messages::ServerEvent},
};

use super::shared::MessageBroadcaster;

/// Read-receipt fan-out.
///
/// Delivery acknowledgments never reach this handler: they carry the
/// target connection id and are forwarded directly by the receive
/// handler without touching a room channel.
pub struct StatusEventHandlers {
    registry: Arc<dyn RoomRegistry>,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl StatusEventHandlers {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            registry,
            connection_manager,
        }
    }

    /// Tell everyone else in the room that this connection has read its
    /// messages. Coarse by design: one event per focus, no per-message
    /// granularity.
    pub async fn handle_messages_read(
        &self,
        room_id: &str,
        reader_connection_id: &str,
    ) -> Result<(), RoomEventError> {
        debug!(
            room_id = %room_id,
            reader_connection_id = %reader_connection_id,
            "Handling messages read event"
        );

        let Some(room) = self.registry.get_room(room_id).await else {
            debug!(room_id = %room_id, "No such room, read receipt dropped");
            return Ok(());
        };

        let update = ServerEvent::UpdateReadStatus {
            reader_id: reader_connection_id.to_string(),
        };
        MessageBroadcaster::broadcast(
            &self.connection_manager,
            &room.member_ids_except(reader_connection_id),
            &update,
        )
        .await?;

        Ok(())
    }
}
