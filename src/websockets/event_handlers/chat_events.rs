use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::{
    event::RoomEventError,
    room::registry::RoomRegistry,
    websockets::{connection_manager::ConnectionManager, messages::ServerEvent},
};

use super::shared::MessageBroadcaster;

/// Relays chat messages to every room member except the author.
pub struct ChatEventHandlers {
    registry: Arc<dyn RoomRegistry>,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl ChatEventHandlers {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            registry,
            connection_manager,
        }
    }

    /// Stamp the sender's connection id and forward the raw payload.
    ///
    /// The payload is not validated; a non-object payload is relayed
    /// unchanged. Messages to a room with no members are dropped - there
    /// is no offline queueing.
    pub async fn handle_chat_message(
        &self,
        room_id: &str,
        sender_connection_id: &str,
        mut message: Value,
    ) -> Result<(), RoomEventError> {
        debug!(
            room_id = %room_id,
            sender_connection_id = %sender_connection_id,
            "Handling chat message event"
        );

        let Some(room) = self.registry.get_room(room_id).await else {
            debug!(room_id = %room_id, "No such room, message dropped");
            return Ok(());
        };

        if let Value::Object(fields) = &mut message {
            fields.insert(
                "senderId".to_string(),
                Value::String(sender_connection_id.to_string()),
            );
        }

        let recipients = room.member_ids_except(sender_connection_id);
        if recipients.is_empty() {
            debug!(room_id = %room_id, "No recipients, message dropped");
            return Ok(());
        }

        MessageBroadcaster::broadcast(
            &self.connection_manager,
            &recipients,
            &ServerEvent::ReceiveMessage(message),
        )
        .await?;

        Ok(())
    }
}
