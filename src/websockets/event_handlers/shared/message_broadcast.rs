use crate::{
    event::RoomEventError,
    websockets::{connection_manager::ConnectionManager, messages::ServerEvent},
};
use std::sync::Arc;

pub struct MessageBroadcaster;

impl MessageBroadcaster {
    /// Serialize once, fan out to every listed connection
    pub async fn broadcast(
        connection_manager: &Arc<dyn ConnectionManager>,
        connection_ids: &[String],
        event: &ServerEvent,
    ) -> Result<(), RoomEventError> {
        let message_json = serde_json::to_string(event).map_err(|e| {
            RoomEventError::HandlerError(format!("Failed to serialize event: {}", e))
        })?;

        connection_manager
            .send_to_connections(connection_ids, &message_json)
            .await;

        Ok(())
    }

    /// Send to a single connection
    pub async fn send_to_connection(
        connection_manager: &Arc<dyn ConnectionManager>,
        connection_id: &str,
        event: &ServerEvent,
    ) -> Result<(), RoomEventError> {
        let message_json = serde_json::to_string(event).map_err(|e| {
            RoomEventError::HandlerError(format!("Failed to serialize event: {}", e))
        })?;

        connection_manager
            .send_to_connection(connection_id, &message_json)
            .await;

        Ok(())
    }
}
