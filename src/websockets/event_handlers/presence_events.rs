use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    event::RoomEventError,
    room::registry::RoomRegistry,
    websockets::{connection_manager::ConnectionManager, messages::ServerEvent},
};

use super::shared::MessageBroadcaster;

/// Join-side presence notifications: the private welcome, the
/// joined-the-chat announcement, and the fresh occupancy snapshot.
pub struct PresenceEventHandlers {
    registry: Arc<dyn RoomRegistry>,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl PresenceEventHandlers {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            registry,
            connection_manager,
        }
    }

    pub async fn handle_member_joined(
        &self,
        room_id: &str,
        connection_id: &str,
        username: &str,
    ) -> Result<(), RoomEventError> {
        debug!(
            room_id = %room_id,
            connection_id = %connection_id,
            "Handling member joined event"
        );

        let Some(room) = self.registry.get_room(room_id).await else {
            warn!(room_id = %room_id, "Room gone before join notifications, skipping");
            return Ok(());
        };

        // Private welcome to the joiner only
        let welcome =
            ServerEvent::notification(format!("Welcome to Room {}, {}!", room_id, username));
        MessageBroadcaster::send_to_connection(&self.connection_manager, connection_id, &welcome)
            .await?;

        // Announcement to everyone already in the room
        let joined = ServerEvent::notification(format!("{} has joined the chat.", username));
        MessageBroadcaster::broadcast(
            &self.connection_manager,
            &room.member_ids_except(connection_id),
            &joined,
        )
        .await?;

        // Full occupancy snapshot to all members, joiner included
        let snapshot = ServerEvent::RoomData {
            user_count: room.member_count(),
            users: room.usernames(),
        };
        MessageBroadcaster::broadcast(&self.connection_manager, &room.member_ids(), &snapshot)
            .await?;

        debug!(
            room_id = %room_id,
            members_notified = room.member_count(),
            "Join notifications sent"
        );

        Ok(())
    }
}
