use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    event::{EventBus, RoomEventError},
    room::registry::{LeaveRoomResult, RoomRegistry},
    websockets::{connection_manager::ConnectionManager, messages::ServerEvent},
};

use super::shared::MessageBroadcaster;

/// Disconnect cleanup: registry removal, the left-the-chat announcement,
/// and the shrunken occupancy snapshot.
pub struct ConnectionEventHandlers {
    registry: Arc<dyn RoomRegistry>,
    connection_manager: Arc<dyn ConnectionManager>,
    event_bus: EventBus,
}

impl ConnectionEventHandlers {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        connection_manager: Arc<dyn ConnectionManager>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            registry,
            connection_manager,
            event_bus,
        }
    }

    pub async fn handle_member_disconnected(
        &self,
        room_id: &str,
        connection_id: &str,
    ) -> Result<(), RoomEventError> {
        info!(
            room_id = %room_id,
            connection_id = %connection_id,
            "Processing disconnect"
        );

        match self.registry.leave(connection_id).await {
            LeaveRoomResult::Left { username, room } => {
                let left = ServerEvent::notification(format!("{} has left the chat.", username));
                MessageBroadcaster::broadcast(&self.connection_manager, &room.member_ids(), &left)
                    .await?;

                let snapshot = ServerEvent::RoomData {
                    user_count: room.member_count(),
                    users: room.usernames(),
                };
                MessageBroadcaster::broadcast(
                    &self.connection_manager,
                    &room.member_ids(),
                    &snapshot,
                )
                .await?;
            }
            LeaveRoomResult::RoomDeleted { username, room_id } => {
                // Nobody left to notify; drop the room's event channel so
                // its subscription task ends
                self.event_bus.remove_room(&room_id).await;
                info!(
                    room_id = %room_id,
                    username = %username,
                    "Room emptied by disconnect, channel removed"
                );
            }
            LeaveRoomResult::NotJoined => {
                debug!(
                    connection_id = %connection_id,
                    "Disconnect for a connection with no room"
                );
            }
        }

        Ok(())
    }
}
