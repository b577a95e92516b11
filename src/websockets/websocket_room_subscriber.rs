use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::{
    event::{EventBus, RoomEvent, RoomEventError, RoomEventHandler},
    room::registry::RoomRegistry,
    websockets::connection_manager::ConnectionManager,
};

use super::event_handlers::{
    ChatEventHandlers, ConnectionEventHandlers, PresenceEventHandlers, StatusEventHandlers,
    TypingEventHandlers,
};

/// WebSocket-facing room event handler.
///
/// Dispatches each room event to the specialized handler group:
/// - PresenceEventHandlers: MemberJoined
/// - ConnectionEventHandlers: MemberDisconnected
/// - ChatEventHandlers: ChatMessage
/// - StatusEventHandlers: MessagesRead
/// - TypingEventHandlers: TypingStarted, TypingStopped
pub struct WebSocketRoomSubscriber {
    presence_handlers: PresenceEventHandlers,
    connection_handlers: ConnectionEventHandlers,
    chat_handlers: ChatEventHandlers,
    status_handlers: StatusEventHandlers,
    typing_handlers: TypingEventHandlers,
}

#[async_trait]
impl RoomEventHandler for WebSocketRoomSubscriber {
    async fn handle_room_event(
        &self,
        room_id: &str,
        event: RoomEvent,
    ) -> Result<(), RoomEventError> {
        debug!(
            room_id = %room_id,
            event = ?event,
            "Handling room event for WebSocket connections"
        );

        match event {
            RoomEvent::MemberJoined {
                connection_id,
                username,
            } => {
                self.presence_handlers
                    .handle_member_joined(room_id, &connection_id, &username)
                    .await
            }
            RoomEvent::MemberDisconnected { connection_id } => {
                self.connection_handlers
                    .handle_member_disconnected(room_id, &connection_id)
                    .await
            }
            RoomEvent::ChatMessage {
                sender_connection_id,
                message,
            } => {
                self.chat_handlers
                    .handle_chat_message(room_id, &sender_connection_id, message)
                    .await
            }
            RoomEvent::MessagesRead {
                reader_connection_id,
            } => {
                self.status_handlers
                    .handle_messages_read(room_id, &reader_connection_id)
                    .await
            }
            RoomEvent::TypingStarted {
                connection_id,
                username,
            } => {
                self.typing_handlers
                    .handle_typing_started(room_id, &connection_id, &username)
                    .await
            }
            RoomEvent::TypingStopped { connection_id } => {
                self.typing_handlers
                    .handle_typing_stopped(room_id, &connection_id)
                    .await
            }
        }
    }

    fn handler_name(&self) -> &'static str {
        "WebSocketRoomSubscriber"
    }
}

impl WebSocketRoomSubscriber {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        connection_manager: Arc<dyn ConnectionManager>,
        event_bus: EventBus,
    ) -> Self {
        let presence_handlers =
            PresenceEventHandlers::new(Arc::clone(&registry), Arc::clone(&connection_manager));

        let connection_handlers = ConnectionEventHandlers::new(
            Arc::clone(&registry),
            Arc::clone(&connection_manager),
            event_bus,
        );

        let chat_handlers =
            ChatEventHandlers::new(Arc::clone(&registry), Arc::clone(&connection_manager));

        let status_handlers =
            StatusEventHandlers::new(Arc::clone(&registry), Arc::clone(&connection_manager));

        let typing_handlers =
            TypingEventHandlers::new(Arc::clone(&registry), Arc::clone(&connection_manager));

        Self {
            presence_handlers,
            connection_handlers,
            chat_handlers,
            status_handlers,
            typing_handlers,
        }
    }
}
