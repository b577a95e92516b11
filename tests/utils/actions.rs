use serde_json::json;
use tokio::time::{sleep, Duration};

use chat_relay::{ClientEvent, MessageHandler, RoomEvent, RoomRegistry};

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Send a client event frame and wait for processing
    pub async fn send_event(&self, connection_id: &str, event: &ClientEvent) {
        let frame = serde_json::to_string(event).unwrap();
        self.send_raw(connection_id, frame).await;
    }

    /// Send a raw frame (possibly malformed) and wait for processing
    pub async fn send_raw(&self, connection_id: &str, frame: String) {
        self.input_handler.handle_message(connection_id, frame).await;
        sleep(Duration::from_millis(10)).await;
    }

    /// Clear all recorded frames
    pub async fn clear_messages(&self) {
        self.mock_conn_manager.clear_messages().await;
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    /// Connect a new client and join the default room
    pub async fn join(&self, connection_id: &str, username: &str) {
        self.join_room(connection_id, username, &self.room_id).await;
    }

    /// Connect a new client and join a specific room
    pub async fn join_room(&self, connection_id: &str, username: &str, room: &str) {
        self.mock_conn_manager.add_connected(connection_id).await;
        self.send_event(
            connection_id,
            &ClientEvent::JoinRoom {
                username: username.to_string(),
                room: room.to_string(),
            },
        )
        .await;
    }

    /// Send a chat message into the default room
    pub async fn send_chat(&self, connection_id: &str, message_id: &str, author: &str, text: &str) {
        self.send_chat_to_room(connection_id, message_id, author, text, &self.room_id)
            .await;
    }

    /// Send a chat message into a specific room
    pub async fn send_chat_to_room(
        &self,
        connection_id: &str,
        message_id: &str,
        author: &str,
        text: &str,
        room: &str,
    ) {
        let payload = json!({
            "id": message_id,
            "type": "message",
            "room": room,
            "author": author,
            "message": text,
            "time": "10:30 AM",
            "status": "sent",
        });
        self.send_event(connection_id, &ClientEvent::SendMessage(payload))
            .await;
    }

    /// Acknowledge delivery of a message back to its sender
    pub async fn ack_delivered(&self, connection_id: &str, message_id: &str, sender_id: &str) {
        self.send_event(
            connection_id,
            &ClientEvent::MessageDelivered {
                message_id: message_id.to_string(),
                sender_id: sender_id.to_string(),
            },
        )
        .await;
    }

    /// Signal that this client has read the room (window focus)
    pub async fn mark_read(&self, connection_id: &str) {
        self.send_event(
            connection_id,
            &ClientEvent::MessagesRead {
                room: self.room_id.clone(),
            },
        )
        .await;
    }

    pub async fn start_typing(&self, connection_id: &str, username: &str) {
        self.send_event(
            connection_id,
            &ClientEvent::Typing {
                room: self.room_id.clone(),
                username: username.to_string(),
            },
        )
        .await;
    }

    pub async fn stop_typing(&self, connection_id: &str) {
        self.send_event(
            connection_id,
            &ClientEvent::StopTyping {
                room: self.room_id.clone(),
            },
        )
        .await;
    }

    /// Mirror the production disconnect cleanup: drop the outbound route,
    /// then emit the disconnect event into the room the connection was in
    pub async fn disconnect(&self, connection_id: &str) {
        use chat_relay::ConnectionManager;

        self.mock_conn_manager.remove_connection(connection_id).await;

        if let Some(room_id) = self.registry.room_of(connection_id).await {
            self.event_bus
                .emit_to_room(
                    &room_id,
                    RoomEvent::MemberDisconnected {
                        connection_id: connection_id.to_string(),
                    },
                )
                .await;
        }
        sleep(Duration::from_millis(10)).await;
    }
}
