use async_trait::async_trait;
use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::event::{EventBus, RoomEvent, RoomEventHandler, RoomSubscription};
use crate::room::registry::{JoinRoomResult, RoomRegistry};
use crate::shared::AppState;
use crate::websockets::messages::{ClientEvent, MessageStatus, ServerEvent};

use super::connection_manager::ConnectionManager;
use super::socket::{Connection, MessageHandler};

/// Parses inbound frames from one connection and turns them into room
/// events, registry mutations, or direct status forwards.
pub struct WebsocketReceiveHandler {
    registry: Arc<dyn RoomRegistry>,
    connection_manager: Arc<dyn ConnectionManager>,
    event_bus: EventBus,
    room_subscriber: Arc<dyn RoomEventHandler>,
}

impl WebsocketReceiveHandler {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        connection_manager: Arc<dyn ConnectionManager>,
        event_bus: EventBus,
        room_subscriber: Arc<dyn RoomEventHandler>,
    ) -> Self {
        Self {
            registry,
            connection_manager,
            event_bus,
            room_subscriber,
        }
    }

    /// Join mutates the registry before anything is emitted, so the
    /// presence handler reads a snapshot that already contains the
    /// joiner. A join that creates the room starts the room's
    /// subscription first; the emit below is then guaranteed a receiver.
    async fn handle_join(&self, connection_id: &str, username: &str, room: &str) {
        match self.registry.join(connection_id, username, room).await {
            JoinRoomResult::Joined { room, created } => {
                if created {
                    let subscription = RoomSubscription::new(
                        room.id.clone(),
                        Arc::clone(&self.room_subscriber),
                        self.event_bus.clone(),
                    );
                    let _ = subscription.start().await;
                }

                self.event_bus
                    .emit_to_room(
                        &room.id,
                        RoomEvent::MemberJoined {
                            connection_id: connection_id.to_string(),
                            username: username.to_string(),
                        },
                    )
                    .await;
            }
            JoinRoomResult::AlreadyJoined { current_room } => {
                warn!(
                    connection_id = %connection_id,
                    current_room = %current_room,
                    "Join ignored, connection already in a room"
                );
            }
            JoinRoomResult::EmptyIdentifier => {
                warn!(
                    connection_id = %connection_id,
                    "Join with empty username or room ignored"
                );
            }
        }
    }
}

#[async_trait]
impl MessageHandler for WebsocketReceiveHandler {
    async fn handle_message(&self, connection_id: &str, message: String) {
        debug!(
            connection_id = %connection_id,
            message = %message,
            "Received frame"
        );

        match serde_json::from_str::<ClientEvent>(&message) {
            Ok(event) => match event {
                ClientEvent::JoinRoom { username, room } => {
                    self.handle_join(connection_id, &username, &room).await;
                }
                ClientEvent::SendMessage(payload) => {
                    // The relay targets the room named in the payload,
                    // not the room the sender joined
                    let room = payload
                        .get("room")
                        .and_then(|v| v.as_str())
                        .map(str::to_string);
                    match room {
                        Some(room) => {
                            self.event_bus
                                .emit_to_room(
                                    &room,
                                    RoomEvent::ChatMessage {
                                        sender_connection_id: connection_id.to_string(),
                                        message: payload,
                                    },
                                )
                                .await;
                        }
                        None => {
                            warn!(
                                connection_id = %connection_id,
                                "Message without a room id dropped"
                            );
                        }
                    }
                }
                ClientEvent::MessageDelivered {
                    message_id,
                    sender_id,
                } => {
                    // Addressed to one connection; never touches a room channel
                    let update = ServerEvent::UpdateMessageStatus {
                        message_id,
                        status: MessageStatus::Delivered,
                    };
                    match serde_json::to_string(&update) {
                        Ok(frame) => {
                            self.connection_manager
                                .send_to_connection(&sender_id, &frame)
                                .await;
                        }
                        Err(e) => {
                            warn!(error = %e, "Failed to serialize status update");
                        }
                    }
                }
                ClientEvent::MessagesRead { room } => {
                    self.event_bus
                        .emit_to_room(
                            &room,
                            RoomEvent::MessagesRead {
                                reader_connection_id: connection_id.to_string(),
                            },
                        )
                        .await;
                }
                ClientEvent::Typing { room, username } => {
                    self.event_bus
                        .emit_to_room(
                            &room,
                            RoomEvent::TypingStarted {
                                connection_id: connection_id.to_string(),
                                username,
                            },
                        )
                        .await;
                }
                ClientEvent::StopTyping { room } => {
                    self.event_bus
                        .emit_to_room(
                            &room,
                            RoomEvent::TypingStopped {
                                connection_id: connection_id.to_string(),
                            },
                        )
                        .await;
                }
            },
            Err(e) => {
                warn!(
                    connection_id = %connection_id,
                    error = %e,
                    "Failed to parse WebSocket frame"
                );
            }
        }
    }
}

/// WebSocket endpoint: GET /ws, no authentication. Each upgrade gets a
/// fresh connection id; the client joins a room afterwards with a
/// join_room event.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
) -> Response {
    let connection_id = uuid::Uuid::new_v4().to_string();

    info!(
        connection_id = %connection_id,
        "WebSocket connection requested"
    );

    ws.on_upgrade(move |socket| handle_websocket_connection(socket, connection_id, app_state))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(
    socket: axum::extract::ws::WebSocket,
    connection_id: String,
    app_state: AppState,
) {
    info!(
        connection_id = %connection_id,
        "WebSocket connection established"
    );

    // Outbound channel (relay -> client)
    let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel::<String>();

    app_state
        .connection_manager
        .add_connection(connection_id.clone(), outbound_sender)
        .await;

    let message_handler = Arc::new(WebsocketReceiveHandler::new(
        Arc::clone(&app_state.room_registry),
        Arc::clone(&app_state.connection_manager),
        app_state.event_bus.clone(),
        Arc::clone(&app_state.room_subscriber),
    ));

    let connection = Connection::new(
        connection_id.clone(),
        Box::new(socket),
        outbound_receiver,
        message_handler,
    );

    // Run the connection until disconnect
    match connection.run().await {
        Ok(()) => {
            info!(
                connection_id = %connection_id,
                "WebSocket connection closed cleanly"
            );
        }
        Err(e) => {
            warn!(
                connection_id = %connection_id,
                error = ?e,
                "WebSocket connection error"
            );
        }
    }

    // Cleanup: drop the outbound route, then let the room's subscription
    // task run the membership removal and leave notifications. A
    // connection that never joined emits nothing.
    app_state
        .connection_manager
        .remove_connection(&connection_id)
        .await;

    if let Some(room_id) = app_state.room_registry.room_of(&connection_id).await {
        app_state
            .event_bus
            .emit_to_room(
                &room_id,
                RoomEvent::MemberDisconnected {
                    connection_id: connection_id.clone(),
                },
            )
            .await;
    }

    info!(
        connection_id = %connection_id,
        "WebSocket disconnect handled"
    );
}
