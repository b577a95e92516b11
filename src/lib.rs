// Library crate for the chat relay server
// This file exposes the public API for integration tests

pub mod event;
pub mod mailbox;
pub mod room;
pub mod shared;
pub mod websockets;

// Re-export commonly used types for easier access in tests
pub use event::{EventBus, RoomEvent, RoomEventHandler, RoomSubscription};
pub use mailbox::Mailbox;
pub use room::{
    models::{Member, RoomModel},
    registry::{InMemoryRoomRegistry, RoomRegistry},
};
pub use websockets::{
    ChatMessage, ClientEvent, ConnectionManager, InMemoryConnectionManager, MessageHandler,
    MessageStatus, ServerEvent, WebSocketRoomSubscriber, WebsocketReceiveHandler,
};
