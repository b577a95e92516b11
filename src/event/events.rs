use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Events that flow through a room's relay channel.
///
/// Emitted by per-connection receive handlers, consumed in order by the
/// room's subscription task. The room id is the channel key and is not
/// repeated inside the event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RoomEvent {
    /// A connection joined the room (registry already updated)
    MemberJoined {
        connection_id: String,
        username: String,
    },

    /// A connection dropped; the handler performs the registry removal
    MemberDisconnected { connection_id: String },

    /// A chat message to relay. The payload is the raw client JSON and is
    /// forwarded without validation.
    ChatMessage {
        sender_connection_id: String,
        message: Value,
    },

    /// A client's window regained focus; all of the room's other members
    /// learn that this connection has read its messages
    MessagesRead { reader_connection_id: String },

    /// A member started typing
    TypingStarted {
        connection_id: String,
        username: String,
    },

    /// A member stopped typing
    TypingStopped { connection_id: String },
}
