use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Delivery state of a chat message, as seen by one observer.
///
/// Variant order is the transition order; `Ord` makes the monotonicity
/// guard a plain comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Sent,
    Delivered,
    Read,
}

/// Client -> server events.
///
/// Wire frames are adjacently tagged: `{"event": "<name>", "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    JoinRoom {
        username: String,
        room: String,
    },

    /// Raw message object; relayed as-is apart from the senderId stamp
    SendMessage(Value),

    #[serde(rename_all = "camelCase")]
    MessageDelivered {
        message_id: String,
        sender_id: String,
    },

    MessagesRead {
        room: String,
    },

    Typing {
        room: String,
        username: String,
    },

    StopTyping {
        room: String,
    },
}

/// Server -> client events, same framing as [`ClientEvent`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A relayed message object, or a `{type: "notification", message}`
    /// presence announcement
    ReceiveMessage(Value),

    #[serde(rename_all = "camelCase")]
    UpdateMessageStatus {
        message_id: String,
        status: MessageStatus,
    },

    #[serde(rename_all = "camelCase")]
    UpdateReadStatus {
        reader_id: String,
    },

    /// Human-readable typing indicator; empty string clears it
    TypingStatus(String),

    #[serde(rename_all = "camelCase")]
    RoomData {
        user_count: usize,
        users: Vec<String>,
    },
}

/// Helper constructors for server events
impl ServerEvent {
    /// A synthetic, non-authored presence announcement
    pub fn notification(text: impl Into<String>) -> Self {
        ServerEvent::ReceiveMessage(json!({
            "type": "notification",
            "message": text.into(),
        }))
    }

    /// The typing indicator text for a member
    pub fn typing(username: &str) -> Self {
        ServerEvent::TypingStatus(format!("{} is typing...", username))
    }

    /// Clears the typing indicator
    pub fn typing_cleared() -> Self {
        ServerEvent::TypingStatus(String::new())
    }
}

/// The message shape chat clients produce and consume.
///
/// The server relays the raw JSON without parsing it; this struct exists
/// for clients (see [`crate::mailbox::Mailbox`]) and tests. `senderId` is
/// absent on the author's own copy and stamped by the server on relayed
/// copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    #[serde(rename = "type")]
    pub message_type: String,
    pub room: String,
    pub author: String,
    pub message: String,
    pub time: String,
    pub status: MessageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
}

impl ChatMessage {
    /// A freshly authored message in the `sent` state
    pub fn new(id: &str, room: &str, author: &str, message: &str, time: &str) -> Self {
        Self {
            id: id.to_string(),
            message_type: "message".to_string(),
            room: room.to_string(),
            author: author.to_string(),
            message: message.to_string(),
            time: time.to_string(),
            status: MessageStatus::Sent,
            sender_id: None,
        }
    }
}
