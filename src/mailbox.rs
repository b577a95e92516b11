use crate::websockets::{ChatMessage, MessageStatus};

/// One client's view of a room's conversation: an ordered append-only
/// log of messages with observer-driven status annotations.
///
/// Entries are never removed or reordered; handlers only append or
/// upgrade an entry's status. Status moves in one direction
/// (sent -> delivered -> read) and a stale update never wins, so a
/// `delivered` acknowledgment arriving after a read receipt leaves the
/// entry at `read`.
pub struct Mailbox {
    owner: String,
    entries: Vec<ChatMessage>,
}

impl Mailbox {
    /// Creates an empty mailbox owned by the given display name
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            entries: Vec::new(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Append a message in arrival order. Own messages enter as `sent`;
    /// relayed messages keep whatever the author stamped.
    pub fn append(&mut self, message: ChatMessage) {
        self.entries.push(message);
    }

    /// Upgrade one entry's status, driven by an update_message_status
    /// event. Downgrades are ignored; unknown ids are a no-op.
    pub fn apply_status(&mut self, message_id: &str, status: MessageStatus) {
        if let Some(entry) = self.entries.iter_mut().find(|m| m.id == message_id) {
            if entry.status < status {
                entry.status = status;
            }
        }
    }

    /// Apply a room-wide read receipt, driven by an update_read_status
    /// event: every message this mailbox's owner authored becomes
    /// `read`. One focus event covers all prior messages; there is no
    /// per-message read acknowledgment.
    pub fn apply_read(&mut self) {
        for entry in &mut self.entries {
            if entry.author == self.owner && entry.status < MessageStatus::Read {
                entry.status = MessageStatus::Read;
            }
        }
    }

    /// All entries in arrival order
    pub fn entries(&self) -> &[ChatMessage] {
        &self.entries
    }

    /// Current status of the entry with the given id
    pub fn status_of(&self, message_id: &str) -> Option<MessageStatus> {
        self.entries
            .iter()
            .find(|m| m.id == message_id)
            .map(|m| m.status)
    }
}
