use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single room member: ephemeral connection id plus the display name
/// supplied at join time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub connection_id: String,
    pub username: String,
}

/// In-memory model for a chat room.
///
/// Member order is join order; presence snapshots list usernames in the
/// same order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomModel {
    pub id: String, // Client-supplied room name
    pub members: Vec<Member>,
    pub created_at: DateTime<Utc>,
}

impl RoomModel {
    /// Creates an empty room with the given client-supplied id
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            members: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Get the current number of members
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Check if a connection is in this room
    pub fn has_member(&self, connection_id: &str) -> bool {
        self.members.iter().any(|m| m.connection_id == connection_id)
    }

    /// Add a member at the end of the join-order list
    pub fn add_member(&mut self, connection_id: String, username: String) {
        if !self.has_member(&connection_id) {
            self.members.push(Member {
                connection_id,
                username,
            });
        }
    }

    /// Remove the member matching the connection id, returning it if present
    pub fn remove_member(&mut self, connection_id: &str) -> Option<Member> {
        let position = self
            .members
            .iter()
            .position(|m| m.connection_id == connection_id)?;
        Some(self.members.remove(position))
    }

    /// Display names in join order, for presence snapshots
    pub fn usernames(&self) -> Vec<String> {
        self.members.iter().map(|m| m.username.clone()).collect()
    }

    /// Connection ids of every member
    pub fn member_ids(&self) -> Vec<String> {
        self.members
            .iter()
            .map(|m| m.connection_id.clone())
            .collect()
    }

    /// Connection ids of every member except the given one
    pub fn member_ids_except(&self, excluded: &str) -> Vec<String> {
        self.members
            .iter()
            .filter(|m| m.connection_id != excluded)
            .map(|m| m.connection_id.clone())
            .collect()
    }
}
