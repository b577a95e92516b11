use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::models::RoomModel;

/// Result of attempting to join a room
#[derive(Debug, Clone)]
pub enum JoinRoomResult {
    /// Joined the room; `created` is true when this join created the room
    Joined { room: RoomModel, created: bool },
    /// The connection already belongs to a room; the join is ignored
    AlreadyJoined { current_room: String },
    /// Empty username or room id; the join is silently rejected
    EmptyIdentifier,
}

/// Result of removing a connection from its room
#[derive(Debug, Clone)]
pub enum LeaveRoomResult {
    /// Removed from the room; `room` is the state after removal
    Left { username: String, room: RoomModel },
    /// Removed and the member list became empty, so the room was deleted
    RoomDeleted { username: String, room_id: String },
    /// The connection never joined a room
    NotJoined,
}

/// Trait for room registry operations.
///
/// The registry owns both the room -> members mapping and the reverse
/// connection -> room association used for disconnect cleanup. A
/// connection id appears in at most one room's member list at a time.
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Adds the connection to the room's member list, creating the room
    /// if absent
    async fn join(&self, connection_id: &str, username: &str, room_id: &str) -> JoinRoomResult;

    /// Removes the connection from its room, if any. Idempotent.
    async fn leave(&self, connection_id: &str) -> LeaveRoomResult;

    /// Snapshot of a room's current state
    async fn get_room(&self, room_id: &str) -> Option<RoomModel>;

    /// The room a connection currently belongs to
    async fn room_of(&self, connection_id: &str) -> Option<String>;

    /// Snapshot of every live room
    async fn list_rooms(&self) -> Vec<RoomModel>;
}

#[derive(Debug, Clone)]
struct Membership {
    room_id: String,
    username: String,
}

#[derive(Default)]
struct RegistryState {
    rooms: HashMap<String, RoomModel>,
    // connection id -> (room id, username)
    memberships: HashMap<String, Membership>,
}

/// In-memory implementation of RoomRegistry.
///
/// Both maps are guarded by one lock so membership and room state can
/// never disagree; mutations are short and non-yielding.
pub struct InMemoryRoomRegistry {
    state: Mutex<RegistryState>,
}

impl Default for InMemoryRoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoomRegistry {
    /// Creates a new empty registry
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
        }
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    #[instrument(skip(self))]
    async fn join(&self, connection_id: &str, username: &str, room_id: &str) -> JoinRoomResult {
        if username.is_empty() || room_id.is_empty() {
            warn!(
                connection_id = %connection_id,
                "Join with empty identifier rejected"
            );
            return JoinRoomResult::EmptyIdentifier;
        }

        let mut state = self.state.lock().unwrap();

        if let Some(existing) = state.memberships.get(connection_id) {
            warn!(
                connection_id = %connection_id,
                current_room = %existing.room_id,
                requested_room = %room_id,
                "Connection already in a room, join ignored"
            );
            return JoinRoomResult::AlreadyJoined {
                current_room: existing.room_id.clone(),
            };
        }

        let created = !state.rooms.contains_key(room_id);
        let room = state
            .rooms
            .entry(room_id.to_string())
            .or_insert_with(|| RoomModel::new(room_id));
        room.add_member(connection_id.to_string(), username.to_string());
        let updated_room = room.clone();

        state.memberships.insert(
            connection_id.to_string(),
            Membership {
                room_id: room_id.to_string(),
                username: username.to_string(),
            },
        );

        info!(
            room_id = %room_id,
            connection_id = %connection_id,
            username = %username,
            member_count = updated_room.member_count(),
            created = created,
            "Connection joined room"
        );

        JoinRoomResult::Joined {
            room: updated_room,
            created,
        }
    }

    #[instrument(skip(self))]
    async fn leave(&self, connection_id: &str) -> LeaveRoomResult {
        let mut state = self.state.lock().unwrap();

        let Some(membership) = state.memberships.remove(connection_id) else {
            debug!(connection_id = %connection_id, "Connection had no room, leave is a no-op");
            return LeaveRoomResult::NotJoined;
        };

        let Some(room) = state.rooms.get_mut(&membership.room_id) else {
            // Membership without a room should not happen under one lock
            warn!(
                connection_id = %connection_id,
                room_id = %membership.room_id,
                "Membership pointed at a missing room"
            );
            return LeaveRoomResult::NotJoined;
        };

        room.remove_member(connection_id);

        if room.members.is_empty() {
            state.rooms.remove(&membership.room_id);
            info!(
                room_id = %membership.room_id,
                connection_id = %connection_id,
                "Last member left, room deleted"
            );
            return LeaveRoomResult::RoomDeleted {
                username: membership.username,
                room_id: membership.room_id,
            };
        }

        let updated_room = room.clone();

        info!(
            room_id = %membership.room_id,
            connection_id = %connection_id,
            username = %membership.username,
            member_count = updated_room.member_count(),
            "Connection left room"
        );

        LeaveRoomResult::Left {
            username: membership.username,
            room: updated_room,
        }
    }

    #[instrument(skip(self))]
    async fn get_room(&self, room_id: &str) -> Option<RoomModel> {
        let state = self.state.lock().unwrap();
        state.rooms.get(room_id).cloned()
    }

    #[instrument(skip(self))]
    async fn room_of(&self, connection_id: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state
            .memberships
            .get(connection_id)
            .map(|m| m.room_id.clone())
    }

    #[instrument(skip(self))]
    async fn list_rooms(&self) -> Vec<RoomModel> {
        let state = self.state.lock().unwrap();
        state.rooms.values().cloned().collect()
    }
}
