// Public API - what other modules can use
pub use models::{Member, RoomModel};
pub use registry::{InMemoryRoomRegistry, JoinRoomResult, LeaveRoomResult, RoomRegistry};

pub mod models;
pub mod registry;
