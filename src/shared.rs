use std::sync::Arc;

use crate::event::{EventBus, RoomEventHandler};
use crate::room::registry::RoomRegistry;
use crate::websockets::ConnectionManager;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub room_registry: Arc<dyn RoomRegistry>,
    pub connection_manager: Arc<dyn ConnectionManager>,
    pub event_bus: EventBus,
    pub room_subscriber: Arc<dyn RoomEventHandler>,
}

impl AppState {
    pub fn new(
        room_registry: Arc<dyn RoomRegistry>,
        connection_manager: Arc<dyn ConnectionManager>,
        event_bus: EventBus,
        room_subscriber: Arc<dyn RoomEventHandler>,
    ) -> Self {
        Self {
            room_registry,
            connection_manager,
            event_bus,
            room_subscriber,
        }
    }
}
