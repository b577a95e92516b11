use std::sync::Arc;
use tokio::time::{sleep, Duration};

use chat_relay::{
    ClientEvent, ConnectionManager, EventBus, InMemoryRoomRegistry, MessageHandler, RoomRegistry,
    WebSocketRoomSubscriber, WebsocketReceiveHandler,
};

use super::mocks::MockConnectionManager;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub event_bus: EventBus,
    pub registry: Arc<InMemoryRoomRegistry>,
    pub mock_conn_manager: Arc<MockConnectionManager>,
    pub input_handler: WebsocketReceiveHandler,
    pub room_id: String,
    /// (connection id, username) pairs joined during build
    pub members: Vec<(String, String)>,
}

pub struct TestSetupBuilder {
    members: Vec<(String, String)>,
    room_id: String,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            members: vec![],
            room_id: "lobby".to_string(),
        }
    }

    pub fn with_members(mut self, members: Vec<(&str, &str)>) -> Self {
        self.members = members
            .into_iter()
            .map(|(c, u)| (c.to_string(), u.to_string()))
            .collect();
        self
    }

    pub fn with_two_members(self) -> Self {
        self.with_members(vec![("conn-a", "alice"), ("conn-b", "bob")])
    }

    pub fn with_three_members(self) -> Self {
        self.with_members(vec![
            ("conn-a", "alice"),
            ("conn-b", "bob"),
            ("conn-c", "carol"),
        ])
    }

    pub async fn build(self) -> TestSetup {
        let event_bus = EventBus::new();
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let mock_conn_manager = Arc::new(MockConnectionManager::new());

        let registry_dyn: Arc<dyn RoomRegistry> = registry.clone();
        let manager_dyn: Arc<dyn ConnectionManager> = mock_conn_manager.clone();

        let room_subscriber = Arc::new(WebSocketRoomSubscriber::new(
            Arc::clone(&registry_dyn),
            Arc::clone(&manager_dyn),
            event_bus.clone(),
        ));

        let input_handler = WebsocketReceiveHandler::new(
            registry_dyn,
            manager_dyn,
            event_bus.clone(),
            room_subscriber,
        );

        // Members join through the real receive handler so the room's
        // subscription task is started exactly as in production
        for (connection_id, username) in &self.members {
            mock_conn_manager.add_connected(connection_id).await;
            let join = ClientEvent::JoinRoom {
                username: username.clone(),
                room: self.room_id.clone(),
            };
            let frame = serde_json::to_string(&join).unwrap();
            input_handler.handle_message(connection_id, frame).await;
            sleep(Duration::from_millis(10)).await;
        }

        // Tests start from a quiet room
        mock_conn_manager.clear_messages().await;

        TestSetup {
            event_bus,
            registry,
            mock_conn_manager,
            input_handler,
            room_id: self.room_id,
            members: self.members,
        }
    }
}
