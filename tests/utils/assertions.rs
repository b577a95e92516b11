//! Test assertion helpers - fluent API for verifying received frames
#![allow(dead_code)] // Test utilities may not all be used in every test

use serde_json::Value;

use super::setup::TestSetup;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct MessageAssertion<'a> {
    setup: &'a TestSetup,
    connections: Vec<&'a str>,
}

impl<'a> MessageAssertion<'a> {
    /// Create an assertion for every member joined during setup
    pub fn for_all_members(setup: &'a TestSetup) -> Self {
        let connections = setup.members.iter().map(|(c, _)| c.as_str()).collect();
        Self { setup, connections }
    }

    /// Create an assertion for specific connections
    pub fn for_connections(setup: &'a TestSetup, connections: Vec<&'a str>) -> Self {
        Self { setup, connections }
    }

    /// Assert that each connection's oldest unconsumed frame carries the
    /// named event, and that every connection got the same payload.
    /// Consumes the frame and returns the payload of the first.
    pub async fn received_event(self, expected_event: &str) -> EventContent {
        let mut payloads = vec![];

        for connection in &self.connections {
            let frame = self
                .setup
                .mock_conn_manager
                .consume_message_for(connection)
                .await;
            assert!(
                frame.is_some(),
                "{} should have received a frame",
                connection
            );

            let value: Value = serde_json::from_str(&frame.unwrap()).unwrap();
            assert_eq!(
                value["event"], expected_event,
                "{} received wrong event",
                connection
            );
            payloads.push(value["data"].clone());
        }

        if payloads.len() > 1 {
            let first = &payloads[0];
            for (i, payload) in payloads.iter().enumerate().skip(1) {
                assert_eq!(
                    payload, first,
                    "Connection {} payload differs from connection {}",
                    self.connections[i], self.connections[0]
                );
            }
        }

        EventContent {
            data: payloads[0].clone(),
        }
    }

    /// Assert that the connections received no frames at all
    pub async fn received_nothing(self) {
        for connection in &self.connections {
            let frames = self.setup.mock_conn_manager.get_messages_for(connection).await;
            assert!(
                frames.is_empty(),
                "{} should not have received any frames, got: {:?}",
                connection,
                frames
            );
        }
    }
}

/// Payload of a consumed frame, for field-level assertions
pub struct EventContent {
    pub data: Value,
}

impl EventContent {
    pub fn field(&self, name: &str) -> &Value {
        &self.data[name]
    }
}
