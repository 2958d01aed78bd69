use std::sync::Mutex;

use async_trait::async_trait;

use super::{Participant, RoomError, RoomHandle};

/// A mock room that records published payloads and serves scripted
/// participants for testing.
pub struct MockRoom {
    name: String,
    participants: Vec<Participant>,
    fail_publish: bool,
    fail_participants: bool,
    published: Mutex<Vec<Vec<u8>>>,
}

impl MockRoom {
    pub fn new() -> Self {
        Self {
            name: "mock-room".to_string(),
            participants: Vec::new(),
            fail_publish: false,
            fail_participants: false,
            published: Mutex::new(Vec::new()),
        }
    }

    pub fn with_participants(mut self, participants: Vec<Participant>) -> Self {
        self.participants = participants;
        self
    }

    pub fn failing_publishes(mut self) -> Self {
        self.fail_publish = true;
        self
    }

    pub fn failing_participant_listing(mut self) -> Self {
        self.fail_participants = true;
        self
    }

    /// Payloads published so far, in publish order.
    pub fn published(&self) -> Vec<Vec<u8>> {
        self.published.lock().unwrap().clone()
    }
}

impl Default for MockRoom {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomHandle for MockRoom {
    fn name(&self) -> &str {
        &self.name
    }

    async fn publish_data(&self, payload: Vec<u8>) -> Result<(), RoomError> {
        if self.fail_publish {
            return Err(RoomError::Publish("mock publish failure".to_string()));
        }
        self.published.lock().unwrap().push(payload);
        Ok(())
    }

    async fn participants(&self) -> Result<Vec<Participant>, RoomError> {
        if self.fail_participants {
            return Err(RoomError::Service("mock listing failure".to_string()));
        }
        Ok(self.participants.clone())
    }
}
