//! The room boundary: everything the agent needs from the real-time session.
//!
//! The handle is shared read-mostly between the chat adapter and the result
//! publisher; turns are sequential per session so no locking is involved.

use async_trait::async_trait;
use thiserror::Error;

pub mod livekit;

#[cfg(test)]
pub mod mock;

#[derive(Error, Debug)]
pub enum RoomError {
    #[error("Failed to publish data to room: {0}")]
    Publish(String),

    #[error("Room service error: {0}")]
    Service(String),
}

/// A participant currently known to the room, with its metadata side channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub identity: String,
    /// Raw metadata string, JSON by convention but not guaranteed.
    pub metadata: String,
}

/// The subset of the room the agent talks to.
#[async_trait]
pub trait RoomHandle: Send + Sync {
    fn name(&self) -> &str;

    /// Publish an out-of-band byte payload to the room's data channel.
    async fn publish_data(&self, payload: Vec<u8>) -> Result<(), RoomError>;

    /// List the participants currently connected to the room.
    async fn participants(&self) -> Result<Vec<Participant>, RoomError>;
}
