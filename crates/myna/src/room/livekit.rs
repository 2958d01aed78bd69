use std::fmt;

use async_trait::async_trait;
use livekit_api::services::room::{RoomClient, SendDataOptions};
use livekit_protocol::data_packet::Kind as DataPacketKind;

use super::{Participant, RoomError, RoomHandle};

#[derive(Clone)]
pub struct LiveKitConfig {
    pub url: String,
    pub api_key: String,
    pub api_secret: String,
}

impl fmt::Debug for LiveKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveKitConfig")
            .field("url", &self.url)
            .field("api_key", &"[redacted]")
            .field("api_secret", &"[redacted]")
            .finish()
    }
}

/// Production room handle backed by the LiveKit server API.
pub struct LiveKitRoom {
    client: RoomClient,
    room_name: String,
}

impl LiveKitRoom {
    pub fn new<S: Into<String>>(config: &LiveKitConfig, room_name: S) -> Self {
        let client = RoomClient::with_api_key(&config.url, &config.api_key, &config.api_secret);
        Self {
            client,
            room_name: room_name.into(),
        }
    }
}

#[async_trait]
impl RoomHandle for LiveKitRoom {
    fn name(&self) -> &str {
        &self.room_name
    }

    async fn publish_data(&self, payload: Vec<u8>) -> Result<(), RoomError> {
        let options = SendDataOptions {
            kind: DataPacketKind::Reliable,
            destination_sids: Vec::new(),
            destination_identities: Vec::new(),
            topic: None,
        };
        self.client
            .send_data(&self.room_name, payload, options)
            .await
            .map_err(|e| RoomError::Publish(e.to_string()))
    }

    async fn participants(&self) -> Result<Vec<Participant>, RoomError> {
        let infos = self
            .client
            .list_participants(&self.room_name)
            .await
            .map_err(|e| RoomError::Service(e.to_string()))?;

        Ok(infos
            .into_iter()
            .map(|info| Participant {
                identity: info.identity,
                metadata: info.metadata,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_credentials() {
        let config = LiveKitConfig {
            url: "wss://example.livekit.cloud".into(),
            api_key: "lk-key".into(),
            api_secret: "lk-secret".into(),
        };
        let debug = format!("{:?}", config);
        assert!(debug.contains("wss://example.livekit.cloud"));
        assert!(!debug.contains("lk-key"));
        assert!(!debug.contains("lk-secret"));
    }
}
