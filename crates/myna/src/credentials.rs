//! Credential resolution for the Groq API key.
//!
//! Two-step lookup, first match wins: the process environment is checked
//! first, then the metadata of every participant currently in the room. The
//! participant scan only makes sense after the room connection is
//! established.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::room::RoomHandle;

pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Metadata field participants may use to hand the agent an API key.
pub const METADATA_KEY: &str = "groq_api_key";

/// Read the API key from the process environment.
pub fn api_key_from_env() -> Option<String> {
    let key = std::env::var(API_KEY_ENV).ok()?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    info!("using {} from environment", API_KEY_ENV);
    Some(key.to_string())
}

/// Scan participant metadata for an API key.
///
/// Metadata that is not JSON or lacks the key is skipped per participant; a
/// failed participant listing ends the scan without a key. Never fatal.
pub async fn api_key_from_participants(room: &dyn RoomHandle) -> Option<String> {
    let participants = match room.participants().await {
        Ok(participants) => participants,
        Err(err) => {
            warn!(error = %err, "could not list participants for credential scan");
            return None;
        }
    };

    for participant in participants {
        if participant.metadata.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(&participant.metadata) {
            Ok(metadata) => {
                if let Some(key) = metadata.get(METADATA_KEY).and_then(Value::as_str) {
                    info!(
                        identity = %participant.identity,
                        "using api key from participant metadata"
                    );
                    return Some(key.to_string());
                }
            }
            Err(err) => {
                warn!(
                    identity = %participant.identity,
                    error = %err,
                    "skipping participant with malformed metadata"
                );
            }
        }
    }

    debug!("no api key found in any participant metadata");
    None
}

/// Resolve the API key, environment first, participants second.
pub async fn resolve_api_key(room: &dyn RoomHandle) -> Option<String> {
    if let Some(key) = api_key_from_env() {
        return Some(key);
    }
    api_key_from_participants(room).await
}
