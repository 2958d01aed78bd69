//! Out-of-band delivery of structured results to the connected room.
//!
//! Everything here is failure-isolated: a publish that cannot be encoded or
//! delivered is logged and dropped, it never fails the turn that raised it.

use serde::Serialize;
use tracing::{debug, warn};

use crate::room::RoomHandle;
use crate::search::SearchResult;

/// Envelope for messages sent over the room's data channel.
///
/// Serializes as `{"type": "tool_results", "data": [...]}` and
/// `{"type": "agent_greeting_finished"}`.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent<'a> {
    ToolResults { data: &'a [SearchResult] },
    AgentGreetingFinished,
}

/// Forward normalized search results to the room.
///
/// A no-op when the room is absent or the list is empty; at most one publish
/// per call.
pub async fn publish_tool_results(room: Option<&dyn RoomHandle>, results: &[SearchResult]) {
    let Some(room) = room else {
        return;
    };
    if results.is_empty() {
        return;
    }

    send_event(room, &AgentEvent::ToolResults { data: results }).await;
    debug!(count = results.len(), room = room.name(), "sent tool results to room");
}

/// Notify the room that the initial greeting has been spoken.
pub async fn publish_greeting_finished(room: &dyn RoomHandle) {
    send_event(room, &AgentEvent::AgentGreetingFinished).await;
    debug!(room = room.name(), "sent greeting-finished notification");
}

async fn send_event(room: &dyn RoomHandle, event: &AgentEvent<'_>) {
    let payload = match serde_json::to_vec(event) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, "failed to encode agent event");
            return;
        }
    };

    if let Err(err) = room.publish_data(payload).await {
        warn!(error = %err, room = room.name(), "failed to publish agent event");
    }
}
