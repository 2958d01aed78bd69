use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{FusedStream, Stream};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::chunk::ChatChunk;
use crate::models::message::ChatContext;

/// Connection policy applied when the host supplies no options of its own.
pub const DEFAULT_CONNECT_OPTIONS: ConnectOptions = ConnectOptions {
    timeout: Duration::from_secs(30),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectOptions {
    pub timeout: Duration,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        DEFAULT_CONNECT_OPTIONS
    }
}

/// A tool the host framework makes available to the model.
///
/// The compound models execute their tools server side, so implementations
/// may carry this only for contract compatibility with the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolDefinition {
    pub fn new<N: Into<String>, D: Into<String>>(name: N, description: D, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// Base trait for chat models driving a voice session.
///
/// `chat` is total: failures never surface as errors to the caller, they are
/// substituted into the returned stream's content instead.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn chat(
        &self,
        chat_ctx: &ChatContext,
        tools: &[ToolDefinition],
        options: Option<&ConnectOptions>,
    ) -> ChatStream;
}

#[derive(Debug)]
enum StreamState {
    Pending(ChatChunk),
    Exhausted,
}

/// A single-shot chat stream.
///
/// The first poll yields the one chunk the turn produced; every later poll
/// signals normal end of stream. This is a degenerate stream satisfying the
/// host's streaming contract, not token-level delivery.
#[derive(Debug)]
pub struct ChatStream {
    request_id: String,
    state: StreamState,
}

impl ChatStream {
    /// Build a stream that yields exactly one assistant chunk carrying
    /// `content`, tagged with `request_id`.
    pub fn single<I: Into<String>, C: Into<String>>(request_id: I, content: C) -> Self {
        let request_id = request_id.into();
        let chunk = ChatChunk::assistant(request_id.clone(), content);
        Self {
            request_id,
            state: StreamState::Pending(chunk),
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

impl Stream for ChatStream {
    type Item = ChatChunk;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<ChatChunk>> {
        let this = self.get_mut();
        match std::mem::replace(&mut this.state, StreamState::Exhausted) {
            StreamState::Pending(chunk) => Poll::Ready(Some(chunk)),
            StreamState::Exhausted => Poll::Ready(None),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            StreamState::Pending(_) => (1, Some(1)),
            StreamState::Exhausted => (0, Some(0)),
        }
    }
}

impl FusedStream for ChatStream {
    fn is_terminated(&self) -> bool {
        matches!(self.state, StreamState::Exhausted)
    }
}
