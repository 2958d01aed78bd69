//! The Groq compound adapter.
//!
//! Wraps Groq's non-streaming, tool-executing chat completion endpoint
//! behind the host's streaming [`ChatModel`] contract. Each invocation makes
//! exactly one network call; the reply is handed back as a single-chunk
//! stream. Search results the model gathered server side are forwarded to
//! the attached room before the stream is returned.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use super::base::{ChatModel, ChatStream, ConnectOptions, ToolDefinition, DEFAULT_CONNECT_OPTIONS};
use super::utils::messages_to_groq_spec;
use crate::errors::{AgentError, AgentResult};
use crate::models::message::ChatContext;
use crate::publisher::publish_tool_results;
use crate::room::RoomHandle;
use crate::search::extract_search_results;

pub const GROQ_DEFAULT_HOST: &str = "https://api.groq.com/openai";
pub const GROQ_DEFAULT_MODEL: &str = "compound-beta";

/// Sentinel used when the provider response carries no identifier.
pub const UNKNOWN_REQUEST_ID: &str = "unknown_request_id";

/// Spoken in place of the reply when the provider call fails.
pub const APOLOGY: &str = "I apologize, but I encountered an error processing your request.";

#[derive(Clone)]
pub struct GroqProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
}

impl GroqProviderConfig {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            host: GROQ_DEFAULT_HOST.to_string(),
            api_key: api_key.into(),
            model: GROQ_DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = host.into();
        self
    }
}

impl fmt::Debug for GroqProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroqProviderConfig")
            .field("host", &self.host)
            .field("api_key", &"[redacted]")
            .field("model", &self.model)
            .finish()
    }
}

// Completion response schema. Every field is optional so a partially formed
// response degrades instead of failing the turn.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChatCompletion {
    id: Option<String>,
    choices: Vec<Choice>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Choice {
    message: CompletionMessage,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CompletionMessage {
    content: Option<String>,
    executed_tools: Option<Value>,
}

pub struct GroqChatModel {
    client: Client,
    config: GroqProviderConfig,
    room: Option<Arc<dyn RoomHandle>>,
}

impl GroqChatModel {
    pub fn new(config: GroqProviderConfig) -> AgentResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_CONNECT_OPTIONS.timeout)
            .build()
            .map_err(|e| AgentError::Provider(e.to_string()))?;

        Ok(Self {
            client,
            config,
            room: None,
        })
    }

    /// Attach the room that receives out-of-band search results.
    pub fn with_room(mut self, room: Arc<dyn RoomHandle>) -> Self {
        self.room = Some(room);
        self
    }

    async fn post(&self, payload: Value, timeout: Duration) -> Result<ChatCompletion> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.host.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .timeout(timeout)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status => Err(anyhow!("Groq request failed: {}", status)),
        }
    }
}

#[async_trait]
impl ChatModel for GroqChatModel {
    async fn chat(
        &self,
        chat_ctx: &ChatContext,
        tools: &[ToolDefinition],
        options: Option<&ConnectOptions>,
    ) -> ChatStream {
        let options = options.copied().unwrap_or(DEFAULT_CONNECT_OPTIONS);

        // The compound models run their tools server side; host-declared
        // tools are not sent along.
        if !tools.is_empty() {
            debug!(count = tools.len(), "ignoring host-declared tools");
        }

        let messages = messages_to_groq_spec(chat_ctx);
        debug!(messages = messages.len(), model = %self.config.model, "making Groq completion call");

        let payload = json!({
            "model": self.config.model,
            "messages": messages,
            "stream": false,
        });

        let completion = match self.post(payload, options.timeout).await {
            Ok(completion) => completion,
            Err(err) => {
                error!(error = %err, "Groq completion call failed");
                return ChatStream::single(UNKNOWN_REQUEST_ID, APOLOGY);
            }
        };

        let request_id = completion
            .id
            .unwrap_or_else(|| UNKNOWN_REQUEST_ID.to_string());

        let Some(choice) = completion.choices.into_iter().next() else {
            warn!(request_id, "Groq completion carried no choices");
            return ChatStream::single(request_id, APOLOGY);
        };

        let results = extract_search_results(choice.message.executed_tools.as_ref());
        if !results.is_empty() {
            publish_tool_results(self.room.as_deref(), &results).await;
        }

        let content = choice.message.content.unwrap_or_default();
        ChatStream::single(request_id, content)
    }
}
