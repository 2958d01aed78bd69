//! In-tree voice pipeline implementation.
//!
//! The audio leg (speech-to-text, text-to-speech, VAD) belongs to the native
//! room SDK and stays outside this crate; this pipeline is the binding point
//! for it. It keeps the per-session chat history, drives the chat model once
//! per turn and logs every utterance it would render.

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::Mutex;
use tracing::info;

use myna::errors::{AgentError, AgentResult};
use myna::models::message::{ChatContext, Message};
use myna::providers::base::ChatModel;
use myna::session::VoicePipeline;

struct PipelineState {
    llm: Arc<dyn ChatModel>,
    history: ChatContext,
}

pub struct LoggingPipeline {
    state: Mutex<Option<PipelineState>>,
}

impl LoggingPipeline {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(None),
        }
    }

    /// Drive one chat turn: append the transcribed user text to the history,
    /// ask the model, and speak the reply.
    pub async fn respond(&self, user_text: &str) -> AgentResult<String> {
        let reply = {
            let mut guard = self.state.lock().await;
            let state = guard
                .as_mut()
                .ok_or_else(|| AgentError::Pipeline("pipeline not started".to_string()))?;

            state.history.push(Message::user().with_text(user_text));

            let mut stream = state.llm.chat(&state.history, &[], None).await;
            let reply = match stream.next().await {
                Some(chunk) => chunk.delta.content,
                None => String::new(),
            };

            state.history.push(Message::assistant().with_text(&reply));
            reply
        };

        self.say(&reply).await?;
        Ok(reply)
    }
}

impl Default for LoggingPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VoicePipeline for LoggingPipeline {
    async fn start(&self, instructions: &str, llm: Arc<dyn ChatModel>) -> AgentResult<()> {
        let history = ChatContext::new().with_message(Message::system().with_text(instructions));
        *self.state.lock().await = Some(PipelineState { llm, history });
        info!("voice pipeline started");
        Ok(())
    }

    async fn say(&self, text: &str) -> AgentResult<()> {
        info!(text, "speaking");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use myna::providers::base::{ChatStream, ConnectOptions, ToolDefinition};

    struct ScriptedModel {
        reply: String,
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn chat(
            &self,
            _chat_ctx: &ChatContext,
            _tools: &[ToolDefinition],
            _options: Option<&ConnectOptions>,
        ) -> ChatStream {
            ChatStream::single("scripted", self.reply.clone())
        }
    }

    #[tokio::test]
    async fn test_respond_before_start_is_an_error() {
        let pipeline = LoggingPipeline::new();
        let err = pipeline.respond("hello").await.unwrap_err();
        assert!(matches!(err, AgentError::Pipeline(_)));
    }

    #[tokio::test]
    async fn test_respond_speaks_the_model_reply() {
        let pipeline = LoggingPipeline::new();
        let llm = Arc::new(ScriptedModel {
            reply: "pong".to_string(),
        });
        pipeline.start("Be concise.", llm).await.unwrap();

        let reply = pipeline.respond("ping").await.unwrap();
        assert_eq!(reply, "pong");
    }
}
