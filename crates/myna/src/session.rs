//! The per-job session entrypoint.
//!
//! `run_session` wires credentials, instructions, the chat model and the
//! voice pipeline together for one room, then greets the user. Every error
//! is caught at the top of the entrypoint and logged; nothing escapes to the
//! caller.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use tracing::{error, info};

use crate::credentials::resolve_api_key;
use crate::errors::AgentResult;
use crate::prompt::{load_system_prompt, DEFAULT_PROMPT_PATH};
use crate::providers::base::ChatModel;
use crate::providers::groq::{GroqChatModel, GroqProviderConfig, GROQ_DEFAULT_MODEL};
use crate::publisher::publish_greeting_finished;
use crate::room::RoomHandle;

/// Spoken once at session start, before the first user turn.
pub const GREETING: &str = "Hi, how can I help you today?";

/// The session-host boundary: owns audio, VAD and turn taking. It invokes
/// the chat model once per turn and speaks the streamed chunks.
#[async_trait]
pub trait VoicePipeline: Send + Sync {
    async fn start(&self, instructions: &str, llm: Arc<dyn ChatModel>) -> AgentResult<()>;

    async fn say(&self, text: &str) -> AgentResult<()>;
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub model: String,
    pub prompt_path: PathBuf,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            model: GROQ_DEFAULT_MODEL.to_string(),
            prompt_path: PathBuf::from(DEFAULT_PROMPT_PATH),
        }
    }
}

/// Run one voice session against `room`. Never returns an error: fatal
/// conditions are logged and the session simply ends.
pub async fn run_session(
    room: Arc<dyn RoomHandle>,
    pipeline: &dyn VoicePipeline,
    options: &SessionOptions,
) {
    if let Err(err) = try_run_session(room, pipeline, options).await {
        error!(error = %err, "fatal error in session entrypoint");
    }
}

async fn try_run_session(
    room: Arc<dyn RoomHandle>,
    pipeline: &dyn VoicePipeline,
    options: &SessionOptions,
) -> AgentResult<()> {
    let Some(api_key) = resolve_api_key(room.as_ref()).await else {
        // Without a credential the session must not start; abort cleanly.
        error!("no GROQ_API_KEY available from environment or participant metadata, exiting");
        return Ok(());
    };

    let instructions = load_system_prompt(&options.prompt_path)?;

    let config = GroqProviderConfig::new(api_key).with_model(&options.model);
    let llm = Arc::new(GroqChatModel::new(config)?.with_room(room.clone()));

    pipeline.start(&instructions, llm).await?;
    info!(room = room.name(), "session started");

    pipeline.say(GREETING).await?;
    publish_greeting_finished(room.as_ref()).await;

    Ok(())
}
