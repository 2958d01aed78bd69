use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Failed to load system prompt: {0}")]
    Prompt(String),

    #[error("Failed to build provider client: {0}")]
    Provider(String),

    #[error("Voice pipeline error: {0}")]
    Pipeline(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AgentResult<T> = Result<T, AgentError>;
