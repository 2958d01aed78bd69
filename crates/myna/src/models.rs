//! These models represent the objects passed around by the agent
//!
//! There are two related formats we need to interact with:
//! - the host voice framework's chat history and streamed chunks
//! - the Groq wire format, built from the history right before each request
//!
//! The internal structs here are the host-facing side; conversion to the
//! provider wire format lives in `providers::utils`.
pub mod chunk;
pub mod content;
pub mod message;
pub mod role;
