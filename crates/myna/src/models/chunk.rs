use serde::{Deserialize, Serialize};

use super::role::Role;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceDelta {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// The atomic unit of the host framework's streamed chat output
pub struct ChatChunk {
    pub id: String,
    pub delta: ChoiceDelta,
}

impl ChatChunk {
    pub fn assistant<I: Into<String>, C: Into<String>>(id: I, content: C) -> Self {
        ChatChunk {
            id: id.into(),
            delta: ChoiceDelta {
                role: Role::Assistant,
                content: content.into(),
            },
        }
    }
}
