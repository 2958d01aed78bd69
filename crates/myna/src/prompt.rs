use std::path::Path;

use crate::errors::{AgentError, AgentResult};

/// Instructions file shipped at the repository root.
pub const DEFAULT_PROMPT_PATH: &str = "system_prompt.txt";

/// Load the agent's instructions from a prompt file.
pub fn load_system_prompt<P: AsRef<Path>>(path: P) -> AgentResult<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path)
        .map_err(|e| AgentError::Prompt(format!("{}: {}", path.display(), e)))
}
