use config::{Config, Environment};
use serde::Deserialize;
use thiserror::Error;

use myna::providers::groq::GROQ_DEFAULT_MODEL;
use myna::room::livekit::LiveKitConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {env_var}")]
    MissingEnvVar { env_var: String },

    #[error(transparent)]
    Other(#[from] config::ConfigError),
}

/// Worker settings, read from the process environment.
///
/// `GROQ_API_KEY` is deliberately not here: the library resolves it at
/// session start, with participant metadata as the fallback.
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Port for the liveness probe responder.
    #[serde(default = "default_port")]
    pub port: u16,
    pub livekit_url: String,
    pub livekit_api_key: String,
    pub livekit_api_secret: String,
    #[serde(default = "default_room")]
    pub livekit_room: String,
    #[serde(default = "default_model")]
    pub myna_model: String,
    #[serde(default = "default_prompt_path")]
    pub myna_prompt: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(Environment::default().try_parsing(true))
            .build()?;

        match config.try_deserialize() {
            Ok(settings) => Ok(settings),
            Err(err) => {
                tracing::debug!("Configuration error: {:?}", &err);

                let error_str = err.to_string();
                if error_str.starts_with("missing field") {
                    // Extract field name from error message "missing field `x`"
                    let field = error_str
                        .trim_start_matches("missing field `")
                        .trim_end_matches('`');
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    })
                } else if let config::ConfigError::NotFound(field) = &err {
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    })
                } else {
                    Err(ConfigError::Other(err))
                }
            }
        }
    }

    pub fn livekit_config(&self) -> LiveKitConfig {
        LiveKitConfig {
            url: self.livekit_url.clone(),
            api_key: self.livekit_api_key.clone(),
            api_secret: self.livekit_api_secret.clone(),
        }
    }
}

fn to_env_var(field: &str) -> String {
    field.to_uppercase()
}

fn default_port() -> u16 {
    8080
}

fn default_room() -> String {
    "playground".to_string()
}

fn default_model() -> String {
    GROQ_DEFAULT_MODEL.to_string()
}

fn default_prompt_path() -> String {
    myna::prompt::DEFAULT_PROMPT_PATH.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const VARS: &[&str] = &[
        "PORT",
        "LIVEKIT_URL",
        "LIVEKIT_API_KEY",
        "LIVEKIT_API_SECRET",
        "LIVEKIT_ROOM",
        "MYNA_MODEL",
        "MYNA_PROMPT",
    ];

    fn clean_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn set_required() {
        env::set_var("LIVEKIT_URL", "wss://example.livekit.cloud");
        env::set_var("LIVEKIT_API_KEY", "lk-key");
        env::set_var("LIVEKIT_API_SECRET", "lk-secret");
    }

    #[test]
    #[serial]
    fn test_default_settings() {
        clean_env();
        set_required();

        let settings = Settings::new().unwrap();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.livekit_url, "wss://example.livekit.cloud");
        assert_eq!(settings.livekit_room, "playground");
        assert_eq!(settings.myna_model, "compound-beta");
        assert_eq!(settings.myna_prompt, "system_prompt.txt");

        clean_env();
    }

    #[test]
    #[serial]
    fn test_environment_override() {
        clean_env();
        set_required();
        env::set_var("PORT", "9000");
        env::set_var("LIVEKIT_ROOM", "lobby");
        env::set_var("MYNA_MODEL", "compound-beta-mini");

        let settings = Settings::new().unwrap();
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.livekit_room, "lobby");
        assert_eq!(settings.myna_model, "compound-beta-mini");

        clean_env();
    }

    #[test]
    #[serial]
    fn test_missing_livekit_url_is_reported_as_env_var() {
        clean_env();
        env::set_var("LIVEKIT_API_KEY", "lk-key");
        env::set_var("LIVEKIT_API_SECRET", "lk-secret");

        let err = Settings::new().unwrap_err();
        match err {
            ConfigError::MissingEnvVar { env_var } => assert_eq!(env_var, "LIVEKIT_URL"),
            other => panic!("unexpected error: {other:?}"),
        }

        clean_env();
    }

    #[test]
    #[serial]
    fn test_livekit_config_conversion() {
        clean_env();
        set_required();

        let settings = Settings::new().unwrap();
        let config = settings.livekit_config();
        assert_eq!(config.url, "wss://example.livekit.cloud");
        assert_eq!(config.api_key, "lk-key");
        assert_eq!(config.api_secret, "lk-secret");

        clean_env();
    }
}
