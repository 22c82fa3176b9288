//! Review feedback generator configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::OpenAiFeedbackConfig;

/// OpenAI-compatible chat-completions endpoint used to draft feedback.
///
/// Generation is disabled when no API key is set.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackConfig {
    pub api_key: Option<SecretString>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl FeedbackConfig {
    pub fn is_enabled(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Client settings, or `None` when generation is disabled.
    pub fn client_config(&self) -> Option<OpenAiFeedbackConfig> {
        let key = self.api_key.as_ref().filter(|_| self.is_enabled())?;
        Some(
            OpenAiFeedbackConfig::new(key.expose_secret().clone())
                .with_model(self.model.clone())
                .with_base_url(self.base_url.clone())
                .with_timeout(Duration::from_secs(self.timeout_secs))
                .with_max_retries(self.max_retries),
        )
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidFeedbackUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    2
}
