//! Core configuration types and data structures

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main assistant configuration snapshot
///
/// Snapshots are read-only inputs to the completion core. They are produced
/// by an external settings surface and observed through a
/// [`ConfigStore`](crate::ConfigStore); the core never writes them back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssistantConfig {
    /// URL patterns the assistant activates on, `*` is a wildcard
    pub urls: Vec<String>,
    /// Chat completions endpoint (OpenAI-compatible)
    pub api_url: String,
    /// Bearer token; empty means completion requests are never issued
    pub api_key: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Debounce wait in seconds, typically 1-10
    pub wait_time: f64,
    /// System prompt for inline completion requests
    pub prompt: String,
    /// Prompt template for image descriptions; the `[TextOfParagraph]`
    /// placeholder is replaced with the paragraph text at dispatch time
    #[serde(default)]
    pub image_prompt: String,
    /// Conversational tools offered on text selections
    #[serde(default)]
    pub talk_tools: Vec<TalkTool>,
}

/// A conversational tool the user can invoke on selected text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TalkTool {
    pub id: String,
    pub name: String,
    pub icon: String,
    /// System prompt applied when this tool is invoked
    pub prompt: String,
    pub enabled: bool,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            wait_time: 2.0,
            prompt: "Continue the user's text naturally. Reply with the continuation only."
                .to_string(),
            image_prompt: String::new(),
            talk_tools: Vec::new(),
        }
    }
}

impl AssistantConfig {
    /// Debounce wait as a [`Duration`]
    ///
    /// Non-finite or negative wait times collapse to zero rather than
    /// panicking; validation reports them separately.
    pub fn wait_duration(&self) -> Duration {
        if self.wait_time.is_finite() && self.wait_time > 0.0 {
            Duration::from_secs_f64(self.wait_time)
        } else {
            Duration::ZERO
        }
    }

    /// Whether an API key is present
    ///
    /// A missing key is not a validation failure: the session simply never
    /// issues requests (ConfigurationMissing is a silent downgrade, not an
    /// error surface).
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Check the snapshot for settings that can never work
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::Validation("apiUrl must not be empty".to_string()));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Validation("model must not be empty".to_string()));
        }
        if !self.wait_time.is_finite() || self.wait_time <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "waitTime must be a positive number of seconds, got {}",
                self.wait_time
            )));
        }
        Ok(())
    }

    /// Enabled talk tools, in configured order
    pub fn enabled_talk_tools(&self) -> impl Iterator<Item = &TalkTool> {
        self.talk_tools.iter().filter(|t| t.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AssistantConfig {
        AssistantConfig {
            api_key: "sk-test".to_string(),
            wait_time: 1.5,
            ..AssistantConfig::default()
        }
    }

    #[test]
    fn wait_duration_from_seconds() {
        assert_eq!(config().wait_duration(), Duration::from_millis(1500));
    }

    #[test]
    fn wait_duration_clamps_invalid_values() {
        let mut cfg = config();
        cfg.wait_time = -3.0;
        assert_eq!(cfg.wait_duration(), Duration::ZERO);
        cfg.wait_time = f64::NAN;
        assert_eq!(cfg.wait_duration(), Duration::ZERO);
    }

    #[test]
    fn missing_api_key_is_not_a_validation_error() {
        let mut cfg = config();
        cfg.api_key = "   ".to_string();
        assert!(!cfg.has_api_key());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_endpoint() {
        let mut cfg = config();
        cfg.api_url = String::new();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_nonpositive_wait_time() {
        let mut cfg = config();
        cfg.wait_time = 0.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn deserializes_camel_case_snapshot() {
        let json = r#"{
            "urls": ["https://docs.google.com/*"],
            "apiUrl": "https://api.example.com/v1/chat/completions",
            "apiKey": "sk-abc",
            "model": "gpt-4o",
            "waitTime": 2,
            "prompt": "continue"
        }"#;
        let cfg: AssistantConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.api_key, "sk-abc");
        assert_eq!(cfg.wait_time, 2.0);
        assert!(cfg.talk_tools.is_empty());
    }

    #[test]
    fn enabled_talk_tools_filters_disabled() {
        let mut cfg = config();
        cfg.talk_tools = vec![
            TalkTool {
                id: "rewrite".to_string(),
                name: "Rewrite".to_string(),
                icon: "pen".to_string(),
                prompt: "Rewrite this text".to_string(),
                enabled: true,
            },
            TalkTool {
                id: "summarize".to_string(),
                name: "Summarize".to_string(),
                icon: "list".to_string(),
                prompt: "Summarize this text".to_string(),
                enabled: false,
            },
        ];
        let enabled: Vec<_> = cfg.enabled_talk_tools().map(|t| t.id.as_str()).collect();
        assert_eq!(enabled, vec!["rewrite"]);
    }
}
