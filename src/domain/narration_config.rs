use serde::{Deserialize, Serialize};

/// Connection settings for the narration model endpoint.
///
/// Points at any OpenAI-compatible chat completions server. The default
/// targets a local inference server so the crate works without credentials.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NarrationConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:1234/v1".to_string(),
            model: "local-model".to_string(),
            api_key: None,
            max_tokens: Some(2048),
            temperature: Some(0.7),
        }
    }
}

impl NarrationConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_server() {
        let config = NarrationConfig::default();
        assert_eq!(config.base_url, "http://localhost:1234/v1");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = NarrationConfig::default()
            .with_base_url("https://openrouter.ai/api/v1")
            .with_model("gpt-4o-mini")
            .with_api_key("sk-test");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
    }
}
