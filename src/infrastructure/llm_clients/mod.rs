mod openai_compat;

pub use openai_compat::OpenAiCompatClient;

use crate::domain::error::Result;
use crate::domain::narration_config::NarrationConfig;
use async_trait::async_trait;

/// Chat backend that turns an analysis summary into prose.
#[async_trait]
pub trait LLMClient {
    async fn generate(&self, config: &NarrationConfig, system: &str, user: &str)
        -> Result<String>;
}
