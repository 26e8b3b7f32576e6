use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::analysis_config::{AnalysisConfig, DEFAULT_PAGE_SIZE, MAX_FILE_SIZE};
use crate::domain::error::{AppError, Result};
use crate::domain::narration_config::NarrationConfig;

const DEFAULT_CONFIG_FILE: &str = "datalyzer.toml";
const ENV_PREFIX: &str = "DATALYZER_";

/// Runtime settings for the analysis service.
///
/// Values come from three layers, later ones winning: built-in defaults,
/// the `datalyzer.toml` file, then `DATALYZER_`-prefixed environment
/// variables (nested fields use `__`, e.g. `DATALYZER_NARRATION__MODEL`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub max_file_size: usize,
    pub default_page_size: usize,
    pub owner: String,
    pub storage_root: PathBuf,
    pub narration: NarrationConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            default_page_size: DEFAULT_PAGE_SIZE,
            owner: "local".to_string(),
            storage_root: PathBuf::from("data/blobs"),
            narration: NarrationConfig::default(),
        }
    }
}

impl ServiceConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let config: ServiceConfig = Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| AppError::ValidationError(format!("Invalid configuration: {}", e)))?;

        config.analysis().validate().map_err(AppError::ValidationError)?;
        Ok(config)
    }

    /// Analysis tunables with the service-level limits applied.
    pub fn analysis(&self) -> AnalysisConfig {
        AnalysisConfig {
            max_file_size: self.max_file_size,
            default_page_size: self.default_page_size,
            ..AnalysisConfig::default()
        }
    }
}
