// ============================================================
// ANALYSIS CONFIGURATION
// ============================================================
// Tunable thresholds for type inference and anomaly detection

use serde::{Deserialize, Serialize};

/// Fraction of coercible values a candidate type must reach to win
pub const TYPE_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Fence width in interquartile ranges
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Quantile positions used for the IQR fence
pub const LOWER_QUANTILE: f64 = 0.25;
pub const UPPER_QUANTILE: f64 = 0.75;

/// Smallest sample the detector will fence
pub const MIN_ANOMALY_SAMPLES: usize = 4;

/// Upload size cap in bytes
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Page size applied when a browse request does not set one
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Configuration for table analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Fraction of values that must coerce before a column adopts a
    /// candidate type (default: 0.8, strict)
    pub type_confidence_threshold: f64,

    /// Width of the anomaly fence in interquartile ranges (default: 1.5)
    pub iqr_multiplier: f64,

    /// Lower quantile of the fence (default: 0.25)
    pub lower_quantile: f64,

    /// Upper quantile of the fence (default: 0.75)
    pub upper_quantile: f64,

    /// Minimum finite values required before fencing (default: 4)
    pub min_anomaly_samples: usize,

    /// Largest accepted upload in bytes (default: 10 MiB)
    pub max_file_size: usize,

    /// Page size when a browse request omits one (default: 50)
    pub default_page_size: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            type_confidence_threshold: TYPE_CONFIDENCE_THRESHOLD,
            iqr_multiplier: IQR_MULTIPLIER,
            lower_quantile: LOWER_QUANTILE,
            upper_quantile: UPPER_QUANTILE,
            min_anomaly_samples: MIN_ANOMALY_SAMPLES,
            max_file_size: MAX_FILE_SIZE,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AnalysisConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Inner-fence detection, flags mild outliers as well
    pub fn sensitive() -> Self {
        Self {
            iqr_multiplier: 1.0,
            ..Default::default()
        }
    }

    /// Outer-fence detection, flags only extreme outliers
    pub fn conservative() -> Self {
        Self {
            iqr_multiplier: 3.0,
            ..Default::default()
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.type_confidence_threshold) {
            return Err("type_confidence_threshold must be between 0.0 and 1.0".to_string());
        }
        if self.iqr_multiplier <= 0.0 {
            return Err("iqr_multiplier must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.lower_quantile) {
            return Err("lower_quantile must be between 0.0 and 1.0".to_string());
        }
        if !(0.0..=1.0).contains(&self.upper_quantile) {
            return Err("upper_quantile must be between 0.0 and 1.0".to_string());
        }
        if self.lower_quantile >= self.upper_quantile {
            return Err("lower_quantile must be < upper_quantile".to_string());
        }
        if self.min_anomaly_samples == 0 {
            return Err("min_anomaly_samples must be > 0".to_string());
        }
        if self.max_file_size == 0 {
            return Err("max_file_size must be > 0".to_string());
        }
        if self.default_page_size == 0 {
            return Err("default_page_size must be > 0".to_string());
        }
        Ok(())
    }
}
