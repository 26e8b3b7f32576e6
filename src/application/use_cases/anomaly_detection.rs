// ============================================================
// ANOMALY DETECTION
// ============================================================
// IQR fence over a numeric sample

use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::anomaly::{AnomalyReport, AnomalyThreshold};

/// IQR based outlier detector
pub struct AnomalyDetector {
    config: AnalysisConfig,
}

impl AnomalyDetector {
    /// Create a new detector
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Flag values outside the IQR fence.
    ///
    /// Quartiles are taken at the floored rank positions of the sorted
    /// sample, without interpolation. Samples smaller than the configured
    /// minimum return an empty report with a zero threshold. Reported
    /// anomalies keep their input order.
    pub fn detect(&self, values: &[f64]) -> AnomalyReport {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.len() < self.config.min_anomaly_samples {
            return AnomalyReport::empty();
        }

        let mut sorted = finite.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let n = sorted.len();
        let q1_index = ((n as f64 * self.config.lower_quantile).floor() as usize).min(n - 1);
        let q3_index = ((n as f64 * self.config.upper_quantile).floor() as usize).min(n - 1);

        let q1 = sorted[q1_index];
        let q3 = sorted[q3_index];
        let iqr = q3 - q1;

        let lower = q1 - self.config.iqr_multiplier * iqr;
        let upper = q3 + self.config.iqr_multiplier * iqr;

        let anomalies = finite
            .into_iter()
            .filter(|v| *v < lower || *v > upper)
            .collect();

        AnomalyReport {
            anomalies,
            threshold: AnomalyThreshold { lower, upper },
        }
    }
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}
