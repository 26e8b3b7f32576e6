// ============================================================
// ANOMALY TYPES
// ============================================================

use serde::{Deserialize, Serialize};

/// IQR fence bounds; values strictly outside are anomalous
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyThreshold {
    pub lower: f64,
    pub upper: f64,
}

impl AnomalyThreshold {
    pub fn zero() -> Self {
        Self {
            lower: 0.0,
            upper: 0.0,
        }
    }
}

/// Outlier detection result for one numeric sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub anomalies: Vec<f64>,
    pub threshold: AnomalyThreshold,
}

impl AnomalyReport {
    /// Result for samples too small to fence
    pub fn empty() -> Self {
        Self {
            anomalies: Vec::new(),
            threshold: AnomalyThreshold::zero(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anomalies.is_empty()
    }
}

/// Anomalous values of a named column, as reported in the analysis payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnAnomalies {
    pub column_name: String,
    pub anomalies: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_shape() {
        let report = AnomalyReport {
            anomalies: vec![100.0],
            threshold: AnomalyThreshold {
                lower: -5.0,
                upper: 35.0,
            },
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({
                "anomalies": [100.0],
                "threshold": { "lower": -5.0, "upper": 35.0 }
            })
        );
    }

    #[test]
    fn test_column_anomalies_shape() {
        let report = ColumnAnomalies {
            column_name: "price".to_string(),
            anomalies: vec![100.0, -3.5],
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({ "columnName": "price", "anomalies": [100.0, -3.5] })
        );
    }

    #[test]
    fn test_empty_report() {
        let report = AnomalyReport::empty();
        assert!(report.is_empty());
        assert_eq!(report.threshold, AnomalyThreshold::zero());
    }
}
