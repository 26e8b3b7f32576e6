// ============================================================
// STATISTICS TYPES
// ============================================================

use super::anomaly::ColumnAnomalies;
use super::table::ColumnType;
use serde::{Deserialize, Serialize};

/// Descriptive statistics for a numeric sample.
///
/// All value fields are `None` when the sample is empty; `count` is the
/// number of finite values that contributed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericStatistics {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub count: usize,
}

impl NumericStatistics {
    pub fn empty() -> Self {
        Self {
            mean: None,
            median: None,
            std_dev: None,
            min: None,
            max: None,
            count: 0,
        }
    }
}

/// Descriptive statistics for a non-numeric sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringStatistics {
    pub count: usize,
    pub unique_count: usize,
    pub null_count: usize,
}

/// Per-column entry of the analysis payload.
///
/// Numeric columns carry the full descriptive block, other columns only
/// the count fields. Serialized untagged so each variant flattens into a
/// plain JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnStatistics {
    Numeric(NumericColumnStatistics),
    Textual(TextualColumnStatistics),
}

impl ColumnStatistics {
    pub fn column_name(&self) -> &str {
        match self {
            ColumnStatistics::Numeric(stats) => &stats.column_name,
            ColumnStatistics::Textual(stats) => &stats.column_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericColumnStatistics {
    pub column_name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub count: usize,
    pub unique_count: usize,
    pub null_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextualColumnStatistics {
    pub column_name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub count: usize,
    pub unique_count: usize,
    pub null_count: usize,
}

/// Full analysis of a parsed table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPayload {
    pub statistics: Vec<ColumnStatistics>,
    pub anomalies: Vec<ColumnAnomalies>,
}
