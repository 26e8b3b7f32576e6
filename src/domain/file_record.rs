// ============================================================
// FILE RECORD
// ============================================================
// Metadata persisted for each uploaded tabular file

use crate::domain::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Supported upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabularFormat {
    Csv,
    Xlsx,
}

impl TabularFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TabularFormat::Csv => "csv",
            TabularFormat::Xlsx => "xlsx",
        }
    }
}

impl std::fmt::Display for TabularFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TabularFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(TabularFormat::Csv),
            "xlsx" => Ok(TabularFormat::Xlsx),
            other => Err(AppError::ValidationError(format!(
                "Unsupported file type: {}",
                other
            ))),
        }
    }
}

/// Stored metadata for one uploaded file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: String,
    pub file_name: String,
    /// Key of the raw bytes in blob storage
    pub file_key: String,
    pub file_size: usize,
    pub file_type: TabularFormat,
    pub row_count: usize,
    pub column_count: usize,
    pub column_names: Vec<String>,
    pub column_types: HashMap<String, String>,
    pub uploaded_at: DateTime<Utc>,
}
