// ============================================================
// TYPE INFERENCE
// ============================================================
// Infer the semantic type of a column from its cell values

use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::table::{ColumnInfo, ColumnType};
use crate::domain::value::CellValue;
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DATETIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}(:\d{2}(\.\d+)?)?(Z|[+-]\d{2}:?\d{2})$").unwrap()
});

/// Date-only layouts accepted by the date probe
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y", "%m/%d/%Y"];

/// Date plus time layouts
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Type inferencer for parsed columns
pub struct TypeInferencer {
    config: AnalysisConfig,
}

impl TypeInferencer {
    /// Create a new inferencer
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Infer the type of one column.
    ///
    /// Absent cells are ignored. A candidate type wins when strictly more
    /// than the configured fraction of the remaining values coerce to it,
    /// checked in priority order: number, boolean, date. Columns with no
    /// present values are `Unknown`, everything else falls back to
    /// `String`.
    pub fn infer(&self, values: &[&CellValue]) -> ColumnType {
        let present: Vec<&CellValue> = values
            .iter()
            .filter(|value| !value.is_absent())
            .copied()
            .collect();

        if present.is_empty() {
            return ColumnType::Unknown;
        }

        let total = present.len() as f64;
        let number_count = present
            .iter()
            .filter(|value| value.as_number().map_or(false, f64::is_finite))
            .count();
        let boolean_count = present
            .iter()
            .filter(|value| is_boolean_token(&value.to_string()))
            .count();
        let date_count = present
            .iter()
            .filter(|value| match value {
                CellValue::Text(text) => is_date_text(text),
                _ => false,
            })
            .count();

        let threshold = self.config.type_confidence_threshold;
        if number_count as f64 / total > threshold {
            return ColumnType::Number;
        }
        if boolean_count as f64 / total > threshold {
            return ColumnType::Boolean;
        }
        if date_count as f64 / total > threshold {
            return ColumnType::Date;
        }

        ColumnType::String
    }

    /// Build the typed column list for a freshly parsed table
    pub fn infer_columns(&self, names: &[String], rows: &[Vec<CellValue>]) -> Vec<ColumnInfo> {
        names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let values: Vec<&CellValue> = rows.iter().map(|row| &row[index]).collect();
                ColumnInfo::new(name.clone(), self.infer(&values))
            })
            .collect()
    }
}

impl Default for TypeInferencer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

fn is_boolean_token(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "false" | "1" | "0")
}

fn is_date_text(value: &str) -> bool {
    let s = value.trim();
    if s.is_empty() {
        return false;
    }
    if ISO_DATETIME_PATTERN.is_match(s) {
        return true;
    }
    if DATE_FORMATS
        .iter()
        .any(|format| NaiveDate::parse_from_str(s, format).is_ok())
    {
        return true;
    }
    DATETIME_FORMATS
        .iter()
        .any(|format| NaiveDateTime::parse_from_str(s, format).is_ok())
}
