// ============================================================
// XLSX PARSER
// ============================================================
// Parse the first worksheet of an Excel workbook into a typed table

use crate::application::use_cases::type_inference::TypeInferencer;
use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::error::{AppError, Result};
use crate::domain::table::Table;
use crate::domain::value::CellValue;
use calamine::{Data, Reader, Xlsx};
use std::io::Cursor;

/// XLSX parser over in-memory bytes
pub struct XlsxTableParser {
    config: AnalysisConfig,
}

impl Default for XlsxTableParser {
    fn default() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }
}

impl XlsxTableParser {
    /// Create a new XLSX parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set analysis thresholds used for column typing
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// Parse workbook bytes.
    ///
    /// Only the first worksheet is read. Its first row names the columns;
    /// cells beyond the header width are dropped and missing trailing
    /// cells come back absent. A workbook with no rows is a valid empty
    /// table.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Table> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| AppError::FormatError(format!("Failed to open Excel file: {}", e)))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| AppError::FormatError("No worksheet found".to_string()))?
            .map_err(|e| AppError::FormatError(format!("Failed to read Excel range: {}", e)))?;

        let mut sheet_rows = range.rows();
        let names: Vec<String> = match sheet_rows.next() {
            Some(header) => header.iter().map(|cell| cell_value(cell).to_string()).collect(),
            None => return Ok(Table::empty()),
        };

        let mut rows = Vec::new();
        for row in sheet_rows {
            let cells: Vec<CellValue> = (0..names.len())
                .map(|column| row.get(column).map(cell_value).unwrap_or(CellValue::Absent))
                .collect();
            rows.push(cells);
        }

        let columns = TypeInferencer::new(self.config.clone()).infer_columns(&names, &rows);
        tracing::info!("Parsed XLSX table: {} rows, {} columns", rows.len(), columns.len());
        Ok(Table::new(columns, rows))
    }
}

/// Map one worksheet cell onto the analysis value model.
///
/// Numbers stay numeric, date cells keep their raw serial value, booleans
/// become their text tokens so column typing can recognize them, and error
/// cells are treated as absent.
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Absent,
        Data::String(text) => CellValue::from_text(text),
        Data::Float(value) => CellValue::Number(*value),
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Bool(value) => CellValue::Text(value.to_string()),
        Data::DateTime(value) => CellValue::Number(value.as_f64()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::from_text(text),
        Data::Error(_) => CellValue::Absent,
    }
}
