// ============================================================
// CSV PARSER
// ============================================================
// Parse CSV bytes into a typed table

use crate::application::use_cases::type_inference::TypeInferencer;
use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::error::{AppError, Result};
use crate::domain::table::Table;
use crate::domain::value::CellValue;
use csv::{ReaderBuilder, Trim};

/// CSV parser with delimiter detection
pub struct CsvTableParser {
    /// Explicit delimiter; detected from the header line when unset
    delimiter: Option<u8>,

    /// Whether to trim whitespace from values
    trim: bool,

    config: AnalysisConfig,
}

impl Default for CsvTableParser {
    fn default() -> Self {
        Self {
            delimiter: None,
            trim: true,
            config: AnalysisConfig::default(),
        }
    }
}

impl CsvTableParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a fixed delimiter instead of detecting one
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Set whether to trim whitespace
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Set analysis thresholds used for column typing
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// Decode and parse raw CSV bytes
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Table> {
        let content = decode_text(bytes);
        self.parse_content(&content)
    }

    /// Parse CSV content from string.
    ///
    /// The first row names the columns, blank lines are skipped, short
    /// rows are padded with absent cells and cells beyond the header are
    /// dropped. Empty input is a valid zero-row, zero-column table.
    pub fn parse_content(&self, content: &str) -> Result<Table> {
        if content.trim().is_empty() {
            return Ok(Table::empty());
        }

        let delimiter = match self.delimiter {
            Some(delimiter) => delimiter,
            None => {
                let detected = Self::detect_delimiter(content);
                tracing::info!("Detected CSV delimiter: {:?}", detected as char);
                detected
            }
        };

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::FormatError(format!("Failed to read CSV headers: {}", e)))?
            .clone();
        let names: Vec<String> = headers.iter().map(|name| name.to_string()).collect();

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::FormatError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            let cells: Vec<CellValue> = (0..names.len())
                .map(|column| CellValue::from_text(record.get(column).unwrap_or("")))
                .collect();
            rows.push(cells);
        }

        let columns = TypeInferencer::new(self.config.clone()).infer_columns(&names, &rows);
        tracing::info!("Parsed CSV table: {} rows, {} columns", rows.len(), columns.len());
        Ok(Table::new(columns, rows))
    }

    /// Detect the delimiter from the header line.
    ///
    /// The candidate with the highest occurrence count wins; ties keep the
    /// earlier candidate, so a lone comma beats a lone semicolon.
    pub fn detect_delimiter(content: &str) -> u8 {
        let header_line = content.lines().next().unwrap_or("");
        let candidates = [b',', b';', b'\t', b'|'];

        let mut best_delimiter = b',';
        let mut best_count = 0usize;

        for &delimiter in &candidates {
            let count = header_line.bytes().filter(|&byte| byte == delimiter).count();
            if count > best_count {
                best_count = count;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}

/// Decode bytes as UTF-8, stripping a BOM and replacing invalid sequences
fn decode_text(bytes: &[u8]) -> String {
    let (text, _, _) = encoding_rs::UTF_8.decode(bytes);
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::exporter::TableExporter;
    use crate::domain::table::ColumnType;

    #[test]
    fn test_parse_simple_csv() {
        let content = "name,age,salary\nJohn,30,50000\nJane,25,60000";
        let table = CsvTableParser::new().parse_content(content).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.columns[0].name, "name");
        assert_eq!(table.rows[0][0], CellValue::Text("John".to_string()));
    }

    #[test]
    fn test_column_types_inferred() {
        let content = "name,age,salary\nJohn,30,50000\nJane,25,60000";
        let table = CsvTableParser::new().parse_content(content).unwrap();

        assert_eq!(table.columns[0].column_type, ColumnType::String);
        assert_eq!(table.columns[1].column_type, ColumnType::Number);
        assert_eq!(table.columns[2].column_type, ColumnType::Number);
    }

    #[test]
    fn test_empty_input_is_valid_empty_table() {
        let table = CsvTableParser::new().parse_content("").unwrap();

        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_header_only_gives_untyped_columns() {
        let table = CsvTableParser::new().parse_content("name,age").unwrap();

        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.columns[0].column_type, ColumnType::Unknown);
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(CsvTableParser::detect_delimiter("a,b,c\n1,2,3"), b',');
        assert_eq!(CsvTableParser::detect_delimiter("a;b;c\n1;2;3"), b';');
        assert_eq!(CsvTableParser::detect_delimiter("a\tb\tc"), b'\t');
        assert_eq!(CsvTableParser::detect_delimiter("a|b|c"), b'|');
    }

    #[test]
    fn test_detection_ties_keep_comma() {
        assert_eq!(CsvTableParser::detect_delimiter("a,b;c"), b',');
    }

    #[test]
    fn test_detection_reads_header_line_only() {
        // Semicolons dominate the data rows but the header decides
        let content = "x,y\n1;2;3;4,5\n6;7;8;9,0";
        assert_eq!(CsvTableParser::detect_delimiter(content), b',');
    }

    #[test]
    fn test_blank_lines_skipped() {
        let content = "a,b\n1,2\n\n3,4\n";
        let table = CsvTableParser::new().parse_content(content).unwrap();

        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_short_rows_padded_with_absent() {
        let content = "a,b,c\n1,2";
        let table = CsvTableParser::new().parse_content(content).unwrap();

        assert_eq!(table.rows[0].len(), 3);
        assert!(table.rows[0][2].is_absent());
    }

    #[test]
    fn test_extra_cells_dropped() {
        let content = "a,b\n1,2,3,4";
        let table = CsvTableParser::new().parse_content(content).unwrap();

        assert_eq!(table.rows[0].len(), 2);
    }

    #[test]
    fn test_fields_trimmed() {
        let content = " name , age \n John , 30 ";
        let table = CsvTableParser::new().parse_content(content).unwrap();

        assert_eq!(table.columns[0].name, "name");
        assert_eq!(table.rows[0][0], CellValue::Text("John".to_string()));
    }

    #[test]
    fn test_quoted_field_keeps_comma() {
        let content = "name,notes\nAlice,\"likes, commas\"";
        let table = CsvTableParser::new().parse_content(content).unwrap();

        assert_eq!(
            table.rows[0][1],
            CellValue::Text("likes, commas".to_string())
        );
    }

    #[test]
    fn test_utf8_bom_stripped() {
        let bytes = b"\xef\xbb\xbfname,age\nAlice,30";
        let table = CsvTableParser::new().parse_bytes(bytes).unwrap();

        assert_eq!(table.columns[0].name, "name");
    }

    #[test]
    fn test_invalid_utf8_decodes_lossily() {
        let bytes = b"name\ncaf\xe9";
        let table = CsvTableParser::new().parse_bytes(bytes).unwrap();

        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_export_round_trip_preserves_shape() {
        let content = "name,location\nAlice,\"Lisbon, Portugal\"\nBob,Porto";
        let parser = CsvTableParser::new();
        let table = parser.parse_content(content).unwrap();

        let exported = TableExporter::to_csv(&table);
        let reparsed = parser.parse_content(&exported).unwrap();

        assert_eq!(reparsed.row_count(), table.row_count());
        assert_eq!(reparsed.column_names(), table.column_names());
        assert_eq!(
            reparsed.rows[0][1],
            CellValue::Text("Lisbon, Portugal".to_string())
        );
    }
}
