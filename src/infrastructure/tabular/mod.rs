// ============================================================
// TABULAR INFRASTRUCTURE LAYER
// ============================================================
// Format detection and parsing of uploaded tabular files

mod csv_parser;
mod xlsx_parser;

pub use csv_parser::CsvTableParser;
pub use xlsx_parser::XlsxTableParser;

use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::error::Result;
use crate::domain::file_record::TabularFormat;
use crate::domain::table::Table;

/// Parse raw upload bytes according to their declared format
pub fn parse_table(bytes: &[u8], format: TabularFormat, config: &AnalysisConfig) -> Result<Table> {
    match format {
        TabularFormat::Csv => CsvTableParser::new()
            .with_config(config.clone())
            .parse_bytes(bytes),
        TabularFormat::Xlsx => XlsxTableParser::new()
            .with_config(config.clone())
            .parse_bytes(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_format() {
        let table = parse_table(
            b"name,age\nAlice,30",
            TabularFormat::Csv,
            &AnalysisConfig::default(),
        )
        .unwrap();
        assert_eq!(table.row_count(), 1);

        let err = parse_table(b"junk", TabularFormat::Xlsx, &AnalysisConfig::default());
        assert!(err.is_err());
    }
}
