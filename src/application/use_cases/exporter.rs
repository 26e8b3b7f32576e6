// ============================================================
// TABLE EXPORT
// ============================================================
// Render a parsed table back out as CSV text or JSON rows

use crate::domain::table::{RowObject, Table};
use crate::domain::value::CellValue;
use serde::{Deserialize, Serialize};

/// Formats a table can be exported to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Export result handed back to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub format: ExportFormat,
    pub data: ExportData,
    pub file_name: String,
}

/// Either rendered CSV text or the raw row objects
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExportData {
    Rows(Vec<RowObject>),
    Text(String),
}

/// Handles table export
pub struct TableExporter;

impl TableExporter {
    /// Export the table under a download name derived from the source file
    pub fn export(table: &Table, file_name: &str, format: ExportFormat) -> ExportPayload {
        match format {
            ExportFormat::Json => ExportPayload {
                format,
                data: ExportData::Rows(
                    (0..table.row_count()).map(|i| table.row_object(i)).collect(),
                ),
                file_name: format!("{}.json", base_name(file_name)),
            },
            ExportFormat::Csv => ExportPayload {
                format,
                data: ExportData::Text(Self::to_csv(table)),
                file_name: format!("{}.csv", base_name(file_name)),
            },
        }
    }

    /// Render CSV text: header line of column names, one line per row,
    /// absent cells as empty fields. Only values containing a comma are
    /// quoted; embedded quotes and newlines pass through untouched.
    pub fn to_csv(table: &Table) -> String {
        let mut lines = Vec::with_capacity(table.row_count() + 1);
        lines.push(table.column_names().join(","));

        for row in &table.rows {
            let line = row
                .iter()
                .map(render_csv_cell)
                .collect::<Vec<String>>()
                .join(",");
            lines.push(line);
        }

        lines.join("\n")
    }
}

fn render_csv_cell(cell: &CellValue) -> String {
    match cell {
        CellValue::Text(text) if text.contains(',') => format!("\"{}\"", text),
        other => other.to_string(),
    }
}

/// Stem before the first dot, mirroring the download-name convention
fn base_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}
