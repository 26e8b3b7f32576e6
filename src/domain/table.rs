// ============================================================
// TABLE TYPES
// ============================================================
// Parsed, typed representation of an uploaded tabular file

use super::value::CellValue;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// Semantic type inferred for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    String,
    Date,
    Boolean,
    Unknown,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Number => "number",
            ColumnType::String => "string",
            ColumnType::Date => "date",
            ColumnType::Boolean => "boolean",
            ColumnType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Name and inferred type of a single column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// Parsed table: ordered columns plus rows of cells.
///
/// Invariant: every row holds exactly one cell per column, in column order.
/// Parsers pad short rows with `Absent` and drop cells beyond the header.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<ColumnInfo>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    /// Valid zero-row, zero-column table for empty inputs
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// All cells of one column, in row order
    pub fn column_values(&self, index: usize) -> Vec<&CellValue> {
        self.rows.iter().map(|row| &row[index]).collect()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Column name to inferred type, for the file metadata record
    pub fn column_types(&self) -> HashMap<String, String> {
        self.columns
            .iter()
            .map(|c| (c.name.clone(), c.column_type.as_str().to_string()))
            .collect()
    }

    /// Materialize one row as an ordered name/value mapping
    pub fn row_object(&self, index: usize) -> RowObject {
        RowObject(
            self.columns
                .iter()
                .zip(self.rows[index].iter())
                .map(|(column, cell)| (column.name.clone(), cell.clone()))
                .collect(),
        )
    }

    pub fn schema(&self) -> TableSchema {
        TableSchema {
            columns: self.columns.clone(),
            row_count: self.row_count(),
            column_count: self.column_count(),
        }
    }
}

/// One row keyed by column name, serialized as a JSON object in column order
#[derive(Debug, Clone, PartialEq)]
pub struct RowObject(pub Vec<(String, CellValue)>);

impl Serialize for RowObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Schema summary returned after parsing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    pub columns: Vec<ColumnInfo>,
    pub row_count: usize,
    pub column_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::new(
            vec![
                ColumnInfo::new("name", ColumnType::String),
                ColumnInfo::new("city", ColumnType::String),
            ],
            vec![
                vec![
                    CellValue::Text("Alice".to_string()),
                    CellValue::Text("NYC".to_string()),
                ],
                vec![CellValue::Text("Bob".to_string()), CellValue::Absent],
            ],
        )
    }

    #[test]
    fn test_schema_counts() {
        let schema = sample_table().schema();
        assert_eq!(schema.row_count, 2);
        assert_eq!(schema.column_count, 2);
        assert_eq!(schema.columns[0].name, "name");
    }

    #[test]
    fn test_row_object_keeps_column_order() {
        let table = sample_table();
        let json = serde_json::to_string(&table.row_object(0)).unwrap();
        assert_eq!(json, r#"{"name":"Alice","city":"NYC"}"#);
    }

    #[test]
    fn test_absent_serializes_as_null() {
        let table = sample_table();
        let json = serde_json::to_string(&table.row_object(1)).unwrap();
        assert_eq!(json, r#"{"name":"Bob","city":null}"#);
    }

    #[test]
    fn test_column_type_labels() {
        assert_eq!(ColumnType::Number.to_string(), "number");
        assert_eq!(
            serde_json::to_string(&ColumnType::Unknown).unwrap(),
            r#""unknown""#
        );
    }
}
