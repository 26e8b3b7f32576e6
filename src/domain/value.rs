// ============================================================
// CELL VALUE
// ============================================================
// Tagged scalar for a single table cell

use serde::{Deserialize, Serialize};

/// A single cell in a parsed table.
///
/// CSV parsing produces `Text`/`Absent` cells only; spreadsheet parsing
/// also produces `Number` for numeric cells. `Absent` covers missing and
/// empty cells and serializes as JSON null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Absent,
}

impl CellValue {
    /// Build a cell from a raw text field; blank fields become absent
    pub fn from_text(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            CellValue::Absent
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    /// Whether the cell counts as absent for statistics
    pub fn is_absent(&self) -> bool {
        match self {
            CellValue::Absent => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Numeric view of the cell, if it coerces to a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            CellValue::Absent => None,
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Absent => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_is_absent() {
        assert_eq!(CellValue::from_text(""), CellValue::Absent);
        assert_eq!(CellValue::from_text("   "), CellValue::Absent);
        assert_eq!(
            CellValue::from_text(" 42 "),
            CellValue::Text("42".to_string())
        );
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(CellValue::Number(3.5).as_number(), Some(3.5));
        assert_eq!(CellValue::Text("30".to_string()).as_number(), Some(30.0));
        assert_eq!(CellValue::Text("-2.5".to_string()).as_number(), Some(-2.5));
        assert_eq!(CellValue::Text("abc".to_string()).as_number(), None);
        assert_eq!(CellValue::Absent.as_number(), None);
    }

    #[test]
    fn test_display_rendering() {
        assert_eq!(CellValue::Number(30.0).to_string(), "30");
        assert_eq!(CellValue::Number(30.5).to_string(), "30.5");
        assert_eq!(CellValue::Text("NYC".to_string()).to_string(), "NYC");
        assert_eq!(CellValue::Absent.to_string(), "");
    }
}
