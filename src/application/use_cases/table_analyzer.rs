// ============================================================
// TABLE ANALYZER
// ============================================================
// Full statistical analysis of a parsed table

use crate::application::use_cases::anomaly_detection::AnomalyDetector;
use crate::application::use_cases::column_statistics::StatisticsEngine;
use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::anomaly::ColumnAnomalies;
use crate::domain::statistics::{
    AnalysisPayload, ColumnStatistics, NumericColumnStatistics, TextualColumnStatistics,
};
use crate::domain::table::{ColumnType, Table};
use crate::domain::value::CellValue;
use serde_json::json;
use std::collections::HashSet;

/// Runs the per-column statistics and anomaly passes
pub struct TableAnalyzer {
    detector: AnomalyDetector,
}

impl TableAnalyzer {
    /// Create a new analyzer
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            detector: AnomalyDetector::new(config),
        }
    }

    /// Analyze every column of the table.
    ///
    /// Number columns get the full descriptive block over their coercible
    /// finite values, everything else gets count statistics over rendered
    /// text. The anomaly list carries only columns where the detector
    /// flagged at least one value, in column order.
    pub fn analyze(&self, table: &Table) -> AnalysisPayload {
        let mut statistics = Vec::with_capacity(table.column_count());
        let mut anomalies = Vec::new();

        for (index, column) in table.columns.iter().enumerate() {
            let values = table.column_values(index);

            if column.column_type == ColumnType::Number {
                let numeric = numeric_values(&values);
                let stats = StatisticsEngine::numeric_statistics(&numeric);
                let report = self.detector.detect(&numeric);

                statistics.push(ColumnStatistics::Numeric(NumericColumnStatistics {
                    column_name: column.name.clone(),
                    column_type: column.column_type,
                    mean: stats.mean,
                    median: stats.median,
                    std_dev: stats.std_dev,
                    min: stats.min,
                    max: stats.max,
                    count: stats.count,
                    unique_count: distinct_count(&numeric),
                    null_count: values.len() - stats.count,
                }));

                if !report.is_empty() {
                    anomalies.push(ColumnAnomalies {
                        column_name: column.name.clone(),
                        anomalies: report.anomalies,
                    });
                }
            } else {
                let stats = StatisticsEngine::string_statistics(&values);
                statistics.push(ColumnStatistics::Textual(TextualColumnStatistics {
                    column_name: column.name.clone(),
                    column_type: column.column_type,
                    count: stats.count,
                    unique_count: stats.unique_count,
                    null_count: stats.null_count,
                }));
            }
        }

        tracing::info!(
            "Analyzed table: {} columns, {} with anomalies",
            table.column_count(),
            anomalies.len()
        );

        AnalysisPayload {
            statistics,
            anomalies,
        }
    }

    /// Per-column statistics as ordered JSON pairs for the narration prompt.
    ///
    /// Numeric entries embed the full anomaly report, threshold included.
    pub fn narration_statistics(&self, table: &Table) -> Vec<(String, serde_json::Value)> {
        table
            .columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let values = table.column_values(index);
                let entry = if column.column_type == ColumnType::Number {
                    let numeric = numeric_values(&values);
                    let stats = StatisticsEngine::numeric_statistics(&numeric);
                    let report = self.detector.detect(&numeric);
                    json!({
                        "mean": stats.mean,
                        "median": stats.median,
                        "stdDev": stats.std_dev,
                        "min": stats.min,
                        "max": stats.max,
                        "count": stats.count,
                        "anomalies": report,
                    })
                } else {
                    let stats = StatisticsEngine::string_statistics(&values);
                    json!({
                        "count": stats.count,
                        "uniqueCount": stats.unique_count,
                        "nullCount": stats.null_count,
                    })
                };
                (column.name.clone(), entry)
            })
            .collect()
    }
}

impl Default for TableAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

fn numeric_values(values: &[&CellValue]) -> Vec<f64> {
    values
        .iter()
        .filter_map(|value| value.as_number())
        .filter(|value| value.is_finite())
        .collect()
}

fn distinct_count(values: &[f64]) -> usize {
    // -0.0 and 0.0 count as one value
    values
        .iter()
        .map(|&value| (if value == 0.0 { 0.0f64 } else { value }).to_bits())
        .collect::<HashSet<u64>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::ColumnInfo;

    fn sales_table() -> Table {
        let prices = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];
        let rows = prices
            .iter()
            .enumerate()
            .map(|(i, price)| {
                vec![
                    CellValue::Text(format!("product-{}", i + 1)),
                    CellValue::Text(price.to_string()),
                    CellValue::Text("5".to_string()),
                ]
            })
            .collect();

        Table::new(
            vec![
                ColumnInfo::new("product", ColumnType::String),
                ColumnInfo::new("price", ColumnType::Number),
                ColumnInfo::new("stock", ColumnType::Number),
            ],
            rows,
        )
    }

    #[test]
    fn test_analyze_covers_every_column() {
        let payload = TableAnalyzer::default().analyze(&sales_table());

        assert_eq!(payload.statistics.len(), 3);
        assert_eq!(payload.statistics[0].column_name(), "product");
        assert_eq!(payload.statistics[1].column_name(), "price");
    }

    #[test]
    fn test_numeric_entry_fields() {
        let payload = TableAnalyzer::default().analyze(&sales_table());

        match &payload.statistics[1] {
            ColumnStatistics::Numeric(stats) => {
                assert_eq!(stats.mean, Some(14.5));
                assert_eq!(stats.median, Some(5.5));
                assert_eq!(stats.min, Some(1.0));
                assert_eq!(stats.max, Some(100.0));
                assert_eq!(stats.count, 10);
                assert_eq!(stats.unique_count, 10);
                assert_eq!(stats.null_count, 0);
            }
            other => panic!("expected numeric entry, got {:?}", other),
        }
    }

    #[test]
    fn test_textual_entry_fields() {
        let payload = TableAnalyzer::default().analyze(&sales_table());

        match &payload.statistics[0] {
            ColumnStatistics::Textual(stats) => {
                assert_eq!(stats.count, 10);
                assert_eq!(stats.unique_count, 10);
                assert_eq!(stats.null_count, 0);
            }
            other => panic!("expected textual entry, got {:?}", other),
        }
    }

    #[test]
    fn test_only_outlier_columns_reported() {
        let payload = TableAnalyzer::default().analyze(&sales_table());

        assert_eq!(payload.anomalies.len(), 1);
        assert_eq!(payload.anomalies[0].column_name, "price");
        assert_eq!(payload.anomalies[0].anomalies, vec![100.0]);
    }

    #[test]
    fn test_unparseable_cells_count_as_null() {
        let table = Table::new(
            vec![ColumnInfo::new("amount", ColumnType::Number)],
            vec![
                vec![CellValue::Text("10".to_string())],
                vec![CellValue::Text("20".to_string())],
                vec![CellValue::Text("abc".to_string())],
                vec![CellValue::Absent],
            ],
        );
        let payload = TableAnalyzer::default().analyze(&table);

        match &payload.statistics[0] {
            ColumnStatistics::Numeric(stats) => {
                assert_eq!(stats.count, 2);
                assert_eq!(stats.null_count, 2);
                assert_eq!(stats.mean, Some(15.0));
            }
            other => panic!("expected numeric entry, got {:?}", other),
        }
    }

    #[test]
    fn test_narration_pairs_keep_column_order() {
        let pairs = TableAnalyzer::default().narration_statistics(&sales_table());

        let names: Vec<&str> = pairs.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["product", "price", "stock"]);

        let price = &pairs[1].1;
        assert_eq!(price["count"], 10);
        assert_eq!(price["anomalies"]["anomalies"][0], 100.0);
        assert!(price["anomalies"]["threshold"]["upper"].is_number());

        let product = &pairs[0].1;
        assert!(product.get("mean").is_none());
        assert_eq!(product["uniqueCount"], 10);
    }
}
