// ============================================================
// COLUMN STATISTICS
// ============================================================
// Descriptive statistics over numeric and textual samples

use crate::domain::statistics::{NumericStatistics, StringStatistics};
use crate::domain::value::CellValue;
use std::collections::HashSet;

/// Round to two decimal places, the precision reported to clients
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Handles descriptive statistics for single columns
pub struct StatisticsEngine;

impl StatisticsEngine {
    /// Compute descriptive statistics for a numeric sample.
    ///
    /// Non-finite values are dropped before anything else. Variance is the
    /// population variance, the median averages the two central values for
    /// even counts, and mean, median and standard deviation are rounded to
    /// two decimals. Min and max are reported unrounded.
    pub fn numeric_statistics(values: &[f64]) -> NumericStatistics {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let n = finite.len();
        if n == 0 {
            return NumericStatistics::empty();
        }

        let mut sorted = finite.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = finite.iter().sum::<f64>() / n as f64;
        let variance = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
        let std_dev = variance.sqrt();

        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        NumericStatistics {
            mean: Some(round2(mean)),
            median: Some(round2(median)),
            std_dev: Some(round2(std_dev)),
            min: Some(sorted[0]),
            max: Some(sorted[n - 1]),
            count: n,
        }
    }

    /// Compute count statistics for a textual sample.
    ///
    /// Absent cells land in `null_count` only; `count` and `unique_count`
    /// cover the remaining values by their rendered text.
    pub fn string_statistics(values: &[&CellValue]) -> StringStatistics {
        let total = values.len();
        let present: Vec<String> = values
            .iter()
            .filter(|value| !value.is_absent())
            .map(|value| value.to_string())
            .collect();
        let unique: HashSet<&String> = present.iter().collect();

        StringStatistics {
            count: present.len(),
            unique_count: unique.len(),
            null_count: total - present.len(),
        }
    }
}
