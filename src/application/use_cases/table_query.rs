// ============================================================
// TABLE QUERY
// ============================================================
// Filter, sort and paginate a parsed table for browsing

use crate::domain::analysis_config::DEFAULT_PAGE_SIZE;
use crate::domain::table::{ColumnInfo, RowObject, Table};
use crate::domain::value::CellValue;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Sort direction for a browse request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Browse request parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryOptions {
    /// 1-based page index
    pub page: usize,
    pub page_size: usize,
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
    /// Column name to allow-listed cell values, ANDed across columns
    pub filters: Option<HashMap<String, Vec<String>>>,
    /// Free-text term matched against every cell, wins over `filters`
    pub search: Option<String>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: None,
            sort_order: SortOrder::Asc,
            filters: None,
            search: None,
        }
    }
}

impl QueryOptions {
    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    pub fn with_sort(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(column.into());
        self.sort_order = order;
        self
    }

    pub fn with_filters(mut self, filters: HashMap<String, Vec<String>>) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

/// One page of a filtered and sorted table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowsePayload {
    pub rows: Vec<RowObject>,
    pub columns: Vec<ColumnInfo>,
    pub column_count: usize,
    pub total_rows: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Handles browse queries over parsed tables
pub struct TableQueryEngine;

impl TableQueryEngine {
    /// Apply filters, sorting and pagination in that order.
    ///
    /// Filtering matches on rendered cell text. Sorting is stable, compares
    /// numerically when both cells are numbers and lexicographically when
    /// both are text, and leaves any other pairing in place. Out-of-range
    /// pages produce an empty slice, never an error.
    pub fn query(table: &Table, options: &QueryOptions) -> BrowsePayload {
        let mut kept: Vec<usize> = (0..table.row_count()).collect();

        let search = options
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty());
        if let Some(term) = search {
            let needle = term.to_lowercase();
            kept.retain(|&index| {
                table.rows[index]
                    .iter()
                    .any(|cell| cell.to_string().to_lowercase().contains(&needle))
            });
        } else if let Some(filters) = &options.filters {
            for (column, allowed) in filters {
                match table.column_index(column) {
                    Some(column_index) => kept.retain(|&index| {
                        allowed
                            .iter()
                            .any(|value| *value == table.rows[index][column_index].to_string())
                    }),
                    None => kept.clear(),
                }
            }
        }

        if let Some(sort_by) = &options.sort_by {
            if let Some(column_index) = table.column_index(sort_by) {
                kept.sort_by(|&a, &b| {
                    let ordering =
                        compare_cells(&table.rows[a][column_index], &table.rows[b][column_index]);
                    match options.sort_order {
                        SortOrder::Asc => ordering,
                        SortOrder::Desc => ordering.reverse(),
                    }
                });
            }
        }

        let total_rows = kept.len();
        let page_size = if options.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            options.page_size
        };
        let total_pages = if total_rows == 0 {
            0
        } else {
            (total_rows + page_size - 1) / page_size
        };

        let start = options.page.saturating_sub(1) * page_size;
        let rows: Vec<RowObject> = kept
            .iter()
            .skip(start)
            .take(page_size)
            .map(|&index| table.row_object(index))
            .collect();

        BrowsePayload {
            rows,
            columns: table.columns.clone(),
            column_count: table.column_count(),
            total_rows,
            page: options.page,
            page_size,
            total_pages,
        }
    }
}

fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (CellValue::Text(x), CellValue::Text(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}
