//! Tabular domain model for loaded BOM files.
//!
//! A `Table` is column-oriented and holds every cell as text. Numeric and
//! date coercion never happens here, so distributor codes such as `007` or
//! `C0402` survive exactly as they were written in the source file.

use serde::{Deserialize, Serialize};

/// A single named column of optional text cells.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Option<String>>,
}

impl Column {
    /// Iterate over the present (non-absent) cells, in row order.
    pub fn present_cells(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().filter_map(|c| c.as_deref())
    }
}

/// Immutable table of text cells sharing a single row count.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build a table from a header row and row-major records.
    ///
    /// Short records are padded with absent cells; cells beyond the header
    /// width are dropped. Callers that care about dropped cells check
    /// [`Table::overflowing_rows`] on the raw records before building.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let row_count = rows.len();
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column {
                name,
                cells: Vec::with_capacity(row_count),
            })
            .collect();

        for row in rows {
            let mut cells = row.into_iter();
            for column in columns.iter_mut() {
                column.cells.push(cells.next().flatten());
            }
        }

        Self { columns, row_count }
    }

    /// Row indices (0-based) whose record is wider than the header.
    pub fn overflowing_rows(width: usize, rows: &[Vec<Option<String>>]) -> Vec<usize> {
        rows.iter()
            .enumerate()
            .filter(|(_, r)| r.len() > width)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}
