//! Identifier Extractor
//!
//! Pulls distributor part identifiers out of one column of a parsed BOM and
//! normalizes them into a sorted, duplicate-free list.

use bomfetch_models::Table;
use std::collections::BTreeSet;

use crate::error::{BomError, BomResult};

/// Identifier extraction result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Trimmed, non-empty identifiers in ascending ordinal order
    pub identifiers: Vec<String>,
    /// Absent cells plus cells that were empty after trimming
    pub blank_count: usize,
    pub duplicate_count: usize,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

/// Extracts identifiers from a named column
pub struct IdentifierExtractor {
    column: String,
}

impl IdentifierExtractor {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }

    /// Extract and deduplicate identifiers.
    ///
    /// Ordering is byte-wise on the UTF-8 text, so `C002` sorts before
    /// `c001`. An empty result is not an error.
    pub fn extract(&self, table: &Table) -> BomResult<ExtractionResult> {
        let column = table.column(&self.column).ok_or_else(|| {
            BomError::column_not_found(
                &self.column,
                table.column_names().into_iter().map(str::to_string).collect(),
            )
        })?;

        let mut unique = BTreeSet::new();
        let mut blank_count = 0;
        let mut duplicate_count = 0;

        for cell in &column.cells {
            let trimmed = match cell.as_deref().map(str::trim) {
                Some(value) if !value.is_empty() => value,
                _ => {
                    blank_count += 1;
                    continue;
                }
            };

            if !unique.insert(trimmed.to_string()) {
                duplicate_count += 1;
            }
        }

        Ok(ExtractionResult {
            identifiers: unique.into_iter().collect(),
            blank_count,
            duplicate_count,
        })
    }
}

/// Shorthand for `IdentifierExtractor::new(column).extract(table)`.
pub fn extract_identifiers(table: &Table, column: &str) -> BomResult<Vec<String>> {
    IdentifierExtractor::new(column)
        .extract(table)
        .map(|result| result.identifiers)
}
