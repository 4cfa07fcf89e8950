// ============================================================
// TABULAR DATASET TYPES
// ============================================================
// In-memory representation of an uploaded spreadsheet

use serde::{Deserialize, Serialize};

/// A single named cell in a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Column name (header), case-sensitive
    pub column: String,

    /// Cell value, already stringified
    pub value: String,
}

impl Cell {
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// A single row: an ordered sequence of named cells.
///
/// Column order is significant and is preserved through every operation;
/// it governs the exported file's column layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Column names in order
    pub fn columns(&self) -> Vec<&str> {
        self.cells.iter().map(|c| c.column.as_str()).collect()
    }

    /// Value lookup by exact column name
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|c| c.column == column)
            .map(|c| c.value.as_str())
    }

    /// Value of the first column by position
    pub fn first_value(&self) -> Option<&str> {
        self.cells.first().map(|c| c.value.as_str())
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.cells.iter().any(|c| c.column == column)
    }

    /// Overwrite an existing cell's value. Returns false if the column
    /// does not exist in this row.
    pub fn set(&mut self, column: &str, value: impl Into<String>) -> bool {
        match self.cells.iter_mut().find(|c| c.column == column) {
            Some(cell) => {
                cell.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Insert empty-valued columns immediately after `anchor`, preserving
    /// the relative order of every other column. Columns that already
    /// exist in the row are skipped; a missing anchor appends at the end.
    pub fn insert_columns_after(&mut self, anchor: &str, columns: &[&str]) {
        let mut at = self
            .cells
            .iter()
            .position(|c| c.column == anchor)
            .map(|i| i + 1)
            .unwrap_or(self.cells.len());

        for column in columns {
            if self.has_column(column) {
                continue;
            }
            self.cells.insert(at, Cell::new(*column, ""));
            at += 1;
        }
    }
}

/// An ordered collection of rows sharing a header-driven schema.
///
/// The schema is the first row's column set and order; a dataset with
/// zero rows has no inferable schema and is a distinct empty state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularDataset {
    rows: Vec<Row>,
}

impl TabularDataset {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names of the schema (from the first row)
    pub fn columns(&self) -> Vec<&str> {
        self.rows.first().map(|r| r.columns()).unwrap_or_default()
    }

    /// Insert empty derived columns after `anchor` in every row
    pub fn insert_columns_after(&mut self, anchor: &str, columns: &[&str]) {
        for row in &mut self.rows {
            row.insert_columns_after(anchor, columns);
        }
    }

    /// Keep only rows matching the predicate, preserving order
    pub fn retain<F: FnMut(&Row) -> bool>(&mut self, keep: F) {
        self.rows.retain(keep);
    }
}
