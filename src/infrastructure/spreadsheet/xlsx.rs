// ============================================================
// XLSX READER
// ============================================================
// Read the first worksheet of an uploaded Excel file into a dataset

use crate::domain::dataset::{Cell, Row, TabularDataset};
use crate::domain::error::{AppError, Result};
use calamine::{open_workbook, DataType, Reader, Xlsx};
use std::path::Path;

/// Read an XLSX file; the first worksheet's first row is the header
pub fn read_file(path: &Path) -> Result<TabularDataset> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| AppError::ParseError(format!("Failed to open Excel file: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::ParseError("No worksheet found".to_string()))?
        .map_err(|e| AppError::ParseError(format!("Failed to read Excel range: {}", e)))?;

    let mut sheet_rows = range.rows();

    let headers: Vec<String> = match sheet_rows.next() {
        Some(header_row) => header_row.iter().map(cell_to_string).collect(),
        None => return Err(AppError::EmptyDataset),
    };

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(AppError::EmptyDataset);
    }

    let mut rows = Vec::new();
    for sheet_row in sheet_rows {
        let cells = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = sheet_row.get(idx).map(cell_to_string).unwrap_or_default();
                Cell::new(header.clone(), value)
            })
            .collect();
        rows.push(Row::new(cells));
    }

    Ok(TabularDataset::new(rows))
}

fn cell_to_string(cell: &calamine::Data) -> String {
    cell.as_string()
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("{}", cell))
}
