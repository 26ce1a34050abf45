use bytes::Bytes;
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use std::io::Cursor;

use crate::error::AppError;
use crate::models::{Cell, SummaryTable};

/// Pulls the summary worksheet out of one workbook. Sheet and key column
/// names are injected so tests can run against synthetic workbooks.
pub struct SummaryExtractor {
    sheet_name: String,
    key_column: String,
}

impl SummaryExtractor {
    pub fn new(sheet_name: impl Into<String>, key_column: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            key_column: key_column.into(),
        }
    }

    /// `Ok(None)` means the workbook has no summary sheet and the caller
    /// should skip the file silently. A sheet that exists but lacks the key
    /// column is a parse error, not a silent skip.
    pub fn extract(&self, file_data: Bytes) -> Result<Option<SummaryTable>, AppError> {
        let cursor = Cursor::new(file_data);
        let mut workbook: Xlsx<_> = open_workbook_from_rs(cursor)
            .map_err(|e| AppError::Parse(format!("Failed to open workbook: {}", e)))?;

        if !workbook.sheet_names().iter().any(|name| name == &self.sheet_name) {
            return Ok(None);
        }

        let range = workbook.worksheet_range(&self.sheet_name).map_err(|e| {
            AppError::Parse(format!(
                "Failed to read sheet {}: {}",
                self.sheet_name, e
            ))
        })?;

        let rows: Vec<Vec<Data>> = range.rows().map(|row| row.to_vec()).collect();
        self.table_from_rows(&rows).map(Some)
    }

    /// First row becomes the column labels, replacing whatever the workbook
    /// carried natively. The key column is pulled out of the data columns
    /// and its values become the row keys. A row whose key cell is blank or
    /// absent gets the empty string as its key, so all keyless rows collapse
    /// into one entry under the duplicate-key rule (latest cells win).
    fn table_from_rows(&self, rows: &[Vec<Data>]) -> Result<SummaryTable, AppError> {
        let header = rows
            .first()
            .ok_or_else(|| AppError::Parse(format!("Sheet {} is empty", self.sheet_name)))?;

        let labels: Vec<String> = header.iter().map(|cell| cell.to_string()).collect();
        let key_idx = labels
            .iter()
            .position(|label| label == &self.key_column)
            .ok_or_else(|| {
                AppError::Parse(format!(
                    "Sheet {} has no '{}' column",
                    self.sheet_name, self.key_column
                ))
            })?;

        let metrics: Vec<String> = labels
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != key_idx)
            .map(|(_, label)| label.clone())
            .collect();

        let mut table = SummaryTable::new(metrics);
        for row in rows.iter().skip(1) {
            let key = row
                .get(key_idx)
                .map(|cell| cell.to_string())
                .unwrap_or_default();
            let cells: Vec<Cell> = (0..labels.len())
                .filter(|idx| *idx != key_idx)
                .map(|idx| row.get(idx).map(Cell::from).unwrap_or(Cell::Empty))
                .collect();
            table.push_row(key, cells);
        }

        Ok(table)
    }
}
