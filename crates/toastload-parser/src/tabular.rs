use std::path::Path;

use serde::de::DeserializeOwned;

use crate::errors::{ParserError, RowFailure};
use crate::model::{CheckRow, OrderRow, TimeEntryRow};

/// Parsed rows of one tabular export, with the rows that failed type
/// coercion kept separately. Loaders count the failures as error rows; a
/// bad row never aborts the rest of the file.
#[derive(Debug)]
pub struct RowSet<T> {
    pub rows: Vec<T>,
    pub failures: Vec<RowFailure>,
}

impl<T> RowSet<T> {
    pub fn total(&self) -> usize {
        self.rows.len() + self.failures.len()
    }
}

pub fn read_order_rows(path: &Path) -> Result<RowSet<OrderRow>, ParserError> {
    read_rows(path)
}

pub fn read_check_rows(path: &Path) -> Result<RowSet<CheckRow>, ParserError> {
    read_rows(path)
}

pub fn read_time_entries(path: &Path) -> Result<RowSet<TimeEntryRow>, ParserError> {
    read_rows(path)
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<RowSet<T>, ParserError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| ParserError::Csv {
            path: path.display().to_string(),
            source,
        })?;

    let mut rows = Vec::new();
    let mut failures = Vec::new();

    for (index, record) in reader.deserialize::<T>().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            Err(err) => failures.push(RowFailure {
                // Data rows start on line 2, after the header.
                line: err
                    .position()
                    .map(|position| position.line())
                    .unwrap_or(index as u64 + 2),
                message: err.to_string(),
            }),
        }
    }

    Ok(RowSet { rows, failures })
}
