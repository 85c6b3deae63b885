use std::fs;
use std::path::Path;

use crate::errors::ParserError;
use crate::model::MenuRecord;

/// Read a JSON menu export into typed records. The export is a single JSON
/// array, so a malformed document fails the whole file rather than per row.
pub fn read_menu_export(path: &Path) -> Result<Vec<MenuRecord>, ParserError> {
    let contents = fs::read_to_string(path).map_err(|source| ParserError::Io {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| ParserError::Json {
        path: path.display().to_string(),
        source,
    })
}
