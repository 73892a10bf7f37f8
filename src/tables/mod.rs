//! Table loaders and the output workbook.

pub mod publication_table;
pub mod roster_table;
pub mod workbook;

pub use publication_table::*;
pub use roster_table::*;
pub use workbook::*;

use std::path::Path;

/// Lowercased file extension, empty when there is none
pub(crate) fn extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default()
}

pub(crate) fn missing_columns(required: &[&str], present: &[String]) -> Vec<String> {
    required
        .iter()
        .filter(|column| !present.iter().any(|p| p == *column))
        .map(|column| column.to_string())
        .collect()
}
