use thiserror::Error;

/// Structural failures that abort a whole run.
///
/// Malformed author text never ends up here; it is skipped per fragment
/// (see [`crate::utils::ParseSkip`]).
#[derive(Debug, Error)]
pub enum Error {
    #[error("{table} is missing required columns: {}", .columns.join(", "))]
    MissingColumns {
        table: &'static str,
        columns: Vec<String>,
    },

    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    #[error("failed to write workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("reconciliation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("workbook has no worksheet")]
    EmptyWorkbook,

    #[error("{0} has not been uploaded")]
    MissingUpload(&'static str),

    #[error("invalid upload: {0}")]
    InvalidUpload(String),
}

pub type Result<T> = std::result::Result<T, Error>;
