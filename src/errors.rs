// errors.rs
use std::path::PathBuf;
use thiserror::Error;

/// Source-level failures. Field and row problems never surface here: the
/// cleaning stages turn those into `None` or dropped rows.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Static dataset not found: {}", path.display())]
    StaticDatasetMissing { path: PathBuf },

    #[error("Failed to read static dataset {}: {source}", path.display())]
    StaticDatasetUnreadable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
