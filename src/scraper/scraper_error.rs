use thiserror::Error;

/// A failure fetching one city's listings. Always isolated to that city.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Blocked by site: {0}")]
    Blocked(String),
    #[error("HTML parse error: {0}")]
    HtmlParse(String),
    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),
    #[error("Source panicked: {0}")]
    Panicked(String),
    #[error("Recording error: {0}")]
    Recording(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
