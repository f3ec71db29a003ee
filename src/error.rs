use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required columns: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Geocode cache error: {0}")]
    CacheIo(String),

    #[error("Geocode lookup error: {0}")]
    Lookup(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
