//! Data loading for the linked views

pub mod config;
pub mod sources;

use thiserror::Error;

// Re-exports
pub use config::NullConfig;
pub use sources::HousingCsvSource;

/// Errors that can occur while loading data
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => DataError::Io(std::io::Error::new(io_err.kind(), error.to_string())),
            _ => DataError::Csv(error.to_string()),
        }
    }
}
