use thiserror::Error;
use std::io;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("The modal data does not contain all the required columns, missing: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("No frequency data found. Columns 'mean_frequency' or 'frequency' required.")]
    MissingFrequency,

    #[error("The modal data does not contain the column 'damping' or 'mean_damping'.")]
    MissingDamping,

    #[error("Table shape error: {0}")]
    Shape(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Clustering error: {0}")]
    Clustering(String),
}

// Type alias for Result
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    pub fn shape<S: Into<String>>(msg: S) -> Self {
        Error::Shape(msg.into())
    }

    pub fn clustering<S: Into<String>>(msg: S) -> Self {
        Error::Clustering(msg.into())
    }

    /// True for the fail-fast data-shape errors raised before any clustering.
    pub fn is_missing_data(&self) -> bool {
        matches!(
            self,
            Error::MissingColumns(_) | Error::MissingFrequency | Error::MissingDamping
        )
    }
}
