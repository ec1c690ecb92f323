use thiserror::Error;

/// yeargrid error types
#[derive(Error, Debug)]
pub enum YearGridError {
    /// Argument outside its domain (month, week-start index, year)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation called before the first successful `init`
    #[error("year grid not initialized")]
    NotInitialized,

    /// Month data lookup failed
    #[error("lookup error: {0}")]
    Lookup(String),

    /// Failed to parse a data file
    #[error("parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for yeargrid
pub type Result<T> = std::result::Result<T, YearGridError>;
