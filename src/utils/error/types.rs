//! Error types for the checker

use thiserror::Error;

/// Result type alias for the checker
pub type Result<T> = std::result::Result<T, CheckerError>;

/// Main error type for the checker
#[derive(Error, Debug)]
pub enum CheckerError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// A batch is already running; the caller may retry later
    #[error("A batch is already being processed, try again later")]
    Busy,

    /// Uploaded input could not be turned into records
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Result file storage errors
    #[error("File storage error: {0}")]
    FileStorage(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Reasons an uploaded credential file is rejected at ingestion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing was uploaded
    #[error("input is empty")]
    EmptyInput,

    /// The file has a header but no usable data rows
    #[error("no valid accounts found in input")]
    NoRecognizableRows,

    /// The header does not carry the columns a record needs
    #[error("missing required columns: {missing}")]
    MissingRequiredFields { missing: String },

    /// The same account appears twice
    #[error("duplicate account '{id}' on line {line}")]
    DuplicateRecord { line: usize, id: String },

    /// Input is not UTF-8 text
    #[error("input is not valid UTF-8 text")]
    InvalidEncoding,
}
