/// Error types for the stream graph pipeline
use thiserror::Error;

/// Problems with the observations handed to the pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// Observation date could not be parsed
    #[error("Failed to parse observation date: '{0}'")]
    UnparsableDate(String),

    /// Not enough distinct dates for a cubic fit
    #[error("Insufficient distinct time points (needed: {needed}, found: {found})")]
    InsufficientTimePoints { needed: usize, found: usize },

    /// CSV report header lacks a required column
    #[error("Report is missing required column: {0}")]
    MissingColumn(String),

    /// Requested resample count is unusable
    #[error("Invalid sample count: {0} (at least 2 required)")]
    InvalidSampleCount(usize),
}

/// Failures of the spline fit
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumericError {
    /// Knot abscissae are not strictly increasing
    #[error("Spline abscissae must be strictly increasing (violated at index {index})")]
    NonIncreasingAbscissa { index: usize },

    /// x and y have different lengths
    #[error("Spline input length mismatch (x: {x}, y: {y})")]
    LengthMismatch { x: usize, y: usize },

    /// Too few knots for the spline degree
    #[error("Cubic spline needs at least {needed} knots, found {found}")]
    TooFewKnots { needed: usize, found: usize },

    /// NaN or infinity in the spline input
    #[error("Non-finite spline input at index {index}")]
    NonFinite { index: usize },
}

/// Main error type for stream graph operations
#[derive(Error, Debug)]
pub enum StreamError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Numeric(#[from] NumericError),

    /// Failed to parse a JSON report
    #[error("Failed to parse JSON report: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read or write CSV data
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Report bytes are not UTF-8
    #[error("Report is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Failed to decompress or read data
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results using StreamError
pub type Result<T> = std::result::Result<T, StreamError>;
