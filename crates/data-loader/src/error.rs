//! Error types for the data-loader crate.
//!
//! Every failure while reading the movie corpus ends up here. Loading is
//! all-or-nothing: the caller either gets a complete `Corpus` or one of
//! these errors, never a partially populated corpus.

use thiserror::Error;

/// Errors that can occur while loading and validating the corpus
///
/// The `#[derive(Error)]` macro from thiserror implements `std::error::Error`
/// and `Display` based on the `#[error(...)]` attributes.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// The CSV reader rejected the file (bad quoting, ragged rows, bad UTF-8, read failures)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column the loader depends on is not in the header row
    #[error("Required column '{column}' is missing from {file}")]
    MissingColumn { file: String, column: String },

    /// A record couldn't be parsed
    ///
    /// This variant stores context about where the error occurred
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: u64,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// The file parsed, but held no movies
    #[error("Corpus {file} contains no movies")]
    EmptyCorpus { file: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
///
/// Instead of writing `Result<T, DataLoadError>` everywhere,
/// we can write `Result<T>`
pub type Result<T> = std::result::Result<T, DataLoadError>;
