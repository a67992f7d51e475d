//! Error types for the similarity crate.

use thiserror::Error;

/// Errors raised while fitting a vector index
#[derive(Error, Debug)]
pub enum IndexError {
    /// Nothing survived tokenization, so there is no vector space to fit
    #[error("Cannot fit index on {documents} documents: vocabulary is empty")]
    EmptyVocabulary { documents: usize },

    /// A row id was outside the fitted matrix
    #[error("Row {row} is out of range for an index of {rows} rows")]
    RowOutOfRange { row: usize, rows: usize },
}

pub type Result<T> = std::result::Result<T, IndexError>;
