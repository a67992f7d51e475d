//! Error types for the engine API.
//!
//! `DataLoad` and `IndexBuild` are fatal: no engine exists afterwards.
//! `MovieNotFound` and `InvalidQuery` are per-request and recoverable; the
//! caller should ask for new input.

use data_loader::DataLoadError;
use pipeline::ViewKind;
use similarity::IndexError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Corpus missing, unreadable, or missing required columns
    #[error("Failed to load corpus: {0}")]
    DataLoad(#[from] DataLoadError),

    /// A view produced nothing to vectorize
    #[error("Failed to build {view} index: {source}")]
    IndexBuild {
        view: ViewKind,
        #[source]
        source: IndexError,
    },

    /// Title lookup miss in item mode
    #[error("Movie not found: '{title}'")]
    MovieNotFound { title: String },

    /// Rejected free text, or no input at all
    #[error("Invalid query: {reason}")]
    InvalidQuery { reason: String },

    /// Ranking asked for a row the index doesn't have
    #[error("Ranking failed: {0}")]
    Ranking(#[from] IndexError),
}

impl EngineError {
    pub(crate) fn invalid_query(reason: impl Into<String>) -> Self {
        EngineError::InvalidQuery {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
