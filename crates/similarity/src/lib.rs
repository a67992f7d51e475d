//! # Similarity Crate
//!
//! Term-weighted vector search over movie feature strings.
//!
//! ## Components
//!
//! ### Vector Index (`vectorizer`)
//! TF-IDF over one column of feature strings:
//! - sorted vocabulary derived only from the fitted documents
//! - smoothed IDF, L2-normalized sparse row vectors
//! - `transform` maps new text into the same space, ignoring unknown terms
//!
//! ### Similarity Ranker (`ranker`)
//! Cosine nearest neighbours:
//! - query mode: free text against every row
//! - item mode: a fitted row against every other row
//!
//! ## Example Usage
//!
//! ```ignore
//! use similarity::{SimilarityRanker, TfIdfIndex};
//!
//! let index = TfIdfIndex::fit(&feature_strings)?;
//! let ranker = SimilarityRanker::new().with_top_k(10);
//!
//! let by_text = ranker.rank_by_query("Action 1980 Steven Spielberg", &index);
//! let by_item = ranker.rank_by_item(row, &index)?;
//! ```
//!
//! Each view gets its own index; vectors from different indexes live in
//! different spaces and must not be compared.

// Public modules
pub mod error;
pub mod tokenizer;
pub mod types;
pub mod vectorizer;
pub mod ranker;

// Re-export commonly used types
pub use error::{IndexError, Result};
pub use ranker::{DEFAULT_TOP_K, SimilarityRanker};
pub use types::{ScoredRow, SparseVector};
pub use vectorizer::TfIdfIndex;
