//! # Data Loader Crate
//!
//! This crate loads the movie corpus (IMDB top-1000 with TMDB enrichment)
//! into memory.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, TmdbMetadata, Corpus)
//! - **parser**: Parse the CSV into Rust structs, cleaning dirty columns
//! - **index**: Build and validate the Corpus with its title lookup
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Corpus;
//! use std::path::Path;
//!
//! let corpus = Corpus::load_from_file(Path::new("data/updated_imdb_top_1000.csv"))?;
//!
//! let row = corpus.find_by_title("The Shawshank Redemption").unwrap();
//! let movie = corpus.get_movie(row).unwrap();
//! println!("{} ({:?}) runs {:?} minutes", movie.title, movie.year, movie.runtime);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{Corpus, Movie, RowId, TmdbMetadata};
