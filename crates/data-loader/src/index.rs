//! Corpus loading and validation.
//!
//! This module turns a parsed CSV into a `Corpus`:
//! - Rows keep file order (row id == position)
//! - The title index maps each title to its first row
//! - Validation checks the invariants the rest of the engine relies on

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::Corpus;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

impl Corpus {
    /// Load the movie corpus from a CSV file
    ///
    /// This is the main entry point for loading data.
    ///
    /// Steps:
    /// 1. Parse the CSV (header contract checked first)
    /// 2. Insert rows in file order, registering titles
    /// 3. Report duplicate titles
    /// 4. Validate data integrity
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading movie corpus from {:?}", path);
        let start = Instant::now();

        let movies = parser::parse_movies(path)?;
        if movies.is_empty() {
            return Err(DataLoadError::EmptyCorpus {
                file: path.display().to_string(),
            });
        }

        let corpus = Corpus::from_movies(movies);

        for &row in corpus.duplicate_titles() {
            let title = &corpus.movies[row].title;
            warn!(
                "Duplicate title '{}' at row {}; lookups resolve to row {}",
                title,
                row,
                corpus.find_by_title(title).unwrap_or(row)
            );
        }

        corpus.validate()?;

        info!(
            "Loaded {} movies ({} duplicate titles) in {:?}",
            corpus.len(),
            corpus.duplicate_titles().len(),
            start.elapsed()
        );
        Ok(corpus)
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - Every title resolves to a row that carries that title
    /// - Every row's title resolves (to itself or an earlier duplicate)
    /// - Ratings are in the IMDB range (0.0 - 10.0)
    pub fn validate(&self) -> Result<()> {
        for (title, &row) in &self.title_index {
            match self.movies.get(row) {
                Some(movie) if &movie.title == title => {}
                _ => {
                    return Err(DataLoadError::ValidationError(format!(
                        "title '{}' points at row {} which doesn't carry it",
                        title, row
                    )));
                }
            }
        }

        for (row, movie) in self.iter() {
            match self.find_by_title(&movie.title) {
                Some(first) if first <= row => {}
                _ => {
                    return Err(DataLoadError::ValidationError(format!(
                        "row {} ('{}') is not reachable by title",
                        row, movie.title
                    )));
                }
            }

            if let Some(rating) = movie.rating {
                if !(0.0..=10.0).contains(&rating) {
                    return Err(DataLoadError::InvalidValue {
                        field: "IMDB_Rating".to_string(),
                        value: rating.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
