//! Core domain types for the movie corpus.
//!
//! This module defines the fundamental data structures used throughout the system:
//! - `Movie`: one row of the IMDB top-1000 dataset plus its TMDB enrichment
//! - `Corpus`: the ordered, immutable collection of movies with a title lookup

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Position of a movie in the corpus.
///
/// Row ids are dense (0..corpus.len()) and every derived structure (feature
/// strings, vector matrices) is aligned on them.
pub type RowId = usize;

// =============================================================================
// Movie-related Types
// =============================================================================

/// Represents a movie in the dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Unique within the corpus; the external lookup key
    pub title: String,
    /// Comma-joined genre list exactly as stored in the source, e.g. "Action, Adventure"
    pub genre: String,
    /// Release year, `None` when the source value isn't a number
    pub year: Option<i32>,
    /// Runtime in minutes after stripping "min" and other non-digits
    pub runtime: Option<u32>,
    pub rating: Option<f32>,
    pub director: String,
    /// Lead star (first billed)
    pub star: String,
    pub overview: Option<String>,
    pub certificate: Option<String>,
    pub meta_score: Option<f32>,
    pub votes: Option<u64>,
    /// Box office gross in dollars
    pub gross: Option<u64>,
    /// Secondary metadata joined in from TMDB
    pub tmdb: TmdbMetadata,
}

/// Optional TMDB enrichment for a movie.
///
/// The columns are absent entirely in the plain IMDB export, so every field
/// is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TmdbMetadata {
    pub runtime: Option<u32>,
    pub revenue: Option<f64>,
    pub budget: Option<f64>,
    pub original_language: Option<String>,
    pub popularity: Option<f64>,
    /// Genre tags as TMDB spells them
    pub genres: Option<String>,
}

impl TmdbMetadata {
    /// True when any of the fields used for item similarity is present
    pub fn has_similarity_fields(&self) -> bool {
        self.original_language.is_some() || self.popularity.is_some() || self.genres.is_some()
    }
}

impl Movie {
    /// Individual genre tags, split on commas and trimmed
    ///
    /// Example: "Action, Adventure" -> ["Action", "Adventure"]
    pub fn genre_tags(&self) -> impl Iterator<Item = &str> {
        self.genre
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }

    /// Revenue minus budget, defined only when both are known
    pub fn revenue_minus_budget(&self) -> Option<f64> {
        match (self.tmdb.revenue, self.tmdb.budget) {
            (Some(revenue), Some(budget)) => Some(revenue - budget),
            _ => None,
        }
    }
}

// =============================================================================
// Corpus - The In-Memory Table
// =============================================================================

/// Main data structure that holds every movie in load order.
///
/// The corpus is immutable once built: all derived structures index into
/// `movies` by `RowId`, so rows are never reordered or removed.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub(crate) movies: Vec<Movie>,
    /// Title -> first row carrying that title
    pub(crate) title_index: HashMap<String, RowId>,
    /// Rows whose title was already taken by an earlier row
    pub(crate) duplicate_titles: Vec<RowId>,
}

impl Corpus {
    /// Creates a new, empty Corpus
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from movies that are already in memory.
    ///
    /// Row order follows the input order.
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        let mut corpus = Self::new();
        for movie in movies {
            corpus.insert_movie(movie);
        }
        corpus
    }

    /// Append a movie and register its title.
    ///
    /// If the title already exists the earlier row keeps the title slot, so
    /// title resolution always lands on the lowest row index.
    pub fn insert_movie(&mut self, movie: Movie) -> RowId {
        let row = self.movies.len();
        if self.title_index.contains_key(&movie.title) {
            self.duplicate_titles.push(row);
        } else {
            self.title_index.insert(movie.title.clone(), row);
        }
        self.movies.push(movie);
        row
    }

    /// Get a movie by row
    pub fn get_movie(&self, row: RowId) -> Option<&Movie> {
        self.movies.get(row)
    }

    /// Resolve a title to its row
    pub fn find_by_title(&self, title: &str) -> Option<RowId> {
        self.title_index.get(title).copied()
    }

    /// All movies in row order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn iter(&self) -> impl Iterator<Item = (RowId, &Movie)> {
        self.movies.iter().enumerate()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Rows that lost their title slot to an earlier row
    pub fn duplicate_titles(&self) -> &[RowId] {
        &self.duplicate_titles
    }

    /// Whether any row carries the TMDB fields used by the item-similarity view
    pub fn has_secondary_metadata(&self) -> bool {
        self.movies.iter().any(|m| m.tmdb.has_similarity_fields())
    }
}
