//! Core traits for feature synthesis.
//!
//! This module defines the FeatureView trait: one implementation per
//! feature-string view, each deciding which movie attributes are flattened
//! into the text that gets vectorized.

use crate::features::DerivedFields;
use data_loader::Movie;
use serde::Serialize;
use std::fmt;

/// The three feature-string views the engine indexes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ViewKind {
    /// genre, decade, runtime bucket, director, star
    Facet,
    /// every descriptive IMDB column, for unstructured queries
    FreeText,
    /// descriptive columns plus TMDB language, popularity and genre tags
    ItemSimilarity,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewKind::Facet => "facet",
            ViewKind::FreeText => "free-text",
            ViewKind::ItemSimilarity => "item-similarity",
        };
        f.write_str(name)
    }
}

/// Core trait for rendering a movie into a feature string.
///
/// ## Design Note
/// - `Send + Sync` lets the synthesizer render rows in parallel
/// - Missing values render as empty strings, never dropped, so every row
///   has the same field layout
pub trait FeatureView: Send + Sync {
    /// Returns the name of this view (for logging/debugging)
    fn name(&self) -> &str;

    fn kind(&self) -> ViewKind;

    /// Flatten one movie into its feature string
    ///
    /// # Arguments
    /// * `movie` - The movie record
    /// * `derived` - Decade, runtime bucket and friends for the same row
    fn render(&self, movie: &Movie, derived: &DerivedFields) -> String;
}
