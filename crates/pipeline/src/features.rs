//! Feature synthesis for the vector indexes.
//!
//! This module computes the derived columns for each movie and flattens
//! movies into feature strings through a `FeatureView`.

use crate::traits::FeatureView;
use data_loader::{Corpus, Movie, RowId};
use rayon::prelude::*;
use std::fmt::Display;
use tracing::debug;

/// Width of a runtime bucket in minutes
pub const RUNTIME_BUCKET_MINUTES: u32 = 30;

/// Columns derived from a movie once at load time.
///
/// A missing input gives a missing output: a movie without a runtime has
/// no bucket rather than bucket 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedFields {
    /// floor(year / 10) * 10
    pub decade: Option<i32>,
    /// floor(runtime / 30) * 30
    pub runtime_bucket: Option<u32>,
    /// "<bucket>-<bucket + 29>"
    pub runtime_label: Option<String>,
    pub revenue_minus_budget: Option<f64>,
}

impl DerivedFields {
    /// Compute the derived columns for one movie
    pub fn derive(movie: &Movie) -> Self {
        let runtime_bucket = movie.runtime.map(runtime_bucket);
        Self {
            decade: movie.year.map(decade),
            runtime_bucket,
            runtime_label: runtime_bucket.map(runtime_label),
            revenue_minus_budget: movie.revenue_minus_budget(),
        }
    }
}

/// Example: 1981 -> 1980
pub fn decade(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

/// Example: 142 -> 120
pub fn runtime_bucket(minutes: u32) -> u32 {
    (minutes / RUNTIME_BUCKET_MINUTES) * RUNTIME_BUCKET_MINUTES
}

/// Example: 120 -> "120-149"
pub fn runtime_label(bucket: u32) -> String {
    format!("{}-{}", bucket, bucket + RUNTIME_BUCKET_MINUTES - 1)
}

/// Render an optional value, substituting the empty string when missing
pub fn field<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Join rendered fields with single spaces, keeping empty slots
pub fn join_fields(fields: &[String]) -> String {
    fields.join(" ")
}

/// Derives columns and feature strings for a whole corpus.
///
/// Holds the derived fields so they are computed once and shared by every
/// view and by the facet catalog.
#[derive(Debug, Clone)]
pub struct FeatureSynthesizer {
    derived: Vec<DerivedFields>,
}

impl FeatureSynthesizer {
    /// Derive the secondary columns for every movie in the corpus
    pub fn new(corpus: &Corpus) -> Self {
        let derived: Vec<DerivedFields> = corpus
            .movies()
            .par_iter()
            .map(DerivedFields::derive)
            .collect();
        Self { derived }
    }

    /// Derived fields in row order
    pub fn derived(&self) -> &[DerivedFields] {
        &self.derived
    }

    pub fn derived_for(&self, row: RowId) -> Option<&DerivedFields> {
        self.derived.get(row)
    }

    /// Render every movie through `view`.
    ///
    /// # Returns
    /// One feature string per movie, in corpus row order
    pub fn synthesize(&self, corpus: &Corpus, view: &dyn FeatureView) -> Vec<String> {
        let strings: Vec<String> = corpus
            .movies()
            .par_iter()
            .zip(self.derived.par_iter())
            .map(|(movie, derived)| view.render(movie, derived))
            .collect();

        debug!(
            "Synthesized {} feature strings for view {} ({})",
            strings.len(),
            view.name(),
            view.kind()
        );
        strings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decade_and_bucket() {
        assert_eq!(decade(1981), 1980);
        assert_eq!(decade(1990), 1990);
        assert_eq!(runtime_bucket(142), 120);
        assert_eq!(runtime_bucket(29), 0);
        assert_eq!(runtime_bucket(90), 90);
        assert_eq!(runtime_label(120), "120-149");
    }

    #[test]
    fn test_derive_with_missing_values() {
        let movie = Movie {
            title: "Mystery Reel".to_string(),
            ..Default::default()
        };
        let derived = DerivedFields::derive(&movie);
        assert_eq!(derived, DerivedFields::default());
    }

    #[test]
    fn test_derive_full_movie() {
        let mut movie = Movie {
            title: "Raiders of the Lost Ark".to_string(),
            year: Some(1981),
            runtime: Some(115),
            ..Default::default()
        };
        movie.tmdb.revenue = Some(389_925_971.0);
        movie.tmdb.budget = Some(18_000_000.0);

        let derived = DerivedFields::derive(&movie);
        assert_eq!(derived.decade, Some(1980));
        assert_eq!(derived.runtime_bucket, Some(90));
        assert_eq!(derived.runtime_label.as_deref(), Some("90-119"));
        assert_eq!(derived.revenue_minus_budget, Some(371_925_971.0));
    }

    #[test]
    fn test_field_rendering() {
        assert_eq!(field(Some(1980)), "1980");
        assert_eq!(field(Some(9.3f32)), "9.3");
        assert_eq!(field::<u32>(None), "");
        assert_eq!(join_fields(&["a".to_string(), String::new(), "b".to_string()]), "a  b");
    }
}
