//! Free-text view.
//!
//! Every descriptive column of the IMDB export, used when the user types
//! an unstructured query.

use crate::features::{DerivedFields, field, join_fields};
use crate::traits::{FeatureView, ViewKind};
use data_loader::Movie;

/// title + year + certificate + runtime + genre + rating + overview +
/// meta score + director + star + votes + gross
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeTextView;

impl FeatureView for FreeTextView {
    fn name(&self) -> &str {
        "FreeTextView"
    }

    fn kind(&self) -> ViewKind {
        ViewKind::FreeText
    }

    fn render(&self, movie: &Movie, _derived: &DerivedFields) -> String {
        join_fields(&[
            movie.title.clone(),
            field(movie.year),
            field(movie.certificate.as_deref()),
            field(movie.runtime),
            movie.genre.clone(),
            field(movie.rating),
            field(movie.overview.as_deref()),
            field(movie.meta_score),
            movie.director.clone(),
            movie.star.clone(),
            field(movie.votes),
            field(movie.gross),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_text_view_layout() {
        let movie = Movie {
            title: "The Shawshank Redemption".to_string(),
            genre: "Drama".to_string(),
            year: Some(1994),
            runtime: Some(142),
            rating: Some(9.3),
            certificate: Some("A".to_string()),
            overview: Some("Two imprisoned men bond over a number of years.".to_string()),
            meta_score: Some(80.0),
            director: "Frank Darabont".to_string(),
            star: "Tim Robbins".to_string(),
            votes: Some(2_343_110),
            gross: Some(28_341_469),
            ..Default::default()
        };
        let rendered = FreeTextView.render(&movie, &DerivedFields::derive(&movie));
        assert_eq!(
            rendered,
            "The Shawshank Redemption 1994 A 142 Drama 9.3 Two imprisoned men bond over a number of years. 80 Frank Darabont Tim Robbins 2343110 28341469"
        );
    }
}
