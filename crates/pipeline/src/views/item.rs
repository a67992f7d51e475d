//! Item-similarity view.
//!
//! The descriptive IMDB columns enriched with TMDB's original language,
//! popularity and genre tags. Only worth indexing when the corpus carries
//! the TMDB columns; the engine falls back to the facet view otherwise.

use crate::features::{DerivedFields, field, join_fields};
use crate::traits::{FeatureView, ViewKind};
use data_loader::Movie;

#[derive(Debug, Clone, Copy, Default)]
pub struct ItemSimilarityView;

impl FeatureView for ItemSimilarityView {
    fn name(&self) -> &str {
        "ItemSimilarityView"
    }

    fn kind(&self) -> ViewKind {
        ViewKind::ItemSimilarity
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
            field(movie.tmdb.original_language.as_deref()),
            field(movie.tmdb.popularity),
            field(movie.tmdb.genres.as_deref()),
        ])
    }
}
