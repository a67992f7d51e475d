//! Structured-facet view.
//!
//! Flattens exactly the attributes a user can pick from the facet catalog,
//! so a facet query and a movie's feature string share one vocabulary.

use crate::features::{DerivedFields, field, join_fields};
use crate::traits::{FeatureView, ViewKind};
use data_loader::Movie;

/// genre + decade + runtime bucket + director + star
#[derive(Debug, Clone, Copy, Default)]
pub struct FacetView;

impl FeatureView for FacetView {
    fn name(&self) -> &str {
        "FacetView"
    }

    fn kind(&self) -> ViewKind {
        ViewKind::Facet
    }

    fn render(&self, movie: &Movie, derived: &DerivedFields) -> String {
        join_fields(&[
            movie.genre.clone(),
            field(derived.decade),
            field(derived.runtime_bucket),
            movie.director.clone(),
            movie.star.clone(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facet_view_layout() {
        let movie = Movie {
            title: "Raiders of the Lost Ark".to_string(),
            genre: "Action, Adventure".to_string(),
            year: Some(1981),
            runtime: Some(115),
            director: "Steven Spielberg".to_string(),
            star: "Harrison Ford".to_string(),
            ..Default::default()
        };
        let rendered = FacetView.render(&movie, &DerivedFields::derive(&movie));
        assert_eq!(rendered, "Action, Adventure 1980 90 Steven Spielberg Harrison Ford");
    }

    #[test]
    fn test_missing_values_keep_their_slot() {
        let movie = Movie {
            title: "Unknown".to_string(),
            director: "Someone".to_string(),
            ..Default::default()
        };
        let rendered = FacetView.render(&movie, &DerivedFields::derive(&movie));
        assert_eq!(rendered, "   Someone ");
    }
}
