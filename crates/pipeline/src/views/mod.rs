//! Feature view implementations.
//!
//! Each view decides which columns a movie contributes to its feature
//! string. The engine fits one vector index per view.

pub mod facet;
pub mod free_text;
pub mod item;

// Re-export for convenience
pub use facet::FacetView;
pub use free_text::FreeTextView;
pub use item::ItemSimilarityView;
