//! Feature engineering for content-based movie search.
//!
//! This crate provides:
//! - FeatureView trait and implementations for the three feature-string views
//! - FeatureSynthesizer for derived columns and per-view feature strings
//! - FacetCatalog for the selectable facet options
//!
//! ## Architecture
//! The corpus is processed in stages:
//! 1. Derived columns (decade, runtime bucket, ...) are computed once per movie
//! 2. Each view flattens every movie into a feature string
//! 3. The strings are handed to the similarity crate for vectorization
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FacetCatalog, FeatureSynthesizer};
//! use pipeline::views::{FacetView, FreeTextView};
//!
//! let synthesizer = FeatureSynthesizer::new(&corpus);
//! let facet_strings = synthesizer.synthesize(&corpus, &FacetView);
//! let text_strings = synthesizer.synthesize(&corpus, &FreeTextView);
//!
//! let catalog = FacetCatalog::build(&corpus, synthesizer.derived());
//! let directors = catalog.top_directors(10);
//! ```

pub mod traits;
pub mod views;
pub mod features;
pub mod facets;

// Re-export main types
pub use traits::{FeatureView, ViewKind};
pub use features::{DerivedFields, FeatureSynthesizer};
pub use facets::FacetCatalog;
