//! Server crate for the ReelRecs recommendation engine.
//!
//! This crate contains the `Engine` that coordinates corpus loading,
//! feature synthesis, vector indexes and ranking behind one API.

pub mod config;
pub mod engine;
pub mod error;

pub use config::{EngineConfig, ItemViewMode};
pub use engine::{load_corpus, Engine, FacetQuery, MovieRecommendation};
pub use error::{EngineError, Result};
