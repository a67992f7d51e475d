//! Engine configuration.

use similarity::DEFAULT_TOP_K;
use pipeline::facets::DEFAULT_TOP_N;
use std::str::FromStr;

/// Which feature view backs the item-similarity index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemViewMode {
    /// Rich view when the corpus carries TMDB metadata, facet view otherwise
    #[default]
    Auto,
    /// Always the rich view (TMDB fields render empty when absent)
    Rich,
    /// Always the facet view
    Facet,
}

impl FromStr for ItemViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ItemViewMode::Auto),
            "rich" => Ok(ItemViewMode::Rich),
            "facet" => Ok(ItemViewMode::Facet),
            other => Err(format!("unknown item view mode '{}'", other)),
        }
    }
}

/// Tunables for an `Engine`, fixed at build time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Results per request
    pub top_k: usize,
    /// Length of the top director / top star lists
    pub facet_top_n: usize,
    pub item_view: ItemViewMode,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            facet_top_n: DEFAULT_TOP_N,
            item_view: ItemViewMode::Auto,
        }
    }

    /// Configure results per request (default: 10)
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Configure the top director / star list length (default: 10)
    pub fn with_facet_top_n(mut self, n: usize) -> Self {
        self.facet_top_n = n;
        self
    }

    pub fn with_item_view(mut self, mode: ItemViewMode) -> Self {
        self.item_view = mode;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
