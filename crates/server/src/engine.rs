//! # Recommendation Engine
//!
//! This module wires the whole system together:
//! 1. Load the corpus
//! 2. Derive columns and the facet catalog
//! 3. Fit one TF-IDF index per feature view
//! 4. Answer facet, free-text and item-similarity requests
//!
//! An `Engine` is immutable once built, so one instance can serve any
//! number of concurrent readers behind an `Arc`.

use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use unicode_general_category::{GeneralCategory, get_general_category};

use data_loader::{Corpus, Movie, RowId};
use pipeline::views::{FacetView, FreeTextView, ItemSimilarityView};
use pipeline::{FacetCatalog, FeatureSynthesizer, FeatureView, ViewKind};
use similarity::{ScoredRow, SimilarityRanker, TfIdfIndex};

use crate::config::{EngineConfig, ItemViewMode};
use crate::error::{EngineError, Result};

/// Facet selections for a structured query. Unset or blank fields are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetQuery {
    pub genre: Option<String>,
    /// Decade as listed by `list_decades` ("1980")
    pub decade: Option<String>,
    pub director: Option<String>,
    pub star: Option<String>,
    /// Bucket label as listed by `list_runtime_buckets` ("90-119")
    pub runtime_bucket: Option<String>,
}

impl FacetQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_decade(mut self, decade: impl Into<String>) -> Self {
        self.decade = Some(decade.into());
        self
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self
    }

    pub fn with_star(mut self, star: impl Into<String>) -> Self {
        self.star = Some(star.into());
        self
    }

    pub fn with_runtime_bucket(mut self, label: impl Into<String>) -> Self {
        self.runtime_bucket = Some(label.into());
        self
    }

    /// True when no selection carries any text
    pub fn is_empty(&self) -> bool {
        self.selections().next().is_none()
    }

    /// Space-joined selections, matching the facet view's vocabulary.
    ///
    /// A runtime label "90-119" contributes only its bucket start, since
    /// that is the token the facet strings carry.
    pub fn to_query_string(&self) -> String {
        self.selections().collect::<Vec<_>>().join(" ")
    }

    fn selections(&self) -> impl Iterator<Item = &str> {
        let bucket = self.runtime_bucket.as_deref().map(bucket_start);
        [
            self.genre.as_deref(),
            self.decade.as_deref(),
            bucket,
            self.director.as_deref(),
            self.star.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    }
}

/// "90-119" -> "90"; anything else passes through
fn bucket_start(label: &str) -> &str {
    match label.trim().split_once('-') {
        Some((start, _)) if start.trim().parse::<u32>().is_ok() => start.trim(),
        _ => label,
    }
}

/// A single result row with its source movie's display fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecommendation {
    pub row: RowId,
    pub title: String,
    pub genre: String,
    pub year: Option<i32>,
    pub runtime: Option<u32>,
    pub rating: Option<f32>,
    pub director: String,
    pub star: String,
    /// Cosine similarity in [0, 1]
    pub score: f32,
    /// Which index produced this result
    pub view: ViewKind,
}

impl MovieRecommendation {
    fn from_scored(movie: &Movie, scored: ScoredRow, view: ViewKind) -> Self {
        Self {
            row: scored.row,
            title: movie.title.clone(),
            genre: movie.genre.clone(),
            year: movie.year,
            runtime: movie.runtime,
            rating: movie.rating,
            director: movie.director.clone(),
            star: movie.star.clone(),
            score: scored.score,
            view,
        }
    }
}

/// Content-based recommendation engine over one corpus
#[derive(Debug, Clone)]
pub struct Engine {
    corpus: Corpus,
    catalog: FacetCatalog,
    facet_index: TfIdfIndex,
    free_text_index: TfIdfIndex,
    item_index: TfIdfIndex,
    /// View backing `item_index` after resolving `ItemViewMode::Auto`
    item_view: ViewKind,
    ranker: SimilarityRanker,
    config: EngineConfig,
}

impl Engine {
    /// Load a corpus from `path` and build every index over it
    pub fn load(path: &Path, config: EngineConfig) -> Result<Self> {
        let corpus = load_corpus(path)?;
        Self::build(corpus, config)
    }

    /// Build the derived fields, facet catalog and all three indexes.
    ///
    /// # Errors
    /// `IndexBuild` when a view yields no vocabulary, which means the
    /// corpus carries no usable text for that view.
    #[instrument(skip_all, fields(movies = corpus.len()))]
    pub fn build(corpus: Corpus, config: EngineConfig) -> Result<Self> {
        let start = Instant::now();

        let synthesizer = FeatureSynthesizer::new(&corpus);
        let catalog = FacetCatalog::build(&corpus, synthesizer.derived());

        let facet_index = fit_view(&corpus, &synthesizer, &FacetView)?;
        let free_text_index = fit_view(&corpus, &synthesizer, &FreeTextView)?;

        let use_rich = match config.item_view {
            ItemViewMode::Auto => corpus.has_secondary_metadata(),
            ItemViewMode::Rich => true,
            ItemViewMode::Facet => false,
        };
        let (item_index, item_view) = if use_rich {
            (
                fit_view(&corpus, &synthesizer, &ItemSimilarityView)?,
                ViewKind::ItemSimilarity,
            )
        } else {
            if config.item_view == ItemViewMode::Auto {
                warn!("Corpus has no TMDB metadata; item similarity uses the facet view");
            }
            (facet_index.clone(), ViewKind::Facet)
        };

        let ranker = SimilarityRanker::new().with_top_k(config.top_k);

        info!(
            "Engine built in {:?}: {} movies, vocabularies facet={} free-text={} item={} ({})",
            start.elapsed(),
            corpus.len(),
            facet_index.vocabulary_size(),
            free_text_index.vocabulary_size(),
            item_index.vocabulary_size(),
            item_view
        );

        Ok(Self {
            corpus,
            catalog,
            facet_index,
            free_text_index,
            item_index,
            item_view,
            ranker,
            config,
        })
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The view actually backing item similarity
    pub fn item_view(&self) -> ViewKind {
        self.item_view
    }

    /// Top-k movies for a set of facet selections, ordered by rating
    /// descending (movies without a rating last).
    ///
    /// # Errors
    /// `InvalidQuery` when every selection is empty.
    #[instrument(skip(self))]
    pub fn query_by_facets(&self, query: &FacetQuery) -> Result<Vec<MovieRecommendation>> {
        if query.is_empty() {
            return Err(EngineError::invalid_query("no facet selected"));
        }

        let text = query.to_query_string();
        debug!("Facet query string: '{}'", text);

        let scored = self.ranker.rank_by_query(&text, &self.facet_index);
        let mut results = self.to_recommendations(scored, ViewKind::Facet);

        // stable: equal ratings keep similarity order
        results.sort_by(|a, b| match (a.rating, b.rating) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Ok(results)
    }

    /// Top-k movies for free text, ordered by similarity.
    ///
    /// # Errors
    /// `InvalidQuery` for blank text or text containing control characters.
    #[instrument(skip(self))]
    pub fn query_by_text(&self, text: &str) -> Result<Vec<MovieRecommendation>> {
        let text = sanitize_text(text)?;
        let scored = self.ranker.rank_by_query(text, &self.free_text_index);
        Ok(self.to_recommendations(scored, ViewKind::FreeText))
    }

    /// Free text wins when present; otherwise the facet selections are used.
    pub fn recommend(
        &self,
        facets: &FacetQuery,
        text: Option<&str>,
    ) -> Result<Vec<MovieRecommendation>> {
        match text {
            Some(text) if !text.trim().is_empty() => self.query_by_text(text),
            _ if facets.is_empty() => Err(EngineError::invalid_query(
                "select at least one facet or enter some text",
            )),
            _ => self.query_by_facets(facets),
        }
    }

    /// Top-k movies most similar to `title`, never including it.
    ///
    /// When several rows share the title, the first one is the reference and
    /// none of them appear in the results.
    ///
    /// # Errors
    /// `MovieNotFound` when no movie has exactly this title.
    #[instrument(skip(self))]
    pub fn similar_to(&self, title: &str) -> Result<Vec<MovieRecommendation>> {
        let row = self
            .corpus
            .find_by_title(title)
            .ok_or_else(|| EngineError::MovieNotFound {
                title: title.to_string(),
            })?;

        // later rows sharing the title are the same film as far as the caller can tell
        let namesakes: Vec<RowId> = self
            .corpus
            .duplicate_titles()
            .iter()
            .copied()
            .filter(|&dup| {
                self.corpus
                    .get_movie(dup)
                    .is_some_and(|movie| movie.title == title)
            })
            .collect();

        let scored = self
            .ranker
            .rank_by_item_excluding(row, &namesakes, &self.item_index)?;
        Ok(self.to_recommendations(scored, self.item_view))
    }

    pub fn list_genres(&self) -> Vec<String> {
        self.catalog.genres()
    }

    pub fn list_decades(&self) -> Vec<String> {
        self.catalog.decades()
    }

    /// Directors with the most movies, `facet_top_n` long
    pub fn list_top_directors(&self) -> Vec<String> {
        self.catalog.top_directors(self.config.facet_top_n)
    }

    /// Lead stars with the most movies, `facet_top_n` long
    pub fn list_top_stars(&self) -> Vec<String> {
        self.catalog.top_stars(self.config.facet_top_n)
    }

    pub fn list_runtime_buckets(&self) -> Vec<String> {
        self.catalog.runtime_buckets()
    }

    /// Number of movies directed by `name`, 0 if unknown
    pub fn director_count(&self, name: &str) -> usize {
        self.catalog.director_count(name)
    }

    /// Number of movies led by `name`, 0 if unknown
    pub fn star_count(&self, name: &str) -> usize {
        self.catalog.star_count(name)
    }

    fn to_recommendations(&self, scored: Vec<ScoredRow>, view: ViewKind) -> Vec<MovieRecommendation> {
        scored
            .into_iter()
            .filter_map(|scored| {
                self.corpus
                    .get_movie(scored.row)
                    .map(|movie| MovieRecommendation::from_scored(movie, scored, view))
            })
            .collect()
    }
}

/// Load a corpus from disk, surfacing loader failures as `DataLoad`
pub fn load_corpus(path: &Path) -> Result<Corpus> {
    Ok(Corpus::load_from_file(path)?)
}

fn fit_view(
    corpus: &Corpus,
    synthesizer: &FeatureSynthesizer,
    view: &dyn FeatureView,
) -> Result<TfIdfIndex> {
    let strings = synthesizer.synthesize(corpus, view);
    TfIdfIndex::fit(&strings).map_err(|source| EngineError::IndexBuild {
        view: view.kind(),
        source,
    })
}

fn sanitize_text(text: &str) -> Result<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(EngineError::invalid_query("query text is empty"));
    }
    if let Some(c) = text.chars().find(|&c| is_disallowed(c)) {
        return Err(EngineError::invalid_query(format!(
            "query text contains disallowed character U+{:04X}",
            c as u32
        )));
    }
    Ok(trimmed)
}

/// Other (Cc, Cf, Co, Cn, Cs) and any separator except the ASCII space
fn is_disallowed(c: char) -> bool {
    c != ' '
        && matches!(
            get_general_category(c),
            GeneralCategory::Control
                | GeneralCategory::Format
                | GeneralCategory::PrivateUse
                | GeneralCategory::Unassigned
                | GeneralCategory::Surrogate
                | GeneralCategory::SpaceSeparator
                | GeneralCategory::LineSeparator
                | GeneralCategory::ParagraphSeparator
        )
}
