//! Similarity Ranker - nearest neighbours by cosine similarity
//!
//! Two modes over a fitted `TfIdfIndex`:
//! - query mode: transform free text, score it against every row
//! - item mode: reuse a row's fitted vector, score it against every other row
//!
//! ## Ordering
//! Results are sorted by score descending with a stable sort, so equal
//! scores keep corpus row order. A query with no known terms scores every
//! row 0 and therefore returns the first k rows.

use crate::error::Result;
use crate::types::{ScoredRow, SparseVector};
use crate::vectorizer::TfIdfIndex;
use data_loader::RowId;
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Default number of results per request
pub const DEFAULT_TOP_K: usize = 10;

/// Ranks rows of a fitted index against a query or a reference row
#[derive(Debug, Clone, Copy)]
pub struct SimilarityRanker {
    top_k: usize,
}

impl SimilarityRanker {
    /// Create a ranker returning `DEFAULT_TOP_K` rows
    pub fn new() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Configure how many rows to return (default: 10)
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Rank every row of `index` against free text
    #[instrument(skip(self, index), fields(k = self.top_k))]
    pub fn rank_by_query(&self, text: &str, index: &TfIdfIndex) -> Vec<ScoredRow> {
        let query = index.transform(text);
        if query.is_zero() {
            debug!("Query has no in-vocabulary terms; falling back to row order");
        }
        let scored = score_all(&query, index, None);
        self.select_top(scored)
    }

    /// Rank every other row of `index` against the fitted vector of `row`
    #[instrument(skip(self, index), fields(k = self.top_k))]
    pub fn rank_by_item(&self, row: RowId, index: &TfIdfIndex) -> Result<Vec<ScoredRow>> {
        self.rank_by_item_excluding(row, &[], index)
    }

    /// Item mode that also drops every row in `excluded` from the results
    #[instrument(skip(self, excluded, index), fields(k = self.top_k, excluded = excluded.len()))]
    pub fn rank_by_item_excluding(
        &self,
        row: RowId,
        excluded: &[RowId],
        index: &TfIdfIndex,
    ) -> Result<Vec<ScoredRow>> {
        let reference = index.row_vector(row)?;
        let scored: Vec<ScoredRow> = score_all(reference, index, Some(row))
            .into_iter()
            .filter(|scored| !excluded.contains(&scored.row))
            .collect();
        Ok(self.select_top(scored))
    }

    fn select_top(&self, mut scored: Vec<ScoredRow>) -> Vec<ScoredRow> {
        // sort_by is stable: ties stay in row order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(self.top_k);
        debug!("Selected {} rows", scored.len());
        scored
    }
}

impl Default for SimilarityRanker {
    fn default() -> Self {
        Self::new()
    }
}

/// Cosine of `query` against every fitted row, in row order, minus `exclude`
fn score_all(query: &SparseVector, index: &TfIdfIndex, exclude: Option<RowId>) -> Vec<ScoredRow> {
    let scored: Vec<ScoredRow> = index
        .rows()
        .par_iter()
        .enumerate()
        .map(|(row, vector)| ScoredRow::new(row, query.cosine(vector)))
        .collect();

    scored
        .into_iter()
        .filter(|scored| Some(scored.row) != exclude)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_index() -> TfIdfIndex {
        TfIdfIndex::fit(&[
            "Drama 1990 120 Frank Darabont Tim Robbins",
            "Crime, Drama 1970 150 Francis Coppola Marlon Brando",
            "Action, Adventure 1980 90 Steven Spielberg Harrison Ford",
            "Action, Adventure 1980 120 Steven Spielberg Harrison Ford",
            "Drama, Romance 1990 120 Robert Zemeckis Tom Hanks",
            "Comedy 2000 90 Wes Anderson Bill Murray",
        ])
        .unwrap()
    }

    fn assert_sorted(results: &[ScoredRow]) {
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                assert!(pair[0].row < pair[1].row, "ties must keep row order");
            }
        }
    }

    #[test]
    fn test_rank_by_query_finds_matching_rows() {
        let index = build_index();
        let results = SimilarityRanker::new().rank_by_query("Action 1980 Spielberg", &index);

        assert_eq!(results.len(), 6);
        assert_sorted(&results);
        let top: Vec<RowId> = results.iter().take(2).map(|r| r.row).collect();
        assert!(top.contains(&2) && top.contains(&3));
        assert!(results[0].score > 0.0 && results[0].score <= 1.0);
    }

    #[test]
    fn test_rank_by_query_truncates_to_k() {
        let index = build_index();
        let results = SimilarityRanker::new()
            .with_top_k(2)
            .rank_by_query("Drama", &index);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_zero_query_falls_back_to_row_order() {
        let index = build_index();
        let ranker = SimilarityRanker::new().with_top_k(3);

        for text in ["", "the of and", "xyzzy"] {
            let results = ranker.rank_by_query(text, &index);
            let rows: Vec<RowId> = results.iter().map(|r| r.row).collect();
            assert_eq!(rows, vec![0, 1, 2]);
            assert!(results.iter().all(|r| r.score == 0.0));
        }
    }

    #[test]
    fn test_rank_by_item_excludes_reference() {
        let index = build_index();
        let ranker = SimilarityRanker::new();

        for row in 0..index.len() {
            let results = ranker.rank_by_item(row, &index).unwrap();
            assert_eq!(results.len(), index.len() - 1);
            assert!(results.iter().all(|r| r.row != row));
            assert_sorted(&results);
        }
    }

    #[test]
    fn test_rank_by_item_prefers_near_duplicate() {
        let index = build_index();
        let results = SimilarityRanker::new().rank_by_item(2, &index).unwrap();
        assert_eq!(results[0].row, 3);
    }

    #[test]
    fn test_rank_by_item_excluding_drops_extra_rows() {
        let index = build_index();
        let results = SimilarityRanker::new()
            .rank_by_item_excluding(2, &[3, 5], &index)
            .unwrap();

        assert_eq!(results.len(), index.len() - 3);
        assert!(results.iter().all(|r| ![2, 3, 5].contains(&r.row)));
        assert_sorted(&results);
    }

    #[test]
    fn test_rank_by_item_unknown_row() {
        let index = build_index();
        assert!(SimilarityRanker::new().rank_by_item(99, &index).is_err());
    }

    #[test]
    fn test_rankings_are_repeatable() {
        let a = SimilarityRanker::new().rank_by_query("Drama 1990", &build_index());
        let b = SimilarityRanker::new().rank_by_query("Drama 1990", &build_index());
        assert_eq!(a, b);
    }
}
