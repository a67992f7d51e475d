//! TF-IDF vector index.
//!
//! Fits a vocabulary and inverse document frequencies over one column of
//! feature strings and keeps one L2-normalized vector per row.
//!
//! ## Weighting
//! - tf: raw count of the term in the document
//! - idf: `ln((1 + n) / (1 + df)) + 1`, finite and positive even for terms
//!   that occur in every document or in exactly one
//! - each row vector is scaled to unit length
//!
//! The fitted state is immutable. A changed corpus means fitting a new index.

use crate::error::{IndexError, Result};
use crate::tokenizer::tokenize;
use crate::types::SparseVector;
use data_loader::RowId;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, instrument};

/// A fitted term-weighting index over one feature view
#[derive(Debug, Clone)]
pub struct TfIdfIndex {
    /// term -> dimension, dimensions assigned in sorted term order
    vocabulary: HashMap<String, u32>,
    /// Sorted terms; `terms[dim]` is the term for that dimension
    terms: Vec<String>,
    idf: Vec<f32>,
    /// One unit vector (or zero vector) per fitted document, row-aligned
    rows: Vec<SparseVector>,
}

impl TfIdfIndex {
    /// Fit the index over a column of documents.
    ///
    /// Fails when no document contributes a single term: an index with an
    /// empty vocabulary can't rank anything.
    #[instrument(skip(documents), fields(documents = documents.len()))]
    pub fn fit<S: AsRef<str> + Sync>(documents: &[S]) -> Result<Self> {
        let tokenized: Vec<Vec<String>> = documents
            .par_iter()
            .map(|doc| tokenize(doc.as_ref()))
            .collect();

        // BTreeMap keeps the vocabulary ordering independent of hashing
        let mut doc_freq: BTreeMap<&str, u32> = BTreeMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            return Err(IndexError::EmptyVocabulary {
                documents: documents.len(),
            });
        }

        let n = documents.len() as f32;
        let mut vocabulary = HashMap::with_capacity(doc_freq.len());
        let mut terms = Vec::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (dim, (term, df)) in doc_freq.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), dim as u32);
            terms.push(term.to_string());
            idf.push(((1.0 + n) / (1.0 + df as f32)).ln() + 1.0);
        }

        let mut index = Self {
            vocabulary,
            terms,
            idf,
            rows: Vec::new(),
        };
        let rows: Vec<SparseVector> = tokenized
            .par_iter()
            .map(|tokens| index.weigh(tokens))
            .collect();
        index.rows = rows;

        debug!(
            "Fitted TF-IDF index: {} rows, {} terms",
            index.rows.len(),
            index.terms.len()
        );
        Ok(index)
    }

    /// Map arbitrary text into this index's vector space.
    ///
    /// Terms outside the fitted vocabulary are ignored; text with no known
    /// terms yields the zero vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&tokenize(text))
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts: HashMap<u32, f32> = HashMap::new();
        for token in tokens {
            if let Some(&dim) = self.vocabulary.get(token) {
                *counts.entry(dim).or_insert(0.0) += 1.0;
            }
        }

        let entries = counts
            .into_iter()
            .map(|(dim, tf)| (dim, tf * self.idf[dim as usize]))
            .collect();
        let mut vector = SparseVector::from_entries(entries);
        vector.normalize();
        vector
    }

    /// The fitted vector for a row
    pub fn row_vector(&self, row: RowId) -> Result<&SparseVector> {
        self.rows.get(row).ok_or(IndexError::RowOutOfRange {
            row,
            rows: self.rows.len(),
        })
    }

    /// All fitted vectors in row order
    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Vocabulary in dimension order (sorted)
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.vocabulary.get(term).map(|&dim| self.idf[dim as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<&'static str> {
        vec![
            "Action, Adventure 1980 90 Steven Spielberg Harrison Ford",
            "Drama 1990 120 Frank Darabont Tim Robbins",
            "Drama, Romance 1990 120 Robert Zemeckis Tom Hanks",
        ]
    }

    #[test]
    fn test_fit_builds_sorted_vocabulary() {
        let index = TfIdfIndex::fit(&docs()).unwrap();
        assert_eq!(index.len(), 3);
        assert!(index.terms().windows(2).all(|w| w[0] < w[1]));
        assert!(index.terms().contains(&"spielberg".to_string()));
    }

    #[test]
    fn test_idf_is_finite_and_positive() {
        let index = TfIdfIndex::fit(&docs()).unwrap();

        // in one document: ln(4/2) + 1
        let rare = index.idf("spielberg").unwrap();
        assert!((rare - (2.0f32.ln() + 1.0)).abs() < 1e-6);

        // in two documents: ln(4/3) + 1
        let common = index.idf("drama").unwrap();
        assert!(common > 1.0 && common < rare);
    }

    #[test]
    fn test_rows_are_unit_vectors() {
        let index = TfIdfIndex::fit(&docs()).unwrap();
        for row in index.rows() {
            assert!((row.norm() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_transform_ignores_unknown_terms() {
        let index = TfIdfIndex::fit(&docs()).unwrap();

        assert!(index.transform("xyzzy quantum blockchain").is_zero());
        assert!(index.transform("").is_zero());

        let v = index.transform("Spielberg xyzzy");
        assert_eq!(v.nnz(), 1);
    }

    #[test]
    fn test_fit_rejects_empty_vocabulary() {
        let empty: Vec<&str> = vec![];
        assert!(matches!(
            TfIdfIndex::fit(&empty),
            Err(IndexError::EmptyVocabulary { documents: 0 })
        ));

        let stop_words_only = vec!["the of and", "a"];
        assert!(matches!(
            TfIdfIndex::fit(&stop_words_only),
            Err(IndexError::EmptyVocabulary { documents: 2 })
        ));
    }

    #[test]
    fn test_row_vector_out_of_range() {
        let index = TfIdfIndex::fit(&docs()).unwrap();
        assert!(index.row_vector(2).is_ok());
        assert!(matches!(
            index.row_vector(3),
            Err(IndexError::RowOutOfRange { row: 3, rows: 3 })
        ));
    }

    #[test]
    fn test_fit_is_deterministic() {
        let a = TfIdfIndex::fit(&docs()).unwrap();
        let b = TfIdfIndex::fit(&docs()).unwrap();
        assert_eq!(a.terms(), b.terms());
        assert_eq!(a.rows(), b.rows());
    }
}
