//! Vector and result types for similarity ranking.

use data_loader::RowId;

/// Sparse weight vector: (term index, weight) pairs sorted by term index.
///
/// Only non-zero weights are stored. All vectors produced by one index share
/// its term numbering; vectors from different indexes are not comparable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(u32, f32)>,
}

impl SparseVector {
    /// Build from pairs, sorting by term index and dropping zero weights
    pub fn from_entries(mut entries: Vec<(u32, f32)>) -> Self {
        entries.retain(|&(_, w)| w != 0.0);
        entries.sort_unstable_by_key(|&(term, _)| term);
        Self { entries }
    }

    pub fn entries(&self) -> &[(u32, f32)] {
        &self.entries
    }

    /// Number of non-zero terms
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Scale to unit length in place (no-op for the zero vector)
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }

    /// Dot product via a merge walk over both sorted entry lists
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let (a, b) = (&self.entries, &other.entries);
        let mut sum = 0.0;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Cosine similarity: dot / (|a| * |b|), 0 when either side is zero
    pub fn cosine(&self, other: &SparseVector) -> f32 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            return 0.0;
        }
        (self.dot(other) / denom).clamp(0.0, 1.0)
    }
}

/// One ranked row and its similarity to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRow {
    pub row: RowId,
    pub score: f32,
}

impl ScoredRow {
    pub fn new(row: RowId, score: f32) -> Self {
        Self { row, score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_entries_sorts_and_drops_zeros() {
        let v = SparseVector::from_entries(vec![(5, 1.0), (1, 2.0), (3, 0.0)]);
        assert_eq!(v.entries(), &[(1, 2.0), (5, 1.0)]);
        assert_eq!(v.nnz(), 2);
    }

    #[test]
    fn test_dot_and_cosine() {
        let a = SparseVector::from_entries(vec![(0, 1.0), (2, 1.0)]);
        let b = SparseVector::from_entries(vec![(2, 1.0), (3, 1.0)]);
        assert_eq!(a.dot(&b), 1.0);
        assert!((a.cosine(&b) - 0.5).abs() < 1e-6);
        assert!((a.cosine(&a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        let zero = SparseVector::default();
        let a = SparseVector::from_entries(vec![(0, 1.0)]);
        assert!(zero.is_zero());
        assert_eq!(zero.cosine(&a), 0.0);
        assert_eq!(a.cosine(&zero), 0.0);
    }

    #[test]
    fn test_normalize() {
        let mut v = SparseVector::from_entries(vec![(0, 3.0), (1, 4.0)]);
        v.normalize();
        assert!((v.norm() - 1.0).abs() < 1e-6);
        assert_eq!(v.entries()[0], (0, 0.6));
    }
}
