//! Term-weight model
//!
//! Document frequency, inverse document frequency, and L2-normalized TF-IDF
//! vectors over a lexicographically ordered vocabulary.
//!
//! Vectors are stored sparsely as `(term index, weight)` pairs sorted by term
//! index. All weights are non-negative, so a sparse dot product sums exactly
//! the same non-zero products, in the same order, as the dense one would.

use rustc_hash::{FxHashMap, FxHashSet};

/// Scale a vector to unit Euclidean length in place.
///
/// A zero vector is left unchanged.
pub fn l2_normalize(values: &mut [f64]) {
    let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm == 0.0 {
        return;
    }
    for v in values.iter_mut() {
        *v /= norm;
    }
}

/// A TF-IDF vector with only its non-zero components stored
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    /// Sorted by term index, no duplicates, no zero weights
    entries: Vec<(u32, f64)>,
}

impl SparseVector {
    /// Build from arbitrary `(index, weight)` pairs.
    ///
    /// Pairs are sorted by index and zero weights dropped. Indices must be
    /// unique.
    pub fn from_entries(mut entries: Vec<(u32, f64)>) -> Self {
        entries.retain(|&(_, w)| w != 0.0);
        entries.sort_by_key(|&(idx, _)| idx);
        Self { entries }
    }

    pub fn entries(&self) -> &[(u32, f64)] {
        &self.entries
    }

    /// Number of non-zero components
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Normalize to unit length in place (no-op for the zero vector)
    pub fn normalize(&mut self) {
        let mut weights: Vec<f64> = self.entries.iter().map(|&(_, w)| w).collect();
        l2_normalize(&mut weights);
        for (entry, w) in self.entries.iter_mut().zip(weights) {
            entry.1 = w;
        }
    }

    /// Dot product by merging the two sorted entry lists.
    ///
    /// For unit vectors this is their cosine similarity.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
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

    /// Dense view over a vocabulary of `dim` terms
    pub fn to_dense(&self, dim: usize) -> Vec<f64> {
        let mut dense = vec![0.0; dim];
        for &(idx, w) in &self.entries {
            if let Some(slot) = dense.get_mut(idx as usize) {
                *slot = w;
            }
        }
        dense
    }
}

/// Corpus-wide term statistics and per-passage TF-IDF vectors
#[derive(Debug, Clone, Default)]
pub struct TermWeights {
    /// Sorted vocabulary; position is the vector component index
    vocabulary: Vec<String>,
    term_index: FxHashMap<String, u32>,
    /// Indexed by term index
    document_frequency: Vec<usize>,
    /// Indexed by term index
    idf: Vec<f64>,
    /// Indexed by passage
    vectors: Vec<SparseVector>,
}

impl TermWeights {
    /// Build the model from each passage's content stems.
    ///
    /// An empty corpus yields an empty model.
    pub fn build(passage_stems: &[Vec<String>]) -> Self {
        let n = passage_stems.len();

        let mut df: FxHashMap<&str, usize> = FxHashMap::default();
        for stems in passage_stems {
            let unique: FxHashSet<&str> = stems.iter().map(|s| s.as_str()).collect();
            for term in unique {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        let mut vocabulary: Vec<String> = df.keys().map(|s| s.to_string()).collect();
        vocabulary.sort();

        let term_index: FxHashMap<String, u32> = vocabulary
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx as u32))
            .collect();

        let document_frequency: Vec<usize> = vocabulary
            .iter()
            .map(|term| df.get(term.as_str()).copied().unwrap_or(0))
            .collect();

        // df >= 1 for every vocabulary term and df <= n, so idf is finite and >= 0
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&d| (n as f64 / d as f64).ln())
            .collect();

        let vectors = passage_stems
            .iter()
            .map(|stems| {
                let mut tf: FxHashMap<u32, usize> = FxHashMap::default();
                for stem in stems {
                    if let Some(&idx) = term_index.get(stem) {
                        *tf.entry(idx).or_insert(0) += 1;
                    }
                }
                let entries = tf
                    .into_iter()
                    .map(|(idx, count)| (idx, count as f64 * idf[idx as usize]))
                    .collect();
                let mut vector = SparseVector::from_entries(entries);
                vector.normalize();
                vector
            })
            .collect();

        Self {
            vocabulary,
            term_index,
            document_frequency,
            idf,
            vectors,
        }
    }

    /// Sorted vocabulary
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Vocabulary size
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Number of passages the model was built from
    pub fn num_passages(&self) -> usize {
        self.vectors.len()
    }

    pub fn term_index(&self, term: &str) -> Option<u32> {
        self.term_index.get(term).copied()
    }

    /// IDF of a term; 0 for terms outside the vocabulary
    pub fn idf(&self, term: &str) -> f64 {
        self.term_index(term)
            .map_or(0.0, |idx| self.idf[idx as usize])
    }

    /// Passages containing the term; 0 for terms outside the vocabulary
    pub fn document_frequency(&self, term: &str) -> usize {
        self.term_index(term)
            .map_or(0, |idx| self.document_frequency[idx as usize])
    }

    /// TF-IDF vector of a passage
    pub fn vector(&self, passage: usize) -> Option<&SparseVector> {
        self.vectors.get(passage)
    }

    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }
}
