//! The corpus arena
//!
//! A [`Corpus`] owns the passages and every structure derived from them at
//! build time. All per-passage data lives in parallel vectors that share one
//! index space: passage `i`'s text, label, stems, TF-IDF vector, confusers,
//! anchors, and neighbors are all found at index `i`. Nothing is mutated after
//! [`Corpus::build`] returns; a changed document set means building a new
//! corpus and replacing the old one wholesale.

use crate::anchors::{extract_anchors, find_confusers};
use crate::errors::{AnchorageError, Result};
use crate::neighbors::build_neighbors;
use crate::nlp::tokenizer::Tokenizer;
use crate::types::{AnchorTerm, BuildConfig};
use crate::weights::TermWeights;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

/// Optional inputs to [`Corpus::build`]
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Display labels, one per passage (default: `"passage {i}"`)
    pub labels: Option<Vec<String>>,
    /// Cluster label per passage index; neighbors are restricted to passages
    /// with an equal label. Passages missing from the map share the "no
    /// label" cluster.
    pub cluster_map: Option<FxHashMap<usize, String>>,
    pub config: BuildConfig,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set display labels
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Builder method: set cluster labels
    pub fn with_cluster_map(mut self, cluster_map: FxHashMap<usize, String>) -> Self {
        self.cluster_map = Some(cluster_map);
        self
    }

    /// Builder method: set build parameters
    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }
}

/// Summary of a built corpus
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusStats {
    pub passages: usize,
    pub vocabulary_size: usize,
    pub anchor_k: usize,
    pub confuser_k: usize,
    pub neighbor_radius: usize,
    /// Whether neighborhoods were cluster-filtered
    pub clustered: bool,
}

/// A built, read-only passage corpus
#[derive(Debug, Clone)]
pub struct Corpus {
    passages: Vec<String>,
    labels: Vec<String>,
    paragraph_stems: Vec<Vec<String>>,
    stem_sets: Vec<FxHashSet<String>>,
    weights: TermWeights,
    confusers: Vec<Vec<usize>>,
    anchors: Vec<Vec<AnchorTerm>>,
    neighbors: Vec<Vec<usize>>,
    cluster_labels: Option<Vec<Option<String>>>,
    config: BuildConfig,
    tokenizer: Tokenizer,
}

/// Build a corpus; see [`Corpus::build`].
pub fn build_corpus<S: AsRef<str>>(passages: &[S], options: BuildOptions) -> Result<Corpus> {
    Corpus::build(passages, options)
}

impl Corpus {
    /// Build a corpus with default options
    pub fn from_passages<S: AsRef<str>>(passages: &[S]) -> Result<Self> {
        Self::build(passages, BuildOptions::default())
    }

    /// Build every derived structure for `passages`.
    ///
    /// Fails only on caller errors: an invalid [`BuildConfig`], a label count
    /// that differs from the passage count, or a cluster-map key outside the
    /// passage range. An empty passage list builds an empty corpus.
    pub fn build<S: AsRef<str>>(passages: &[S], options: BuildOptions) -> Result<Self> {
        let BuildOptions {
            labels,
            cluster_map,
            config,
        } = options;
        config.validate()?;

        let n = passages.len();
        let passages: Vec<String> = passages.iter().map(|p| p.as_ref().to_string()).collect();

        let labels = match labels {
            Some(labels) if labels.len() != n => {
                return Err(AnchorageError::invalid_input(format!(
                    "{} labels for {} passages",
                    labels.len(),
                    n
                )));
            }
            Some(labels) => labels,
            None => (0..n).map(|i| format!("passage {i}")).collect(),
        };

        let cluster_labels = match cluster_map {
            Some(map) => {
                if let Some(bad) = map.keys().copied().filter(|&k| k >= n).min() {
                    return Err(AnchorageError::invalid_input(format!(
                        "cluster_map key {bad} is out of range for {n} passages"
                    )));
                }
                Some((0..n).map(|i| map.get(&i).cloned()).collect::<Vec<_>>())
            }
            None => None,
        };

        let tokenizer = Tokenizer::new();

        let paragraph_stems: Vec<Vec<String>> = {
            trace_stage!("normalize");
            passages.iter().map(|p| tokenizer.content_stems(p)).collect()
        };
        let stem_sets: Vec<FxHashSet<String>> = paragraph_stems
            .iter()
            .map(|stems| stems.iter().cloned().collect())
            .collect();

        let weights = {
            trace_stage!("weights");
            TermWeights::build(&paragraph_stems)
        };

        let confusers = {
            trace_stage!("confusers");
            find_confusers(weights.vectors(), config.confuser_k, config.parallel)
        };

        let anchors = {
            trace_stage!("anchors");
            extract_anchors(
                &paragraph_stems,
                &stem_sets,
                &weights,
                &confusers,
                config.anchor_k,
                config.confuser_k,
            )
        };

        let neighbors = {
            trace_stage!("neighbors");
            build_neighbors(n, config.neighbor_radius, cluster_labels.as_deref())
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            passages = n,
            vocabulary = weights.len(),
            "corpus built"
        );

        Ok(Self {
            passages,
            labels,
            paragraph_stems,
            stem_sets,
            weights,
            confusers,
            anchors,
            neighbors,
            cluster_labels,
            config,
            tokenizer,
        })
    }

    /// Number of passages
    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    pub fn passages(&self) -> &[String] {
        &self.passages
    }

    /// Raw text of a passage
    pub fn text(&self, index: usize) -> Option<&str> {
        self.passages.get(index).map(|s| s.as_str())
    }

    /// Display label of a passage
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(|s| s.as_str())
    }

    /// Content stems of a passage, in text order
    pub fn stems(&self, index: usize) -> Option<&[String]> {
        self.paragraph_stems.get(index).map(|s| s.as_slice())
    }

    /// Anchor terms of a passage, best first
    pub fn anchors(&self, index: usize) -> Option<&[AnchorTerm]> {
        self.anchors.get(index).map(|a| a.as_slice())
    }

    /// Confusers of a passage, most similar first
    pub fn confusers(&self, index: usize) -> Option<&[usize]> {
        self.confusers.get(index).map(|c| c.as_slice())
    }

    /// Neighbors of a passage, ascending
    pub fn neighbors(&self, index: usize) -> Option<&[usize]> {
        self.neighbors.get(index).map(|n| n.as_slice())
    }

    /// Cluster label of a passage, if a cluster map was supplied and covers it
    pub fn cluster_label(&self, index: usize) -> Option<&str> {
        self.cluster_labels
            .as_ref()
            .and_then(|labels| labels.get(index))
            .and_then(|label| label.as_deref())
    }

    pub fn weights(&self) -> &TermWeights {
        &self.weights
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub(crate) fn contains_stem(&self, index: usize, stem: &str) -> bool {
        self.stem_sets[index].contains(stem)
    }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            passages: self.len(),
            vocabulary_size: self.weights.len(),
            anchor_k: self.config.anchor_k,
            confuser_k: self.config.confuser_k,
            neighbor_radius: self.config.neighbor_radius,
            clustered: self.cluster_labels.is_some(),
        }
    }
}
