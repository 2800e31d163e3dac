//! Query evaluation
//!
//! A query runs in strictly ordered steps:
//!
//! 1. normalize the query into a set of content stems;
//! 2. rank every passage by its SPECTRA score (IDF mass of the overlapping
//!    stems, divided by the query size) and keep the top `top_n`;
//! 3. enrich each shortlisted passage with its anchor hits and
//!    neighborhood resonance;
//! 4. compute the confidence margin between the first two candidates;
//! 5. classify the margin.
//!
//! Steps 3-5 only shape the reported confidence. The shortlist from step 2 is
//! returned exactly as ranked: anchors and neighborhoods never reorder or drop
//! a candidate.

use crate::corpus::Corpus;
use crate::errors::Result;
use crate::nlp::tokenizer::unique_in_order;
use crate::types::{Confidence, ConfidenceLevel, QueryConfig, MAX_MARGIN, MIN_MARGIN};
use rayon::prelude::*;
use serde::Serialize;

/// Floor for the denominators of the margin formula.
const MARGIN_EPSILON: f64 = 1e-10;

/// A shortlisted passage with its confidence signals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub index: usize,
    pub label: String,
    pub text: String,
    /// Overlap-IDF score used for ranking
    pub spectra_score: f64,
    /// Anchor terms of this passage present in the query, in anchor rank order
    pub anchor_hits: Vec<String>,
    /// `|anchor_hits| / max(|anchors|, 1)`
    pub anchor_ratio: f64,
    /// Mean overlap-IDF score of this passage's neighbors
    pub neighbor_resonance: f64,
    /// Query stems found in this passage, in query order
    pub overlap: Vec<String>,
}

/// The ranked shortlist for one query and its confidence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub results: Vec<Candidate>,
    /// Within `[0.1, 100]`
    pub margin: f64,
    pub confidence: Confidence,
}

impl QueryResult {
    /// Best-ranked candidate
    pub fn top(&self) -> Option<&Candidate> {
        self.results.first()
    }

    pub fn level(&self) -> ConfidenceLevel {
        self.confidence.level
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }
}

/// Evaluate `query_text` against a built corpus.
///
/// Only an invalid [`QueryConfig`] is an error. An empty corpus yields no
/// candidates with the default margin of 100.
pub fn query(corpus: &Corpus, query_text: &str, config: &QueryConfig) -> Result<QueryResult> {
    config.validate()?;
    Ok(evaluate(corpus, query_text, config))
}

fn evaluate(corpus: &Corpus, query_text: &str, config: &QueryConfig) -> QueryResult {
    let q_stems = query_stems(corpus, query_text);

    let results: Vec<Candidate> = spectra_shortlist(corpus, &q_stems, config.top_n)
        .into_iter()
        .map(|(index, spectra_score)| enrich(corpus, index, spectra_score, &q_stems))
        .collect();

    let margin = confidence_margin(&results, config);
    let confidence = Confidence::from_margin(margin);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        query_terms = q_stems.len(),
        shortlisted = results.len(),
        margin,
        level = %confidence.level,
        "query evaluated"
    );

    QueryResult {
        results,
        margin,
        confidence,
    }
}

/// Distinct content stems of a query, in first-occurrence order
pub fn query_stems(corpus: &Corpus, query_text: &str) -> Vec<String> {
    unique_in_order(&corpus.tokenizer().content_stems(query_text))
}

/// Query stems present in a passage and their summed IDF over the query size.
fn overlap_score(corpus: &Corpus, index: usize, q_stems: &[String]) -> (Vec<String>, f64) {
    let overlap: Vec<String> = q_stems
        .iter()
        .filter(|stem| corpus.contains_stem(index, stem))
        .cloned()
        .collect();
    let idf_sum: f64 = overlap.iter().map(|stem| corpus.weights().idf(stem)).sum();
    let score = idf_sum / q_stems.len().max(1) as f64;
    (overlap, score)
}

/// SPECTRA score of every passage, in passage order
pub fn spectra_scores(corpus: &Corpus, q_stems: &[String]) -> Vec<f64> {
    (0..corpus.len())
        .map(|i| overlap_score(corpus, i, q_stems).1)
        .collect()
}

/// The `top_n` best passages as `(index, score)`, best first.
///
/// Equal scores keep ascending passage order.
pub fn spectra_shortlist(corpus: &Corpus, q_stems: &[String], top_n: usize) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = spectra_scores(corpus, q_stems)
        .into_iter()
        .enumerate()
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(top_n);
    ranked
}

/// Mean overlap score of a passage's neighbors (0 without neighbors)
pub fn neighbor_resonance(corpus: &Corpus, index: usize, q_stems: &[String]) -> f64 {
    let neighbors = corpus.neighbors(index).unwrap_or(&[]);
    if neighbors.is_empty() {
        return 0.0;
    }
    let total: f64 = neighbors
        .iter()
        .map(|&j| overlap_score(corpus, j, q_stems).1)
        .sum();
    total / neighbors.len() as f64
}

fn enrich(corpus: &Corpus, index: usize, spectra_score: f64, q_stems: &[String]) -> Candidate {
    let (overlap, _) = overlap_score(corpus, index, q_stems);

    let anchors = corpus.anchors(index).unwrap_or(&[]);
    let anchor_hits: Vec<String> = anchors
        .iter()
        .filter(|anchor| q_stems.contains(&anchor.term))
        .map(|anchor| anchor.term.clone())
        .collect();
    let anchor_ratio = anchor_hits.len() as f64 / anchors.len().max(1) as f64;

    Candidate {
        index,
        label: corpus.label(index).unwrap_or_default().to_string(),
        text: corpus.text(index).unwrap_or_default().to_string(),
        spectra_score,
        anchor_hits,
        anchor_ratio,
        neighbor_resonance: neighbor_resonance(corpus, index, q_stems),
        overlap,
    }
}

/// Confidence margin between the first two candidates.
///
/// ```text
/// raw    = (top.score - runner.score) / max(top.score, 1e-10) * 100
/// anchor = anchor_weight * (|top.anchor_hits| - |runner.anchor_hits|)
/// nbr    = neighbor_weight * (top.res - runner.res) / max(top.res, runner.res, 1e-10)
/// margin = clamp(raw + anchor + nbr, 0.1, 100)
/// ```
///
/// Fewer than two candidates means no ambiguity: the margin is 100.
pub fn confidence_margin(results: &[Candidate], config: &QueryConfig) -> f64 {
    let (top, runner) = match results {
        [top, runner, ..] => (top, runner),
        _ => return MAX_MARGIN,
    };

    let raw_margin =
        (top.spectra_score - runner.spectra_score) / top.spectra_score.max(MARGIN_EPSILON) * 100.0;

    let hit_delta = top.anchor_hits.len() as f64 - runner.anchor_hits.len() as f64;
    let anchor_adj = config.anchor_weight * hit_delta;

    let nbr_denominator = top
        .neighbor_resonance
        .max(runner.neighbor_resonance)
        .max(MARGIN_EPSILON);
    let nbr_adj = config.neighbor_weight * (top.neighbor_resonance - runner.neighbor_resonance)
        / nbr_denominator;

    (raw_margin + anchor_adj + nbr_adj).clamp(MIN_MARGIN, MAX_MARGIN)
}

impl Corpus {
    /// Evaluate a query; see [`query`].
    pub fn query(&self, query_text: &str, config: &QueryConfig) -> Result<QueryResult> {
        query(self, query_text, config)
    }

    /// SPECTRA score of every passage for `query_text`, in passage order
    pub fn spectra_scores(&self, query_text: &str) -> Vec<f64> {
        spectra_scores(self, &query_stems(self, query_text))
    }

    /// Evaluate independent queries on the rayon pool.
    ///
    /// Result `k` is identical to `self.query(queries[k], config)`.
    pub fn query_batch<S: AsRef<str> + Sync>(
        &self,
        queries: &[S],
        config: &QueryConfig,
    ) -> Result<Vec<QueryResult>> {
        config.validate()?;
        Ok(queries
            .par_iter()
            .map(|q| evaluate(self, q.as_ref(), config))
            .collect())
    }
}
