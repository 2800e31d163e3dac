//! Native Python interface
//!
//! Direct Python classes wrapping a built corpus and its query results.

use crate::corpus::{BuildOptions, Corpus, CorpusStats};
use crate::nlp::stopwords::StopwordFilter;
use crate::query::{Candidate, QueryResult};
use crate::types::{BuildConfig, QueryConfig};
use pyo3::exceptions::PyIndexError;
use pyo3::prelude::*;
use rustc_hash::FxHashMap;
use std::collections::HashMap;

/// A shortlisted passage
#[pyclass(name = "Candidate")]
#[derive(Clone)]
pub struct PyCandidate {
    #[pyo3(get)]
    pub index: usize,
    #[pyo3(get)]
    pub label: String,
    #[pyo3(get)]
    pub text: String,
    #[pyo3(get)]
    pub spectra_score: f64,
    #[pyo3(get)]
    pub anchor_hits: Vec<String>,
    #[pyo3(get)]
    pub anchor_ratio: f64,
    #[pyo3(get)]
    pub neighbor_resonance: f64,
    #[pyo3(get)]
    pub overlap: Vec<String>,
}

#[pymethods]
impl PyCandidate {
    fn __repr__(&self) -> String {
        format!(
            "Candidate(index={}, label='{}', spectra_score={:.4})",
            self.index, self.label, self.spectra_score
        )
    }
}

impl From<Candidate> for PyCandidate {
    fn from(c: Candidate) -> Self {
        Self {
            index: c.index,
            label: c.label,
            text: c.text,
            spectra_score: c.spectra_score,
            anchor_hits: c.anchor_hits,
            anchor_ratio: c.anchor_ratio,
            neighbor_resonance: c.neighbor_resonance,
            overlap: c.overlap,
        }
    }
}

/// Result of a query
#[pyclass(name = "QueryResult")]
#[derive(Clone)]
pub struct PyQueryResult {
    #[pyo3(get)]
    pub results: Vec<PyCandidate>,
    #[pyo3(get)]
    pub margin: f64,
    /// "HIGH", "MED" or "LOW"
    #[pyo3(get)]
    pub level: String,
    #[pyo3(get)]
    pub label: String,
    #[pyo3(get)]
    pub token_budget: Option<usize>,
}

#[pymethods]
impl PyQueryResult {
    fn __repr__(&self) -> String {
        format!(
            "QueryResult(results={}, margin={:.2}, level={})",
            self.results.len(),
            self.margin,
            self.level
        )
    }

    fn __len__(&self) -> usize {
        self.results.len()
    }
}

impl From<QueryResult> for PyQueryResult {
    fn from(r: QueryResult) -> Self {
        Self {
            results: r.results.into_iter().map(PyCandidate::from).collect(),
            margin: r.margin,
            level: r.confidence.level.as_str().to_string(),
            label: r.confidence.label,
            token_budget: r.confidence.token_budget,
        }
    }
}

/// Summary of a built corpus
#[pyclass(name = "CorpusStats")]
#[derive(Clone)]
pub struct PyCorpusStats {
    #[pyo3(get)]
    pub passages: usize,
    #[pyo3(get)]
    pub vocabulary_size: usize,
    #[pyo3(get)]
    pub anchor_k: usize,
    #[pyo3(get)]
    pub confuser_k: usize,
    #[pyo3(get)]
    pub neighbor_radius: usize,
    #[pyo3(get)]
    pub clustered: bool,
}

impl From<CorpusStats> for PyCorpusStats {
    fn from(s: CorpusStats) -> Self {
        Self {
            passages: s.passages,
            vocabulary_size: s.vocabulary_size,
            anchor_k: s.anchor_k,
            confuser_k: s.confuser_k,
            neighbor_radius: s.neighbor_radius,
            clustered: s.clustered,
        }
    }
}

/// Get the built-in stop-word list
#[pyfunction]
pub fn get_stopwords() -> PyResult<Vec<String>> {
    Ok(StopwordFilter::built_in_list())
}

/// A built passage corpus
#[pyclass(name = "Corpus")]
pub struct PyCorpus {
    inner: Corpus,
}

fn out_of_range(index: usize, len: usize) -> PyErr {
    PyIndexError::new_err(format!("passage {index} out of range for {len} passages"))
}

#[pymethods]
impl PyCorpus {
    #[new]
    #[pyo3(signature = (
        passages,
        labels=None,
        cluster_map=None,
        anchor_k=5,
        confuser_k=5,
        neighbor_radius=2
    ))]
    fn new(
        py: Python<'_>,
        passages: Vec<String>,
        labels: Option<Vec<String>>,
        cluster_map: Option<HashMap<usize, String>>,
        anchor_k: usize,
        confuser_k: usize,
        neighbor_radius: usize,
    ) -> PyResult<Self> {
        let config = BuildConfig::default()
            .with_anchor_k(anchor_k)
            .with_confuser_k(confuser_k)
            .with_neighbor_radius(neighbor_radius);
        let options = BuildOptions {
            labels,
            cluster_map: cluster_map.map(|m| m.into_iter().collect::<FxHashMap<_, _>>()),
            config,
        };

        // Construction is quadratic in the passage count; let other Python
        // threads run meanwhile.
        let inner = py.allow_threads(|| Corpus::build(&passages, options))?;
        Ok(Self { inner })
    }

    #[pyo3(signature = (text, top_n=5, anchor_weight=15.0, neighbor_weight=10.0))]
    fn query(
        &self,
        text: &str,
        top_n: usize,
        anchor_weight: f64,
        neighbor_weight: f64,
    ) -> PyResult<PyQueryResult> {
        let config = QueryConfig::default()
            .with_top_n(top_n)
            .with_anchor_weight(anchor_weight)
            .with_neighbor_weight(neighbor_weight);
        Ok(self.inner.query(text, &config)?.into())
    }

    fn anchors(&self, index: usize) -> PyResult<Vec<(String, f64)>> {
        self.inner
            .anchors(index)
            .map(|anchors| {
                anchors
                    .iter()
                    .map(|a| (a.term.clone(), a.score))
                    .collect()
            })
            .ok_or_else(|| out_of_range(index, self.inner.len()))
    }

    fn confusers(&self, index: usize) -> PyResult<Vec<usize>> {
        self.inner
            .confusers(index)
            .map(|c| c.to_vec())
            .ok_or_else(|| out_of_range(index, self.inner.len()))
    }

    fn neighbors(&self, index: usize) -> PyResult<Vec<usize>> {
        self.inner
            .neighbors(index)
            .map(|n| n.to_vec())
            .ok_or_else(|| out_of_range(index, self.inner.len()))
    }

    fn label(&self, index: usize) -> PyResult<String> {
        self.inner
            .label(index)
            .map(str::to_string)
            .ok_or_else(|| out_of_range(index, self.inner.len()))
    }

    fn text(&self, index: usize) -> PyResult<String> {
        self.inner
            .text(index)
            .map(str::to_string)
            .ok_or_else(|| out_of_range(index, self.inner.len()))
    }

    fn stats(&self) -> PyCorpusStats {
        self.inner.stats().into()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        let stats = self.inner.stats();
        format!(
            "Corpus(passages={}, vocabulary_size={})",
            stats.passages, stats.vocabulary_size
        )
    }
}
