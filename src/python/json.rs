//! JSON interface for batch processing
//!
//! Builds a corpus and answers a batch of queries in one call, minimizing
//! Python↔Rust overhead for callers that already hold their passages as JSON.

use crate::corpus::{BuildOptions, Corpus};
use crate::errors::Result;
use crate::query::QueryResult;
use crate::types::{BuildConfig, QueryConfig};
use pyo3::prelude::*;
use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Input request from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRequest {
    pub passages: Vec<String>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    /// Object keyed by passage index (`{"0": "intro", "3": "intro"}`)
    #[serde(default)]
    pub cluster_map: Option<FxHashMap<usize, String>>,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub queries: Vec<String>,
}

/// Parse a request, build its corpus, and serialize every query result.
pub fn run_request(json_input: &str) -> Result<String> {
    let request: JsonRequest = serde_json::from_str(json_input)?;

    let options = BuildOptions {
        labels: request.labels,
        cluster_map: request.cluster_map,
        config: request.build,
    };
    let corpus = Corpus::build(&request.passages, options)?;
    let results: Vec<QueryResult> = corpus.query_batch(&request.queries, &request.query)?;

    Ok(serde_json::to_string(&results)?)
}

/// Build a corpus and run queries from a JSON request
///
/// Args:
///     json_input: JSON object with `passages`, optional `labels`,
///         `cluster_map`, `build` and `query` configs, and `queries`
///
/// Returns:
///     JSON array with one result per query
#[pyfunction]
#[pyo3(signature = (json_input))]
pub fn query_from_json(py: Python<'_>, json_input: &str) -> PyResult<String> {
    Ok(py.allow_threads(|| run_request(json_input))?)
}
