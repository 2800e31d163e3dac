//! Python bindings via PyO3
//!
//! This module provides the Python interface for spectral_anchorage.

pub mod json;
pub mod native;

use crate::errors::AnchorageError;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

impl From<AnchorageError> for PyErr {
    fn from(err: AnchorageError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Register all Python classes and functions
pub fn register_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Version
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    // Native interface classes
    m.add_class::<native::PyCorpus>()?;
    m.add_class::<native::PyCandidate>()?;
    m.add_class::<native::PyQueryResult>()?;
    m.add_class::<native::PyCorpusStats>()?;
    m.add_function(wrap_pyfunction!(native::get_stopwords, m)?)?;

    // JSON interface functions
    m.add_function(wrap_pyfunction!(json::query_from_json, m)?)?;

    Ok(())
}
