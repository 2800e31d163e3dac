//! # spectral_anchorage
//!
//! Offline passage retrieval for small corpora (hundreds to a few thousand
//! passages) with a confidence signal for the top result.
//!
//! Ranking is a plain overlap-IDF score (the SPECTRA shortlist). On top of it,
//! two build-time structures estimate how much the top result can be trusted:
//!
//! - **Anchor terms**: stems that separate a passage from its *confusers*, the
//!   passages most similar to it by TF-IDF cosine.
//! - **Neighborhoods**: positionally adjacent passages, optionally restricted
//!   to the same cluster, whose agreement with the query corroborates a
//!   candidate.
//!
//! Both only adjust the reported margin and confidence level; neither ever
//! changes which passages are returned or their order.
//!
//! ```
//! use spectral_anchorage::{Corpus, QueryConfig, ConfidenceLevel};
//!
//! let corpus = Corpus::from_passages(&[
//!     "The cat sat on the mat",
//!     "A dog ran in the park",
//!     "Cats are independent animals",
//! ])?;
//! let result = corpus.query("cat", &QueryConfig::default())?;
//! assert_eq!(result.top().map(|c| c.index), Some(0));
//! assert!(result.margin >= 0.1 && result.margin <= 100.0);
//! # Ok::<(), spectral_anchorage::AnchorageError>(())
//! ```

/// Enter a tracing span for a build stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("build_stage", stage = $name).entered();
    };
}

pub mod anchors;
pub mod corpus;
pub mod errors;
pub mod neighbors;
pub mod nlp;
pub mod query;
pub mod types;
pub mod weights;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use corpus::{build_corpus, BuildOptions, Corpus, CorpusStats};
pub use errors::{AnchorageError, Result};
pub use query::{query, Candidate, QueryResult};
pub use types::{AnchorTerm, BuildConfig, Confidence, ConfidenceLevel, QueryConfig};

pub use nlp::{stemmer::LightStemmer, stopwords::StopwordFilter, tokenizer::Tokenizer};
pub use weights::{SparseVector, TermWeights};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Initialize the Python module
#[cfg(feature = "python")]
#[pymodule]
fn _rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python::register_module(m)?;
    Ok(())
}
