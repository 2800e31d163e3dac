//! Lexical normalization
//!
//! Turns raw passage or query text into the ordered sequence of content stems
//! used for every lexical comparison in the engine. Normalization is pure and
//! deterministic; duplicates are kept because term frequency matters to the
//! term-weight model.

use super::stemmer::LightStemmer;
use super::stopwords::StopwordFilter;
use rustc_hash::FxHashSet;

/// Raw tokens of this length or shorter are dropped.
const MAX_DROPPED_TOKEN_LEN: usize = 1;

/// Content stems of this length or shorter are dropped.
const MAX_DROPPED_STEM_LEN: usize = 2;

/// Rule-based tokenizer producing stemmed tokens and content stems
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    stemmer: LightStemmer,
    stopwords: StopwordFilter,
}

impl Tokenizer {
    /// Create a tokenizer over the built-in stemming and stop-word tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Split text into stemmed tokens.
    ///
    /// Text is lowercased and split into maximal runs of `[a-z0-9'-]`; every
    /// other character (underscores included) separates tokens. Leading and
    /// trailing apostrophes and hyphens are trimmed, single-character tokens
    /// are dropped, and the rest are stemmed.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let mut tokens = Vec::new();
        let mut current = String::new();

        for c in lower.chars() {
            if is_token_char(c) {
                current.push(c);
            } else if !current.is_empty() {
                self.push_token(&current, &mut tokens);
                current.clear();
            }
        }
        if !current.is_empty() {
            self.push_token(&current, &mut tokens);
        }

        tokens
    }

    /// Stemmed tokens with stop words and very short stems removed.
    ///
    /// The stop-word check applies to the stem, so an inflected form whose
    /// stem is a stop word is dropped too ("others" stems to "other").
    pub fn content_stems(&self, text: &str) -> Vec<String> {
        self.tokenize(text)
            .into_iter()
            .filter(|stem| stem.len() > MAX_DROPPED_STEM_LEN && !self.stopwords.is_stopword(stem))
            .collect()
    }

    fn push_token(&self, candidate: &str, tokens: &mut Vec<String>) {
        let trimmed = candidate.trim_matches(|c| c == '\'' || c == '-');
        if trimmed.len() > MAX_DROPPED_TOKEN_LEN {
            tokens.push(self.stemmer.stem(trimmed));
        }
    }
}

/// Distinct stems in first-occurrence order.
pub fn unique_in_order(stems: &[String]) -> Vec<String> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    stems
        .iter()
        .filter(|s| seen.insert(s.as_str()))
        .cloned()
        .collect()
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '\'' || c == '-'
}
