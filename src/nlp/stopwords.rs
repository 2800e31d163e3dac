//! Built-in English stop-word table
//!
//! The list is fixed: stop words are filtered after stemming, so every entry
//! must be a fixed point of [`LightStemmer`](super::stemmer::LightStemmer).

use rustc_hash::FxHashSet;

/// English function words removed from content stems.
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "can't", "cannot", "could", "couldn't", "did", "didn't", "do",
    "does", "doesn't", "doing", "don't", "down", "during", "each", "either", "else", "etc",
    "ever", "every", "few", "for", "from", "further", "get", "got", "had", "hadn't", "has",
    "hasn't", "have", "haven't", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "however", "i", "if", "in", "into", "is", "isn't", "it", "it's",
    "its", "itself", "just", "let", "may", "me", "might", "more", "most", "much", "must", "my",
    "myself", "neither", "no", "nor", "not", "now", "of", "off", "on", "once", "one", "only",
    "or", "other", "our", "ours", "ourselves", "out", "over", "own", "per", "same", "shall",
    "she", "should", "shouldn't", "so", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those",
    "through", "thus", "to", "too", "under", "until", "up", "upon", "us", "very", "via", "was",
    "wasn't", "we", "were", "weren't", "what", "when", "where", "whether", "which", "while",
    "who", "whom", "whose", "why", "will", "with", "within", "without", "won't", "would",
    "wouldn't", "yet", "you", "your", "yours", "yourself", "yourselves",
];

/// Set-backed stop-word lookup
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    words: FxHashSet<&'static str>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwordFilter {
    /// Create a filter over the built-in list
    pub fn new() -> Self {
        Self {
            words: STOP_WORDS.iter().copied().collect(),
        }
    }

    /// Check whether a (lowercased) token is a stop word
    pub fn is_stopword(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// The built-in list as owned strings, in table order
    pub fn built_in_list() -> Vec<String> {
        STOP_WORDS.iter().map(|s| s.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::stemmer::LightStemmer;

    #[test]
    fn test_common_stopwords() {
        let filter = StopwordFilter::new();
        assert!(filter.is_stopword("the"));
        assert!(filter.is_stopword("because"));
        assert!(filter.is_stopword("doesn't"));
        assert!(!filter.is_stopword("passage"));
        assert!(!filter.is_stopword("The")); // lookups expect lowercased input
    }

    #[test]
    fn test_no_duplicate_entries() {
        assert_eq!(StopwordFilter::new().len(), STOP_WORDS.len());
    }

    #[test]
    fn test_stopwords_survive_stemming() {
        let stemmer = LightStemmer::new();
        for word in STOP_WORDS {
            assert_eq!(stemmer.stem(word), *word, "stop word {word:?} is altered by stemming");
        }
    }
}
