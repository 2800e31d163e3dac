//! Light suffix-trimming stemmer
//!
//! A rule-based approximation of a stemmer. It strips at most one suffix from a
//! fixed priority list and refuses any strip that would leave fewer than
//! [`MIN_STEM_LEN`] characters. Words that the rules would mangle are listed in
//! [`STEM_EXCEPTIONS`] and pass through untouched.

use rustc_hash::FxHashSet;

/// Shortest stem a suffix strip may leave behind.
pub const MIN_STEM_LEN: usize = 4;

/// Suffixes in priority order; the first one that matches with a long enough
/// remainder wins.
pub const SUFFIXES: &[&str] = &[
    "ization", "ations", "ation", "tions", "tion", "ments", "ment", "ness", "ings", "ing", "ies",
    "ed", "ly", "es", "s",
];

/// Words returned unchanged by [`LightStemmer::stem`].
pub const STEM_EXCEPTIONS: &[&str] = &[
    // -s / -es that are not plurals
    "this", "thus", "always", "news", "series", "species", "analysis", "basis", "thesis",
    "hypothesis", "synopsis", "status", "process", "address", "access", "success", "business",
    "class", "glass", "grass", "across", "unless", "princess", "progress", "congress",
    "express", "physics", "mathematics", "economics", "politics", "statistics", "ethics",
    "lens", "bias", "atlas", "canvas", "chaos", "campus", "virus", "bonus", "census", "focus",
    "corpus", "genus", "nexus", "radius", "surplus", "apparatus", "consensus", "various",
    "previous", "serious", "famous", "numerous", "obvious", "perhaps", "whereas", "towards",
    "ourselves", "themselves", "yourselves", "theirs", "yours",
    // -ing that is part of the root
    "during", "nothing", "something", "anything", "everything", "morning", "evening",
    "ceiling", "string", "thing", "bring", "spring", "sibling", "wedding", "pudding",
    // -ed that is part of the root
    "need", "seed", "feed", "speed", "breed", "embed", "indeed", "exceed", "proceed",
    "succeed", "hundred", "sacred", "kindred", "naked", "wicked", "hatred",
    // -ly that is part of the root
    "family", "early", "daily", "reply", "supply", "apply", "italy", "holy", "rally",
    "assembly", "anomaly", "monopoly",
];

/// Suffix stemmer over the fixed exception and suffix tables
#[derive(Debug, Clone)]
pub struct LightStemmer {
    exceptions: FxHashSet<&'static str>,
}

impl Default for LightStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl LightStemmer {
    pub fn new() -> Self {
        Self {
            exceptions: STEM_EXCEPTIONS.iter().copied().collect(),
        }
    }

    /// Stem a lowercased token.
    ///
    /// Tokens are ASCII by construction (see [`Tokenizer`](super::tokenizer::Tokenizer)),
    /// so byte length equals character length here.
    pub fn stem(&self, token: &str) -> String {
        if self.exceptions.contains(token) {
            return token.to_string();
        }

        for suffix in SUFFIXES {
            if let Some(stem) = token.strip_suffix(suffix) {
                if stem.len() >= MIN_STEM_LEN {
                    return stem.to_string();
                }
            }
        }

        token.to_string()
    }
}
