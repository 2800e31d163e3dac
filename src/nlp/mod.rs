//! Lexical normalization: tokenization, light stemming, and stop words

pub mod stemmer;
pub mod stopwords;
pub mod tokenizer;
