//! Weighted Distance Engine
//!
//! Two granularities of Levenshtein distance combined into one score:
//!
//! 1. Phrase distance: texts compared whole, spaces and punctuation included
//! 2. Word distance: texts tokenized, tokens paired, distances accumulated
//! 3. Length delta: grapheme-count difference, taken as absolute value
//!
//! `score = phrase * Wp + word * Ww + |length_delta| * Wl`
//!
//! # Example
//!
//! ```rust
//! use phrasematch_core::distance::{DistanceEngine, WordPairing};
//! use phrasematch_core::WhitespaceTokenizer;
//!
//! let engine = DistanceEngine::default()
//!     .with_tokenizer(WhitespaceTokenizer)
//!     .with_pairing(WordPairing::Positional);
//!
//! let d = engine.breakdown("bench press", "bench press");
//! assert_eq!(d.score, 0.0);
//! ```

mod edit;
mod engine;
mod weights;
mod words;

pub use edit::{edit_distance, levenshtein, phrase_distance, text_len};
pub use engine::{weighted_distance, Distance, DistanceEngine};
pub use weights::{
    weighted_value, Weights, DEFAULT_LENGTH_WEIGHT, DEFAULT_PHRASE_WEIGHT, DEFAULT_WORD_WEIGHT,
};
pub use words::{word_distance, WordPairing};
