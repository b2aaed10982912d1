//! phrasematch Core Engine
//!
//! Weighted edit-distance scoring for fuzzy ranking of short texts such as
//! exercise names. A score combines three signals:
//!
//! - **phrase distance**: Levenshtein distance of the texts taken whole
//! - **word distance**: per-token distances accumulated over both token sequences
//! - **length delta**: difference in grapheme count
//!
//! Lower scores are more similar; identical texts score `0.0`. The default
//! weights make whole-phrase similarity dominate word similarity.
//!
//! All operations are pure and synchronous. Edit units are extended grapheme
//! clusters, so accented and multi-byte characters count as one unit.
//!
//! # Example
//!
//! ```rust
//! use phrasematch_core::{edit_distance, weighted_distance, Weights};
//!
//! assert_eq!(edit_distance("kitten", "sitting"), 3);
//!
//! let weights = Weights::default();
//! let near = weighted_distance("squat", "back squat", &weights);
//! let far = weighted_distance("squat", "deadlift", &weights);
//! assert!(near < far);
//! ```

pub mod distance;
pub mod error;
pub mod tokenize;

// Re-export main types at crate root
pub use distance::{
    edit_distance, levenshtein, phrase_distance, text_len, weighted_distance, weighted_value,
    word_distance, Distance, DistanceEngine, Weights, WordPairing,
};
pub use error::{DistanceError, Result};
pub use tokenize::{Tokenizer, UnicodeWordTokenizer, WhitespaceTokenizer};
