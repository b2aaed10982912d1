//! Word tokenizers
//!
//! Word distance is computed over tokens produced by a [`Tokenizer`]. The
//! default follows Unicode word boundaries (UAX #29), which stands in for a
//! platform locale word-breaking service. Tokens borrow from the input and
//! keep source order; duplicates are preserved.

use unicode_segmentation::UnicodeSegmentation;

/// Splits text into an ordered sequence of word tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Unicode word-boundary tokenizer (UAX #29).
///
/// Punctuation and whitespace runs are dropped, so `"Bench-Press (Wide)"`
/// yields `["Bench", "Press", "Wide"]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWordTokenizer;

impl Tokenizer for UnicodeWordTokenizer {
    #[inline]
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.unicode_words().collect()
    }
}

/// Splits on Unicode whitespace only; punctuation stays attached to words.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    #[inline]
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_whitespace().collect()
    }
}
