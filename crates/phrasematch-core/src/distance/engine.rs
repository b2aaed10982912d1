//! DistanceEngine - configured weighted distance

use super::edit::{phrase_distance, text_len};
use super::weights::{weighted_value, Weights};
use super::words::WordPairing;
use crate::error::{DistanceError, Result};
use crate::tokenize::{Tokenizer, UnicodeWordTokenizer};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Every component of a weighted distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Distance {
    pub phrase: usize,
    pub word: usize,
    /// `text_len(a) - text_len(b)`, signed
    pub length_delta: isize,
    pub score: f64,
}

/// Weighted distance with an injected tokenizer.
///
/// Stateless between calls and cheap to clone; the tokenizer is shared.
#[derive(Clone)]
pub struct DistanceEngine {
    tokenizer: Arc<dyn Tokenizer>,
    weights: Weights,
    pairing: WordPairing,
}

impl Default for DistanceEngine {
    fn default() -> Self {
        Self::new(Weights::default())
    }
}

impl fmt::Debug for DistanceEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistanceEngine")
            .field("weights", &self.weights)
            .field("pairing", &self.pairing)
            .finish_non_exhaustive()
    }
}

impl DistanceEngine {
    /// Engine with the given weights, Unicode word tokens and best-match pairing
    pub fn new(weights: Weights) -> Self {
        Self {
            tokenizer: Arc::new(UnicodeWordTokenizer),
            weights,
            pairing: WordPairing::default(),
        }
    }

    pub fn with_tokenizer<T: Tokenizer + 'static>(self, tokenizer: T) -> Self {
        self.with_shared_tokenizer(Arc::new(tokenizer))
    }

    pub fn with_shared_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_pairing(mut self, pairing: WordPairing) -> Self {
        self.pairing = pairing;
        self
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn pairing(&self) -> WordPairing {
        self.pairing
    }

    pub fn phrase_distance(&self, a: &str, b: &str) -> usize {
        phrase_distance(a, b)
    }

    pub fn word_distance(&self, a: &str, b: &str) -> usize {
        let a = self.tokenizer.tokenize(a);
        let b = self.tokenizer.tokenize(b);
        self.pairing.accumulate(&a, &b)
    }

    /// Compute phrase, word and length signals plus the combined score
    pub fn breakdown(&self, a: &str, b: &str) -> Distance {
        combine(a, b, self.word_distance(a, b), &self.weights)
    }

    /// Combined score; lower is more similar, 0.0 for identical texts
    #[inline]
    pub fn weighted_distance(&self, a: &str, b: &str) -> f64 {
        self.breakdown(a, b).score
    }

    /// Like [`weighted_distance`](Self::weighted_distance) for inputs that may
    /// be absent. Absent is a caller bug, not an empty string.
    pub fn try_weighted_distance(&self, a: Option<&str>, b: Option<&str>) -> Result<f64> {
        let a = a.ok_or(DistanceError::InvalidArgument("first text is absent"))?;
        let b = b.ok_or(DistanceError::InvalidArgument("second text is absent"))?;
        Ok(self.weighted_distance(a, b))
    }
}

/// Weighted distance with Unicode word tokens and best-match pairing.
pub fn weighted_distance(string_a: &str, string_b: &str, weights: &Weights) -> f64 {
    let word = super::words::word_distance(string_a, string_b);
    combine(string_a, string_b, word, weights).score
}

/// Phrase and length signals plus an already computed word distance
fn combine(a: &str, b: &str, word: usize, weights: &Weights) -> Distance {
    let phrase = phrase_distance(a, b);
    let length_delta = text_len(a) as isize - text_len(b) as isize;
    Distance {
        phrase,
        word,
        length_delta,
        score: weighted_value(phrase, word, length_delta, weights),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::WhitespaceTokenizer;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identical_scores_zero() {
        let engine = DistanceEngine::default();
        assert_eq!(
            engine.breakdown("bench press", "bench press"),
            Distance {
                phrase: 0,
                word: 0,
                length_delta: 0,
                score: 0.0
            }
        );
        assert_eq!(
            weighted_distance("bench press", "bench press", &Weights::default()),
            0.0
        );
    }

    #[test]
    fn test_breakdown_components() {
        let engine = DistanceEngine::default();
        let d = engine.breakdown("squat", "back squat");
        assert_eq!(d.phrase, 5);
        assert_eq!(d.word, 4);
        assert_eq!(d.length_delta, -5);
        assert_eq!(d.score, 8.25);
    }

    #[test]
    fn test_free_function_matches_default_engine() {
        let engine = DistanceEngine::default();
        for (a, b) in [("squat", "deadlift"), ("front squat", "back squat"), ("", "row")] {
            assert_eq!(
                engine.weighted_distance(a, b),
                weighted_distance(a, b, &Weights::default())
            );
        }
    }

    #[test]
    fn test_free_function_matches_engine_with_custom_weights() {
        let weights = Weights::new(2.0, 0.0, 1.0).unwrap();
        let engine = DistanceEngine::new(weights);
        for (a, b) in [("squat", "back squat"), ("bench press", "deadlift"), ("row", "")] {
            assert_eq!(
                engine.weighted_distance(a, b),
                weighted_distance(a, b, &weights)
            );
        }
        // phrase 5 * 2.0 + length 5 * 1.0
        assert_eq!(weighted_distance("squat", "back squat", &weights), 15.0);
    }

    #[test]
    fn test_squat_variants_outrank_others() {
        let engine = DistanceEngine::default();
        let back = engine.weighted_distance("squat", "back squat");
        let front = engine.weighted_distance("squat", "front squat");
        let bench = engine.weighted_distance("squat", "bench press");
        let deadlift = engine.weighted_distance("squat", "deadlift");
        assert!(back < deadlift && back < bench);
        assert!(front < deadlift && front < bench);
    }

    #[test]
    fn test_phrase_weight_dominates() {
        // Same words, different order: word distance is 0 but phrase is not
        let engine = DistanceEngine::default();
        let exact = engine.weighted_distance("bench press", "bench press");
        let reordered = engine.weighted_distance("bench press", "press bench");
        assert!(exact < reordered);
    }

    #[test]
    fn test_injected_tokenizer() {
        let unicode = DistanceEngine::default();
        let whitespace = DistanceEngine::default().with_tokenizer(WhitespaceTokenizer);
        // "bench-press" is one whitespace token but two Unicode words
        assert_eq!(unicode.word_distance("bench-press", "bench press"), 0);
        assert!(whitespace.word_distance("bench-press", "bench press") > 0);
    }

    #[test]
    fn test_positional_pairing() {
        let engine = DistanceEngine::default().with_pairing(WordPairing::Positional);
        assert_eq!(engine.word_distance("squat", "back squat"), 10);
    }

    #[test]
    fn test_absent_input_is_invalid_argument() {
        let engine = DistanceEngine::default();
        assert!(matches!(
            engine.try_weighted_distance(None, Some("row")),
            Err(DistanceError::InvalidArgument(_))
        ));
        assert!(matches!(
            engine.try_weighted_distance(Some("row"), None),
            Err(DistanceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_empty_input_is_legal() {
        let engine = DistanceEngine::default();
        // phrase 3, word 3, length 3
        assert_eq!(engine.try_weighted_distance(Some(""), Some("row")), Ok(5.25));
    }
}
