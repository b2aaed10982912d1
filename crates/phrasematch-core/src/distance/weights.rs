//! Score weights

use crate::error::{DistanceError, Result};
use serde::{Deserialize, Serialize};

/// Default weight of the whole-phrase distance
pub const DEFAULT_PHRASE_WEIGHT: f64 = 1.0;
/// Default weight of the accumulated word distance
pub const DEFAULT_WORD_WEIGHT: f64 = 0.5;
/// Default weight of the absolute length difference
pub const DEFAULT_LENGTH_WEIGHT: f64 = 0.25;

/// Weights applied to the three distance signals.
///
/// Always finite and non-negative; construction and deserialization reject
/// anything else. The defaults keep `phrase >= 2 * word` so that a near
/// whole-phrase match outranks a collection of matching words.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWeights")]
pub struct Weights {
    phrase: f64,
    word: f64,
    length: f64,
}

impl Weights {
    /// Create validated weights
    pub fn new(phrase: f64, word: f64, length: f64) -> Result<Self> {
        Ok(Self {
            phrase: check("phrase", phrase)?,
            word: check("word", word)?,
            length: check("length", length)?,
        })
    }

    pub fn phrase(&self) -> f64 {
        self.phrase
    }

    pub fn word(&self) -> f64 {
        self.word
    }

    pub fn length(&self) -> f64 {
        self.length
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            phrase: DEFAULT_PHRASE_WEIGHT,
            word: DEFAULT_WORD_WEIGHT,
            length: DEFAULT_LENGTH_WEIGHT,
        }
    }
}

fn check(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DistanceError::InvalidWeight { name, value })
    }
}

/// Unvalidated wire form; missing fields fall back to the defaults
#[derive(Deserialize)]
#[serde(default)]
struct RawWeights {
    phrase: f64,
    word: f64,
    length: f64,
}

impl Default for RawWeights {
    fn default() -> Self {
        let w = Weights::default();
        Self {
            phrase: w.phrase,
            word: w.word,
            length: w.length,
        }
    }
}

impl TryFrom<RawWeights> for Weights {
    type Error = DistanceError;

    fn try_from(raw: RawWeights) -> Result<Self> {
        Weights::new(raw.phrase, raw.word, raw.length)
    }
}

/// Combine the three signals into one score.
///
/// `length_delta` may be negative; its absolute value is used.
#[inline]
pub fn weighted_value(phrase: usize, word: usize, length_delta: isize, weights: &Weights) -> f64 {
    phrase as f64 * weights.phrase
        + word as f64 * weights.word
        + length_delta.unsigned_abs() as f64 * weights.length
}
