//! Scan configuration

use crate::error::{Result, ScanError};
use phrasematch_core::{DistanceEngine, Tokenizer, Weights, WordPairing};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// How scored candidates become a result.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanMode {
    /// Every candidate, best score first; ties keep input order
    #[default]
    RankAll,
    /// Only candidates scoring `<= max_score`, best first
    Threshold { max_score: f64 },
    /// Every candidate annotated with its score, in input order
    InputOrder,
}

impl ScanMode {
    /// Whether a candidate with this score belongs in the result
    #[inline]
    pub fn accepts(&self, score: f64) -> bool {
        match self {
            Self::Threshold { max_score } => score <= *max_score,
            Self::RankAll | Self::InputOrder => true,
        }
    }

    /// Whether the result is sorted by score
    #[inline]
    pub fn is_ranked(&self) -> bool {
        !matches!(self, Self::InputOrder)
    }
}

/// Configuration shared by every scan a host issues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Phrase / word / length weights
    pub weights: Weights,
    /// Token pairing policy for word distance
    pub pairing: WordPairing,
    /// Filtering and ordering of the result
    pub mode: ScanMode,
    /// Lowercase query and candidate text before scoring
    pub case_insensitive: bool,
    /// Truncate the result after ordering
    pub max_results: Option<usize>,
    /// Wall-clock budget; exceeding it cancels the scan
    pub timeout_ms: Option<u64>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            pairing: WordPairing::default(),
            mode: ScanMode::default(),
            case_insensitive: true,
            max_results: None,
            timeout_ms: None,
        }
    }
}

impl ScanConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants serde cannot express
    pub fn validate(&self) -> Result<()> {
        if let ScanMode::Threshold { max_score } = self.mode {
            if !max_score.is_finite() || max_score < 0.0 {
                return Err(ScanError::Config(format!(
                    "threshold max_score must be finite and non-negative, got {max_score}"
                )));
            }
        }
        if self.max_results == Some(0) {
            return Err(ScanError::Config(
                "max_results must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Distance engine with the default Unicode word tokenizer
    pub fn engine(&self) -> DistanceEngine {
        DistanceEngine::new(self.weights).with_pairing(self.pairing)
    }

    /// Distance engine with an injected tokenizer
    pub fn engine_with_tokenizer(&self, tokenizer: Arc<dyn Tokenizer>) -> DistanceEngine {
        self.engine().with_shared_tokenizer(tokenizer)
    }
}
