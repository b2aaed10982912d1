//! Token-level distance accumulation

use super::edit::{edit_distance, text_len};
use crate::tokenize::{Tokenizer, UnicodeWordTokenizer};
use serde::{Deserialize, Serialize};

/// How tokens of two texts are paired before their distances are summed.
///
/// Both policies are deterministic and symmetric, return 0 for identical
/// token sequences, and charge unpaired tokens their full grapheme length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordPairing {
    /// Each token of the side with fewer tokens claims the closest unclaimed
    /// token of the other side (lowest index on ties). With equal counts both
    /// orientations are tried and the smaller total wins.
    #[default]
    BestMatch,
    /// Tokens paired by index up to the shorter sequence. Appending words to
    /// the side that already has at least as many tokens never lowers the
    /// distance.
    Positional,
}

impl WordPairing {
    /// Accumulate the distance between two token sequences
    pub fn accumulate(self, a: &[&str], b: &[&str]) -> usize {
        match self {
            Self::Positional => positional(a, b),
            Self::BestMatch => match a.len().cmp(&b.len()) {
                std::cmp::Ordering::Less => best_match(a, b),
                std::cmp::Ordering::Greater => best_match(b, a),
                std::cmp::Ordering::Equal => best_match(a, b).min(best_match(b, a)),
            },
        }
    }
}

fn positional(a: &[&str], b: &[&str]) -> usize {
    let shared = a.len().min(b.len());
    let paired: usize = a.iter().zip(b).map(|(x, y)| edit_distance(x, y)).sum();
    let leftover: usize = a[shared..]
        .iter()
        .chain(&b[shared..])
        .map(|t| text_len(t))
        .sum();
    paired + leftover
}

/// Greedy assignment; `short.len() <= long.len()` so every short token pairs.
fn best_match(short: &[&str], long: &[&str]) -> usize {
    let mut claimed = vec![false; long.len()];
    let mut total = 0;

    for token in short {
        let mut best: Option<(usize, usize)> = None;
        for (idx, other) in long.iter().enumerate() {
            if claimed[idx] {
                continue;
            }
            let dist = edit_distance(token, other);
            if best.map_or(true, |(_, best_dist)| dist < best_dist) {
                best = Some((idx, dist));
                if dist == 0 {
                    break;
                }
            }
        }
        if let Some((idx, dist)) = best {
            claimed[idx] = true;
            total += dist;
        }
    }

    let unclaimed: usize = long
        .iter()
        .zip(&claimed)
        .filter(|&(_, &is_claimed)| !is_claimed)
        .map(|(t, _)| text_len(t))
        .sum();

    total + unclaimed
}

/// Word distance with Unicode word-boundary tokens and best-match pairing.
pub fn word_distance(text_a: &str, text_b: &str) -> usize {
    let a = UnicodeWordTokenizer.tokenize(text_a);
    let b = UnicodeWordTokenizer.tokenize(text_b);
    WordPairing::default().accumulate(&a, &b)
}
