//! Scan inputs and outputs

use std::sync::Arc;
use std::time::Duration;

/// One entry of the list being filtered.
///
/// `item` is the caller's handle back to the original object (an id, an
/// `Arc`, ...) and is cloned into the result for each match.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<T> {
    pub text: Option<String>,
    pub item: T,
}

impl<T> Candidate<T> {
    pub fn new(text: impl Into<String>, item: T) -> Self {
        Self {
            text: Some(text.into()),
            item,
        }
    }

    /// Entry whose label is missing; scans skip it
    pub fn without_text(item: T) -> Self {
        Self { text: None, item }
    }
}

/// Query plus the candidates it is matched against.
///
/// Immutable once built. The candidate slice is shared, so several scans
/// (e.g. successive keystrokes) can reference one list without copying it.
#[derive(Debug, Clone)]
pub struct ScanRequest<T> {
    query: String,
    candidates: Arc<[Candidate<T>]>,
}

impl<T> ScanRequest<T> {
    pub fn new(query: impl Into<String>, candidates: impl Into<Arc<[Candidate<T>]>>) -> Self {
        Self {
            query: query.into(),
            candidates: candidates.into(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn candidates(&self) -> &[Candidate<T>] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// A candidate that made it into the result
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate<T> {
    /// Position in the original candidate list
    pub index: usize,
    /// Original (un-normalized) text
    pub text: String,
    pub item: T,
    /// Weighted distance to the query; lower is closer
    pub score: f64,
}

/// Outcome of a scan that ran to completion.
#[derive(Debug, Clone)]
pub struct ScanResult<T> {
    pub query: String,
    /// Ordered per the scan mode
    pub matches: Vec<ScoredCandidate<T>>,
    /// Indices of malformed candidates that were skipped
    pub skipped: Vec<usize>,
    /// Candidates examined, including skipped ones
    pub scanned: usize,
    pub elapsed: Duration,
}

impl<T> ScanResult<T> {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Matched items in result order
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.matches.iter().map(|m| &m.item)
    }

    /// Matched texts in result order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.matches.iter().map(|m| m.text.as_str())
    }
}
