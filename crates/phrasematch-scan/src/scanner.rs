//! Scanner - issues scans over one candidate list, superseding stale ones

use crate::candidate::{Candidate, ScanRequest};
use crate::config::ScanConfig;
use crate::error::Result;
use crate::listener::ScanListener;
use crate::operation::{ScanOperation, ScanStatus};
use parking_lot::Mutex;
use phrasematch_core::{Tokenizer, UnicodeWordTokenizer};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

/// A scan that has been scheduled
#[derive(Debug)]
pub struct RunningScan<T> {
    pub operation: Arc<ScanOperation<T>>,
    pub handle: JoinHandle<ScanStatus>,
}

/// Search-as-you-type front end.
///
/// Holds the candidate list once and starts a fresh [`ScanOperation`] per
/// query. Starting a new search cancels the previous one if it is still
/// running, so only the latest query produces a result.
pub struct Scanner<T> {
    candidates: Arc<[Candidate<T>]>,
    config: ScanConfig,
    tokenizer: Arc<dyn Tokenizer>,
    current: Mutex<Option<Arc<ScanOperation<T>>>>,
}

impl<T: Clone + Send + Sync + 'static> Scanner<T> {
    pub fn new(candidates: impl Into<Arc<[Candidate<T>]>>, config: ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            candidates: candidates.into(),
            config,
            tokenizer: Arc::new(UnicodeWordTokenizer),
            current: Mutex::new(None),
        })
    }

    pub fn with_tokenizer<K: Tokenizer + 'static>(self, tokenizer: K) -> Self {
        self.with_shared_tokenizer(Arc::new(tokenizer))
    }

    pub fn with_shared_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn candidates(&self) -> &[Candidate<T>] {
        &self.candidates
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// The most recently started scan
    pub fn current(&self) -> Option<Arc<ScanOperation<T>>> {
        self.current.lock().clone()
    }

    /// Start a scan for `query`, cancelling the previous one if still running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn search<L: ScanListener<T> + 'static>(
        &self,
        query: &str,
        listener: &Arc<L>,
    ) -> Result<RunningScan<T>> {
        let engine = self
            .config
            .engine_with_tokenizer(Arc::clone(&self.tokenizer));
        let request = ScanRequest::new(query, Arc::clone(&self.candidates));
        let operation = Arc::new(
            ScanOperation::with_engine(request, self.config.clone(), engine)?
                .with_listener(listener),
        );
        let handle = operation.start()?;

        let previous = self.current.lock().replace(Arc::clone(&operation));
        if let Some(previous) = previous {
            if !previous.is_finished() && !previous.is_cancelled() {
                debug!(
                    scan_id = previous.id(),
                    superseded_by = operation.id(),
                    "cancelling stale scan"
                );
                previous.cancel();
            }
        }

        Ok(RunningScan { operation, handle })
    }

    /// Cancel the current scan, if any
    pub fn cancel(&self) {
        if let Some(operation) = self.current.lock().as_ref() {
            operation.cancel();
        }
    }
}
