//! ScanOperation - single-use cancellable scan
//!
//! Lifecycle: `Created -> Running -> {Finished, Cancelled}`.
//!
//! Cancellation is cooperative. The flag is checked before each candidate, so
//! the candidate being scored when `cancel()` lands is always completed first.
//! A configured timeout is checked at the same point and ends the scan the
//! same way.

use crate::candidate::{Candidate, ScanRequest, ScanResult, ScoredCandidate};
use crate::config::ScanConfig;
use crate::error::{Result, ScanError};
use crate::listener::{CancelReason, ScanListener};
use crate::tracing::prefix;
use parking_lot::Mutex;
use phrasematch_core::DistanceEngine;
use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::time::Instant;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

static NEXT_SCAN_ID: AtomicU64 = AtomicU64::new(1);

/// Lifecycle state of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ScanState {
    Created = 0,
    Running = 1,
    Finished = 2,
    Cancelled = 3,
}

impl ScanState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Created,
            1 => Self::Running,
            2 => Self::Finished,
            _ => Self::Cancelled,
        }
    }
}

/// How an executed scan ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    Finished,
    Cancelled(CancelReason),
}

/// Cloneable handle that cancels one scan from any thread
#[derive(Debug, Clone)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// A single-use scan of a candidate list against a query.
///
/// Candidates are scored in input order with the configured
/// [`DistanceEngine`]. On completion the result goes to the registered
/// [`ScanListener`]; when none is alive it is parked for
/// [`take_result`](Self::take_result).
pub struct ScanOperation<T> {
    id: u64,
    request: ScanRequest<T>,
    config: ScanConfig,
    engine: DistanceEngine,
    state: AtomicU8,
    cancel_flag: Arc<AtomicBool>,
    processed: AtomicUsize,
    listener: Mutex<Option<Weak<dyn ScanListener<T>>>>,
    parked: Mutex<Option<ScanResult<T>>>,
}

impl<T> fmt::Debug for ScanOperation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanOperation")
            .field("id", &self.id)
            .field("query", &self.request.query())
            .field("candidates", &self.request.len())
            .field("state", &self.state())
            .field("processed", &self.processed())
            .finish_non_exhaustive()
    }
}

impl<T> ScanOperation<T> {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn request(&self) -> &ScanRequest<T> {
        &self.request
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn state(&self) -> ScanState {
        ScanState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_running(&self) -> bool {
        self.state() == ScanState::Running
    }

    pub fn is_finished(&self) -> bool {
        self.state() == ScanState::Finished
    }

    pub fn is_cancelled(&self) -> bool {
        self.state() == ScanState::Cancelled
    }

    /// Candidates examined so far, including skipped ones
    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::Relaxed)
    }

    /// Request cancellation. Takes effect at the next candidate boundary;
    /// ignored once the scan has finished.
    pub fn cancel(&self) {
        if self.is_finished() {
            return;
        }
        if !self.cancel_flag.swap(true, Ordering::AcqRel) {
            debug!(scan_id = self.id, "cancel requested");
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            flag: Arc::clone(&self.cancel_flag),
        }
    }

    /// Result of a finished scan that had no live listener. Yields it once.
    pub fn take_result(&self) -> Option<ScanResult<T>> {
        self.parked.lock().take()
    }

    /// Replace the listener. Only a weak reference is kept.
    pub fn set_listener(&self, listener: Weak<dyn ScanListener<T>>) {
        *self.listener.lock() = Some(listener);
    }

    fn current_listener(&self) -> Option<Arc<dyn ScanListener<T>>> {
        self.listener.lock().as_ref().and_then(Weak::upgrade)
    }

    fn transition(&self, from: ScanState, to: ScanState) -> Result<()> {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|_| ScanError::AlreadyStarted { id: self.id })
    }

    fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.config.case_insensitive {
            Cow::Owned(text.to_lowercase())
        } else {
            Cow::Borrowed(text)
        }
    }

    fn score(&self, index: usize, query: &str, candidate: &Candidate<T>) -> Result<f64> {
        if candidate.text.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(ScanError::MalformedCandidate {
                index,
                reason: "blank text".to_string(),
            });
        }
        let text = candidate.text.as_deref().map(|t| self.normalize(t));
        self.engine
            .try_weighted_distance(Some(query), text.as_deref())
            .map_err(|err| ScanError::MalformedCandidate {
                index,
                reason: err.to_string(),
            })
    }

    fn finish_cancelled(&self, reason: CancelReason, started: Instant) -> ScanStatus {
        self.state
            .store(ScanState::Cancelled as u8, Ordering::Release);
        info!(
            scan_id = self.id,
            processed = self.processed(),
            candidates = self.request.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "{} scan cancelled ({})",
            prefix::SCAN_CANCEL,
            reason
        );
        if let Some(listener) = self.current_listener() {
            listener.on_scan_cancelled(self, reason);
        }
        ScanStatus::Cancelled(reason)
    }
}

impl<T: Clone + Send + Sync + 'static> ScanOperation<T> {
    /// Scan scored with the config's engine (Unicode word tokens)
    pub fn new(request: ScanRequest<T>, config: ScanConfig) -> Result<Self> {
        let engine = config.engine();
        Self::with_engine(request, config, engine)
    }

    /// Scan scored with a caller-supplied engine (e.g. a custom tokenizer)
    pub fn with_engine(
        request: ScanRequest<T>,
        config: ScanConfig,
        engine: DistanceEngine,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            id: NEXT_SCAN_ID.fetch_add(1, Ordering::Relaxed),
            request,
            config,
            engine,
            state: AtomicU8::new(ScanState::Created as u8),
            cancel_flag: Arc::new(AtomicBool::new(false)),
            processed: AtomicUsize::new(0),
            listener: Mutex::new(None),
            parked: Mutex::new(None),
        })
    }

    /// Register the listener notified on completion (held weakly)
    pub fn with_listener<L: ScanListener<T> + 'static>(self, listener: &Arc<L>) -> Self {
        let weak = Arc::downgrade(listener);
        self.set_listener(weak as Weak<dyn ScanListener<T>>);
        self
    }

    /// Schedule the scan on tokio's blocking pool.
    ///
    /// The handle resolves to the final status; dropping it detaches the scan.
    pub fn start(self: &Arc<Self>) -> Result<JoinHandle<ScanStatus>> {
        let runtime = Handle::try_current().map_err(|_| ScanError::NoRuntime)?;
        self.transition(ScanState::Created, ScanState::Running)?;
        let scan = Arc::clone(self);
        Ok(runtime.spawn_blocking(move || scan.execute()))
    }

    /// Execute the scan on the calling thread
    pub fn run(&self) -> Result<ScanStatus> {
        self.transition(ScanState::Created, ScanState::Running)?;
        Ok(self.execute())
    }

    fn execute(&self) -> ScanStatus {
        let started = Instant::now();
        // a deadline past Instant's range is no deadline
        let deadline = self
            .config
            .timeout()
            .and_then(|timeout| started.checked_add(timeout));
        let query = self.normalize(self.request.query());

        info!(
            scan_id = self.id,
            candidates = self.request.len(),
            mode = ?self.config.mode,
            "{} scan started",
            prefix::SCAN
        );

        let mut matches = Vec::new();
        let mut skipped = Vec::new();

        for (index, candidate) in self.request.candidates().iter().enumerate() {
            if self.cancel_flag.load(Ordering::Acquire) {
                return self.finish_cancelled(CancelReason::Requested, started);
            }
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return self.finish_cancelled(CancelReason::TimedOut, started);
            }

            match self.score(index, &query, candidate) {
                Ok(score) if self.config.mode.accepts(score) => {
                    matches.push(ScoredCandidate {
                        index,
                        text: candidate.text.clone().unwrap_or_default(),
                        item: candidate.item.clone(),
                        score,
                    });
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(scan_id = self.id, index, "skipping candidate: {}", err);
                    skipped.push(index);
                }
            }
            self.processed.fetch_add(1, Ordering::Relaxed);
        }

        if self.config.mode.is_ranked() {
            // stable: equal scores keep input order
            matches.sort_by(|a, b| a.score.total_cmp(&b.score));
        }
        if let Some(limit) = self.config.max_results {
            matches.truncate(limit);
        }

        let result = ScanResult {
            query: self.request.query().to_string(),
            matches,
            skipped,
            scanned: self.processed(),
            elapsed: started.elapsed(),
        };

        self.state
            .store(ScanState::Finished as u8, Ordering::Release);
        info!(
            scan_id = self.id,
            matches = result.matches.len(),
            skipped = result.skipped.len(),
            elapsed_us = result.elapsed.as_micros() as u64,
            "{} scan finished",
            prefix::SCAN_DONE
        );

        match self.current_listener() {
            Some(listener) => listener.on_scan_finished(self, result),
            None => {
                debug!(scan_id = self.id, "no live listener, parking result");
                *self.parked.lock() = Some(result);
            }
        }

        ScanStatus::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanMode;
    use pretty_assertions::assert_eq;

    fn exercises() -> Vec<Candidate<u32>> {
        vec![
            Candidate::new("Back Squat", 1),
            Candidate::new("Front Squat", 2),
            Candidate::new("Bench Press", 3),
            Candidate::new("Deadlift", 4),
        ]
    }

    #[derive(Default)]
    struct Recorder {
        finished: Mutex<Vec<(u64, ScanResult<u32>)>>,
        cancelled: Mutex<Vec<(u64, CancelReason)>>,
    }

    impl ScanListener<u32> for Recorder {
        fn on_scan_finished(&self, scan: &ScanOperation<u32>, result: ScanResult<u32>) {
            assert!(scan.is_finished());
            self.finished.lock().push((scan.id(), result));
        }

        fn on_scan_cancelled(&self, scan: &ScanOperation<u32>, reason: CancelReason) {
            assert!(scan.is_cancelled());
            self.cancelled.lock().push((scan.id(), reason));
        }
    }

    #[test]
    fn test_run_ranks_and_notifies_listener() {
        let recorder = Arc::new(Recorder::default());
        let scan = ScanOperation::new(ScanRequest::new("squat", exercises()), ScanConfig::default())
            .unwrap()
            .with_listener(&recorder);

        assert_eq!(scan.state(), ScanState::Created);
        assert_eq!(scan.run().unwrap(), ScanStatus::Finished);
        assert!(scan.is_finished());
        assert!(!scan.is_cancelled());

        let finished = recorder.finished.lock();
        assert_eq!(finished.len(), 1);
        let (id, result) = &finished[0];
        assert_eq!(*id, scan.id());
        assert_eq!(result.items().copied().collect::<Vec<_>>(), vec![1, 2, 4, 3]);
        assert_eq!(result.scanned, 4);
        assert!(scan.take_result().is_none());
    }

    #[test]
    fn test_run_twice_fails() {
        let scan =
            ScanOperation::new(ScanRequest::new("squat", exercises()), ScanConfig::default())
                .unwrap();
        scan.run().unwrap();
        assert!(matches!(
            scan.run(),
            Err(ScanError::AlreadyStarted { .. })
        ));
    }

    #[test]
    fn test_result_parked_without_listener() {
        let scan =
            ScanOperation::new(ScanRequest::new("deadlift", exercises()), ScanConfig::default())
                .unwrap();
        scan.run().unwrap();

        let result = scan.take_result().unwrap();
        assert_eq!(result.matches[0].text, "Deadlift");
        assert_eq!(result.matches[0].score, 0.0);
        assert!(scan.take_result().is_none());
    }

    #[test]
    fn test_dropped_listener_parks_result() {
        let recorder = Arc::new(Recorder::default());
        let scan =
            ScanOperation::new(ScanRequest::new("row", exercises()), ScanConfig::default())
                .unwrap()
                .with_listener(&recorder);
        drop(recorder);

        scan.run().unwrap();
        assert!(scan.take_result().is_some());
    }

    #[test]
    fn test_cancel_before_run() {
        let recorder = Arc::new(Recorder::default());
        let scan =
            ScanOperation::new(ScanRequest::new("squat", exercises()), ScanConfig::default())
                .unwrap()
                .with_listener(&recorder);

        scan.cancel();
        assert_eq!(
            scan.run().unwrap(),
            ScanStatus::Cancelled(CancelReason::Requested)
        );
        assert!(scan.is_cancelled());
        assert!(!scan.is_finished());
        assert_eq!(scan.processed(), 0);
        assert!(recorder.finished.lock().is_empty());
        assert_eq!(
            recorder.cancelled.lock().as_slice(),
            &[(scan.id(), CancelReason::Requested)]
        );
    }

    #[test]
    fn test_cancel_after_finish_is_ignored() {
        let scan =
            ScanOperation::new(ScanRequest::new("squat", exercises()), ScanConfig::default())
                .unwrap();
        scan.run().unwrap();
        scan.cancel();
        assert!(scan.is_finished());
        assert!(!scan.is_cancelled());
        assert!(!scan.cancel_handle().is_cancel_requested());
    }

    #[test]
    fn test_zero_timeout_times_out() {
        let recorder = Arc::new(Recorder::default());
        let config = ScanConfig {
            timeout_ms: Some(0),
            ..Default::default()
        };
        let scan = ScanOperation::new(ScanRequest::new("squat", exercises()), config)
            .unwrap()
            .with_listener(&recorder);

        assert_eq!(
            scan.run().unwrap(),
            ScanStatus::Cancelled(CancelReason::TimedOut)
        );
        assert!(scan.is_cancelled());
        assert!(recorder.finished.lock().is_empty());
    }

    #[test]
    fn test_huge_timeout_never_fires() {
        let config = ScanConfig {
            timeout_ms: Some(u64::MAX),
            ..Default::default()
        };
        let scan = ScanOperation::new(ScanRequest::new("squat", exercises()), config).unwrap();

        assert_eq!(scan.run().unwrap(), ScanStatus::Finished);
        assert_eq!(scan.take_result().unwrap().scanned, 4);
    }

    #[test]
    fn test_threshold_and_limit() {
        let config = ScanConfig {
            mode: ScanMode::Threshold { max_score: 10.0 },
            max_results: Some(1),
            ..Default::default()
        };
        let scan = ScanOperation::new(ScanRequest::new("squat", exercises()), config).unwrap();
        scan.run().unwrap();

        let result = scan.take_result().unwrap();
        assert_eq!(result.texts().collect::<Vec<_>>(), vec!["Back Squat"]);
        assert_eq!(result.scanned, 4);
    }

    #[test]
    fn test_input_order_mode_annotates_all() {
        let config = ScanConfig {
            mode: ScanMode::InputOrder,
            ..Default::default()
        };
        let scan = ScanOperation::new(ScanRequest::new("squat", exercises()), config).unwrap();
        scan.run().unwrap();

        let result = scan.take_result().unwrap();
        let indices: Vec<usize> = result.matches.iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_case_sensitive_scoring() {
        let config = ScanConfig {
            case_insensitive: false,
            ..Default::default()
        };
        let scan = ScanOperation::new(ScanRequest::new("deadlift", exercises()), config).unwrap();
        scan.run().unwrap();

        let result = scan.take_result().unwrap();
        let deadlift = result.matches.iter().find(|m| m.item == 4).unwrap();
        assert_eq!(deadlift.score, 1.0 + 0.5);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ScanConfig {
            mode: ScanMode::Threshold {
                max_score: f64::NAN,
            },
            ..Default::default()
        };
        assert!(ScanOperation::new(ScanRequest::new("squat", exercises()), config).is_err());
    }

    #[test]
    fn test_start_without_runtime() {
        let scan = Arc::new(
            ScanOperation::new(ScanRequest::new("squat", exercises()), ScanConfig::default())
                .unwrap(),
        );
        assert!(matches!(scan.start(), Err(ScanError::NoRuntime)));
        assert_eq!(scan.state(), ScanState::Created);
    }
}
