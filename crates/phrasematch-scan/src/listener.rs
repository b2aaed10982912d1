//! Completion listener

use crate::candidate::ScanResult;
use crate::operation::ScanOperation;

/// Why a scan stopped before completing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// `cancel()` was called
    Requested,
    /// The configured timeout elapsed
    TimedOut,
}

impl std::fmt::Display for CancelReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Requested => write!(f, "requested"),
            Self::TimedOut => write!(f, "timed out"),
        }
    }
}

/// Observer notified when a scan ends.
///
/// Scans hold listeners weakly, so one listener can track many concurrent
/// scans and tell them apart through the `scan` argument. Callbacks run on
/// the thread that executed the scan.
pub trait ScanListener<T>: Send + Sync {
    /// Called exactly once when the scan runs to completion
    fn on_scan_finished(&self, scan: &ScanOperation<T>, result: ScanResult<T>);

    /// Called once if the scan stops early; never paired with
    /// `on_scan_finished`
    fn on_scan_cancelled(&self, scan: &ScanOperation<T>, reason: CancelReason) {
        let _ = (scan, reason);
    }
}
