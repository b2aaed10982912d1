//! # phrasematch Scan Coordinator
//!
//! Runs a query against a candidate list as a cancellable background scan:
//!
//! - **operation**: single-use [`ScanOperation`] with cooperative cancellation
//! - **listener**: [`ScanListener`] observer notified once per scan
//! - **scanner**: [`Scanner`] that supersedes stale scans as the query changes
//! - **config**: serde-backed [`ScanConfig`] (weights, mode, timeout)
//! - **tracing**: logging setup for hosts
//!
//! ## Usage
//!
//! ```rust
//! use phrasematch_scan::{Candidate, ScanConfig, ScanOperation, ScanRequest};
//!
//! let candidates = vec![
//!     Candidate::new("Back Squat", 1),
//!     Candidate::new("Deadlift", 2),
//! ];
//! let scan = ScanOperation::new(ScanRequest::new("squat", candidates), ScanConfig::default())?;
//! scan.run()?;
//!
//! let result = scan.take_result().expect("no listener registered");
//! assert_eq!(result.matches[0].item, 1);
//! # Ok::<(), phrasematch_scan::ScanError>(())
//! ```

pub mod candidate;
pub mod config;
pub mod error;
pub mod listener;
pub mod operation;
pub mod scanner;
pub mod tracing;

// Re-export main types at crate root
pub use candidate::{Candidate, ScanRequest, ScanResult, ScoredCandidate};
pub use config::{ScanConfig, ScanMode};
pub use error::{Result, ScanError};
pub use listener::{CancelReason, ScanListener};
pub use operation::{CancelHandle, ScanOperation, ScanState, ScanStatus};
pub use scanner::{RunningScan, Scanner};
