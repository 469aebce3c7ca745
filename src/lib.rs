//! # Driftwatch
//!
//! Online anomaly detection for numeric data streams.
//!
//! Driftwatch maintains a running statistical baseline over an unbounded
//! stream and flags points that deviate from it beyond a configurable
//! threshold, without ever recomputing over the full history. Every update
//! is O(1): the baseline is an exponential moving average seeded from the
//! first `window_size` samples, and the dispersion estimate is a Welford
//! online accumulator.
//!
//! ## Features
//!
//! - **EMA Baseline**: rolling average with smoothing factor `1/window_size`
//! - **Streaming Dispersion**: numerically stable online standard deviation,
//!   with sliding-window removal when old samples are evicted
//! - **Bounded Store**: FIFO-capped sample window for infinite streams
//! - **Detector Session**: validate → store → classify, one call per sample
//!
//! ## Quick Start
//!
//! ```rust
//! use driftwatch::prelude::*;
//!
//! let config = DetectorConfig {
//!     window_size: 10,
//!     threshold: 1.5,
//!     ..DetectorConfig::default()
//! };
//! let mut session = DetectorSession::new(config).unwrap();
//!
//! // Establish a flat baseline, then feed a spike
//! session.seed([0.0; 10]);
//! let result = session.submit("100").unwrap();
//!
//! assert!(result.is_anomaly);
//! assert_eq!(result.baseline, 10.0);
//! ```
//!
//! Malformed input never touches the stream:
//!
//! ```rust
//! use driftwatch::{DetectorConfig, DetectorSession};
//!
//! let mut session = DetectorSession::new(DetectorConfig::default()).unwrap();
//! assert!(session.submit("not a number").is_err());
//! assert_eq!(session.len(), 0);
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support
//! - `serde`: Serialize/deserialize detector state

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod math;

// Core traits always available
pub mod traits;

pub mod baseline;
pub mod detector;
pub mod statistics;
pub mod stream;

pub mod prelude {
    pub use crate::traits::*;

    pub use crate::baseline::EmaBaseline;
    pub use crate::detector::{DetectorConfig, DetectorSession, InvalidSample, Submission};
    pub use crate::statistics::RunningMoments;
    pub use crate::stream::BoundedStream;
}

pub use detector::{DetectorConfig, DetectorSession};
