//! Exponential moving average baseline
//!
//! The baseline side of the detector: a single rolling scalar seeded from
//! the arithmetic mean of an initial window, then advanced by an EMA
//! recurrence in O(1) per sample.
//!
//! # Example
//!
//! ```
//! use driftwatch::baseline::EmaBaseline;
//!
//! let mut baseline = EmaBaseline::new(10);
//!
//! for _ in 0..10 {
//!     baseline.observe(0.0);
//! }
//! assert_eq!(baseline.value(), 0.0);
//!
//! // One spike moves the baseline by spike / window_size
//! assert_eq!(baseline.observe(100.0), 10.0);
//! ```

mod ema;

pub use ema::EmaBaseline;
