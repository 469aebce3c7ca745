//! Streaming moment statistics
//!
//! This module provides the dispersion side of the detector: mean, variance,
//! and standard deviation computed in a single pass with constant memory,
//! including O(1) removal for sliding windows.
//!
//! # Example
//!
//! ```
//! use driftwatch::statistics::RunningMoments;
//!
//! let mut moments = RunningMoments::new();
//!
//! for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
//!     moments.push(value);
//! }
//!
//! println!("Mean: {}", moments.mean());
//! println!("Stddev: {}", moments.stddev());
//! ```

mod moments;

pub use moments::RunningMoments;
