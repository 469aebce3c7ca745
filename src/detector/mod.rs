//! Anomaly detector session
//!
//! Ties the pieces together: raw input is validated, appended to the
//! bounded store, folded into the EMA baseline and the dispersion
//! accumulator, and the newest point is classified, all in O(1) per
//! sample.
//!
//! # Example
//!
//! ```
//! use driftwatch::detector::{DetectorConfig, DetectorSession};
//!
//! let config = DetectorConfig {
//!     window_size: 10,
//!     threshold: 1.5,
//!     ..DetectorConfig::default()
//! };
//! let mut session = DetectorSession::new(config).unwrap();
//!
//! session.seed([0.0; 10]);
//!
//! let spike = session.submit("100").unwrap();
//! assert!(spike.is_anomaly);
//!
//! let err = session.submit("twelve").unwrap_err();
//! assert_eq!(err.token(), "twelve");
//! ```

mod input;
mod session;

pub use input::{parse_sample, InvalidSample};
pub use session::{DetectorConfig, DetectorSession, Submission};
