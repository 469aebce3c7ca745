//! Raw input validation

#[cfg(feature = "std")]
use std::string::{String, ToString};

#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};

/// Raw input that did not parse as a finite number
///
/// Carries the offending token so the caller can render it; the detector
/// itself never prints anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSample {
    token: String,
}

impl InvalidSample {
    /// The rejected input, exactly as submitted
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl core::fmt::Display for InvalidSample {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "invalid sample {:?}: not a finite number", self.token)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidSample {}

/// Parse one raw token into a sample
///
/// Surrounding whitespace is tolerated. NaN and infinite values parse as
/// `f64` but are rejected here: the stream holds finite reals only.
pub fn parse_sample(raw: &str) -> Result<f64, InvalidSample> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InvalidSample {
            token: raw.to_string(),
        }),
    }
}
