//! Core traits for streaming estimators
//!
//! All estimators implement the base [`OnlineStat`] trait: one value in,
//! O(1) work, constant memory. Configuration errors shared by the detector
//! types live here as well.

use core::fmt::Debug;

/// Error constructing a detector from an invalid configuration
///
/// Rejected before any sample is accepted; a session that constructs
/// successfully never produces configuration failures afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `window_size` must be at least 1
    ZeroWindowSize,
    /// `threshold` must be positive and finite
    InvalidThreshold(f64),
    /// `max_window_size` must be at least 1
    ZeroCapacity,
    /// The store must be able to hold a full seed window
    CapacityBelowWindow {
        window_size: usize,
        max_window_size: usize,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroWindowSize => write!(f, "window_size must be at least 1"),
            ConfigError::InvalidThreshold(t) => {
                write!(f, "threshold must be positive and finite, got {}", t)
            }
            ConfigError::ZeroCapacity => write!(f, "max_window_size must be at least 1"),
            ConfigError::CapacityBelowWindow {
                window_size,
                max_window_size,
            } => {
                write!(
                    f,
                    "max_window_size ({}) must be >= window_size ({})",
                    max_window_size, window_size
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Core trait for all streaming estimators
pub trait OnlineStat: Clone + Debug {
    /// Fold one sample into the estimator
    fn update(&mut self, value: f64);

    /// Reset to the empty state
    fn clear(&mut self);

    /// Number of samples currently in scope
    fn count(&self) -> u64;

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Check if the estimator has seen no samples
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::CapacityBelowWindow {
            window_size: 50,
            max_window_size: 10,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("50"));
        assert!(msg.contains("10"));

        assert_eq!(
            format!("{}", ConfigError::ZeroWindowSize),
            "window_size must be at least 1"
        );
    }
}
