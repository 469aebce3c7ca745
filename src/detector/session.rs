//! Detector configuration and session

#[cfg(feature = "std")]
use std::{collections::VecDeque, vec::Vec};

#[cfg(not(feature = "std"))]
use alloc::{collections::VecDeque, vec::Vec};

use crate::baseline::EmaBaseline;
use crate::math;
use crate::statistics::RunningMoments;
use crate::stream::BoundedStream;
use crate::traits::{ConfigError, OnlineStat};

use super::input::{parse_sample, InvalidSample};

/// Detector tuning parameters
///
/// All fields are public; [`Default`] gives the conventional configuration
/// (window of 50, threshold of 3 standard deviations, a million-sample
/// store cap). Validated by [`DetectorSession::new`] before any sample is
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectorConfig {
    /// Samples used to seed the moving average; also fixes the EMA
    /// smoothing factor at `1 / window_size`
    pub window_size: usize,
    /// Deviation multiplier: a point is anomalous when it sits more than
    /// `threshold` standard deviations from the baseline
    pub threshold: f64,
    /// Store capacity; the oldest sample is evicted beyond this
    pub max_window_size: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_size: 50,
            threshold: 3.0,
            max_window_size: 1_000_000,
        }
    }
}

impl DetectorConfig {
    /// Check the configuration, without constructing anything
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::ZeroWindowSize);
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        if self.max_window_size == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        // A store smaller than the seed window could never finish seeding
        if self.max_window_size < self.window_size {
            return Err(ConfigError::CapacityBelowWindow {
                window_size: self.window_size,
                max_window_size: self.max_window_size,
            });
        }
        Ok(())
    }
}

/// Classification of one accepted sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Submission {
    /// Position of the sample in the current store
    pub position: usize,
    /// The accepted sample value
    pub value: f64,
    /// Baseline at this position, after observing the sample
    pub baseline: f64,
    /// Absolute deviation of the sample from the baseline
    pub deviation: f64,
    /// Whether the deviation exceeded `threshold * dispersion`
    pub is_anomaly: bool,
}

/// One owner, one stream: the detector session
///
/// Holds the bounded store, the EMA baseline, the dispersion accumulator,
/// and the derived outputs (one baseline entry per stored sample, plus the
/// set of anomalous positions). [`submit`] is the sole mutating entry point
/// for raw input and does O(1) amortized work per call; it is not
/// reentrant-safe, so concurrent producers need their own serialization in
/// front of it.
///
/// When the store evicts, the evicted sample is also retired from the
/// dispersion accumulator, so the dispersion estimate always covers exactly
/// the retained samples. The EMA scalar is not rewound on eviction; its
/// exponential decay already discounts old samples.
///
/// [`submit`]: DetectorSession::submit
///
/// # Example
///
/// ```
/// use driftwatch::{DetectorConfig, DetectorSession};
///
/// let config = DetectorConfig {
///     window_size: 10,
///     threshold: 1.5,
///     ..DetectorConfig::default()
/// };
/// let mut session = DetectorSession::new(config).unwrap();
///
/// session.seed([0.0; 10]);
/// let result = session.submit("100").unwrap();
///
/// assert!(result.is_anomaly);
/// assert_eq!(result.position, 10);
/// assert_eq!(result.baseline, 10.0);
/// ```
#[derive(Clone, Debug)]
pub struct DetectorSession {
    config: DetectorConfig,
    stream: BoundedStream,
    baseline: EmaBaseline,
    dispersion: RunningMoments,
    /// Baseline value per stored sample, parallel to the store
    baselines: VecDeque<f64>,
    /// Anomalous samples as arrival indices; translated to store positions
    /// on read so eviction never forces a shift
    anomalies: VecDeque<u64>,
}

impl DetectorSession {
    /// Create a session from a validated configuration
    pub fn new(config: DetectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            stream: BoundedStream::new(config.max_window_size),
            baseline: EmaBaseline::new(config.window_size),
            dispersion: RunningMoments::new(),
            baselines: VecDeque::new(),
            anomalies: VecDeque::new(),
            config,
        })
    }

    /// Validate and classify one raw sample
    ///
    /// On parse failure the session is left untouched; the error carries the
    /// offending token for the caller to render. There are no retries here,
    /// re-prompting is the caller's decision.
    pub fn submit(&mut self, raw: &str) -> Result<Submission, InvalidSample> {
        let sample = parse_sample(raw)?;
        Ok(self.ingest(sample))
    }

    /// Bulk-ingest already-numeric samples, e.g. a historical prefix
    ///
    /// Each sample runs through the identical per-sample path as
    /// [`submit`], including eviction and classification. Non-finite values
    /// are skipped.
    ///
    /// [`submit`]: DetectorSession::submit
    pub fn seed<I>(&mut self, samples: I)
    where
        I: IntoIterator<Item = f64>,
    {
        for sample in samples {
            if sample.is_finite() {
                self.ingest(sample);
            }
        }
    }

    /// Rebuild all derived state from the retained samples
    ///
    /// Cold-start/verification path: replays the current store contents
    /// through fresh accumulators. While no eviction has occurred this
    /// reproduces the incrementally maintained outputs exactly; after
    /// eviction it re-seeds from the retained front and is therefore a
    /// re-baselining, not a replay of history.
    pub fn recompute(&mut self) {
        let samples: Vec<f64> = self.stream.iter().collect();
        let base = self.stream.evicted();

        self.baseline.clear();
        self.dispersion.clear();
        self.baselines.clear();
        self.anomalies.clear();

        for (offset, sample) in samples.into_iter().enumerate() {
            self.classify(sample, base + offset as u64);
        }
    }

    fn ingest(&mut self, sample: f64) -> Submission {
        let arrival = self.stream.arrivals();

        if let Some(old) = self.stream.push(sample) {
            // Statistics follow the store: retire the evicted sample and
            // drop bookkeeping that fell off the front
            self.dispersion.remove(old);
            self.baselines.pop_front();
            while let Some(&front) = self.anomalies.front() {
                if front < self.stream.evicted() {
                    self.anomalies.pop_front();
                } else {
                    break;
                }
            }
        }

        self.classify(sample, arrival)
    }

    /// Advance the accumulators and classify the newest sample
    ///
    /// `arrival` anchors the anomaly record; classification happens exactly
    /// once per sample, against the baseline and dispersion as of this
    /// observation, and is never revised by later samples.
    fn classify(&mut self, sample: f64, arrival: u64) -> Submission {
        let baseline = self.baseline.observe(sample);
        self.dispersion.push(sample);

        // While the seed window is filling, every reported entry is the
        // running mean of the whole store so far
        if self.baseline.len() <= self.config.window_size as u64 {
            for entry in self.baselines.iter_mut() {
                *entry = baseline;
            }
        }
        self.baselines.push_back(baseline);

        let deviation = math::abs(sample - baseline);
        // Strictly greater: equality does not flag, and position 0 (zero
        // deviation, zero dispersion) can never flag
        let is_anomaly = deviation > self.config.threshold * self.dispersion.stddev();
        if is_anomaly {
            self.anomalies.push_back(arrival);
        }

        Submission {
            position: self.baselines.len() - 1,
            value: sample,
            baseline,
            deviation,
            is_anomaly,
        }
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.stream.len()
    }

    /// Check if the session has accepted no samples
    pub fn is_empty(&self) -> bool {
        self.stream.is_empty()
    }

    /// The configuration this session was built from
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Retained samples, oldest first
    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.stream.iter()
    }

    /// Baseline value per retained sample, parallel to [`samples`]
    ///
    /// [`samples`]: DetectorSession::samples
    pub fn baselines(&self) -> impl Iterator<Item = f64> + '_ {
        self.baselines.iter().copied()
    }

    /// Anomalous positions in the current store, strictly increasing
    pub fn anomalies(&self) -> impl Iterator<Item = usize> + '_ {
        let first = self.stream.evicted();
        self.anomalies.iter().map(move |&arrival| (arrival - first) as usize)
    }

    /// Current baseline scalar
    pub fn baseline_value(&self) -> f64 {
        self.baseline.value()
    }

    /// Current dispersion estimate (population standard deviation over the
    /// retained samples)
    pub fn dispersion(&self) -> f64 {
        self.dispersion.stddev()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DetectorSession {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("DetectorSession", 6)?;
        state.serialize_field("config", &self.config)?;
        state.serialize_field("stream", &self.stream)?;
        state.serialize_field("baseline", &self.baseline)?;
        state.serialize_field("dispersion", &self.dispersion)?;
        state.serialize_field("baselines", &self.baselines)?;
        state.serialize_field("anomalies", &self.anomalies)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DetectorSession {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct SessionData {
            config: DetectorConfig,
            stream: BoundedStream,
            baseline: EmaBaseline,
            dispersion: RunningMoments,
            baselines: VecDeque<f64>,
            anomalies: VecDeque<u64>,
        }

        let data = SessionData::deserialize(deserializer)?;
        data.config.validate().map_err(serde::de::Error::custom)?;
        if data.baselines.len() != data.stream.len() {
            return Err(serde::de::Error::custom(
                "baseline sequence length does not match store length",
            ));
        }
        Ok(DetectorSession {
            config: data.config,
            stream: data.stream,
            baseline: data.baseline,
            dispersion: data.dispersion,
            baselines: data.baselines,
            anomalies: data.anomalies,
        })
    }
}
