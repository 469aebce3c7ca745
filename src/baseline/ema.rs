//! EMA baseline with mean seeding

use crate::traits::OnlineStat;

/// Exponential moving average seeded from an initial window
///
/// For the first `window_size` samples the baseline is the arithmetic mean
/// of everything seen so far; once the seed window is full, each new sample
/// advances the rolling scalar by the recurrence
///
/// ```text
/// baseline = (baseline * (window_size - 1) + sample) / window_size
/// ```
///
/// which is an EMA with smoothing factor `1 / window_size`. At the moment
/// the seed window fills, the running mean and the recurrence agree, so the
/// transition is seamless.
///
/// # Example
///
/// ```
/// use driftwatch::baseline::EmaBaseline;
///
/// let mut baseline = EmaBaseline::new(4);
///
/// baseline.observe(2.0);
/// baseline.observe(4.0);
/// assert_eq!(baseline.value(), 3.0); // still seeding: plain mean
///
/// baseline.observe(3.0);
/// baseline.observe(3.0);
/// assert!(baseline.is_seeded());
///
/// // (3.0 * 3 + 7.0) / 4 = 4.0
/// assert_eq!(baseline.observe(7.0), 4.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EmaBaseline {
    /// Seed window length; also fixes the smoothing factor
    window_size: usize,
    /// Sum of the seed samples, used only until the window fills
    seed_sum: f64,
    /// Current baseline scalar
    value: f64,
    /// Number of samples observed
    count: u64,
}

impl EmaBaseline {
    /// Create a baseline with the given seed window
    ///
    /// # Panics
    ///
    /// Panics if `window_size` is 0. Sessions validate their configuration
    /// before constructing one, so this is only reachable through direct use.
    pub fn new(window_size: usize) -> Self {
        assert!(window_size > 0, "window_size must be positive");

        Self {
            window_size,
            seed_sum: 0.0,
            value: 0.0,
            count: 0,
        }
    }

    /// Observe one sample and return the updated baseline
    ///
    /// NaN values are ignored to keep the rolling scalar finite; the
    /// current baseline is returned unchanged.
    pub fn observe(&mut self, sample: f64) -> f64 {
        if sample.is_nan() {
            return self.value;
        }

        self.count += 1;

        if self.count <= self.window_size as u64 {
            self.seed_sum += sample;
            self.value = self.seed_sum / self.count as f64;
        } else {
            let w = self.window_size as f64;
            self.value = (self.value * (w - 1.0) + sample) / w;
        }

        self.value
    }

    /// Current baseline value (0.0 before any sample)
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Whether the seed window has filled and the recurrence has taken over
    pub fn is_seeded(&self) -> bool {
        self.count >= self.window_size as u64
    }

    /// Seed window length
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Number of samples observed
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Check if no samples have been observed
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl OnlineStat for EmaBaseline {
    fn update(&mut self, value: f64) {
        self.observe(value);
    }

    fn clear(&mut self) {
        *self = Self::new(self.window_size);
    }

    fn count(&self) -> u64 {
        self.count
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for EmaBaseline {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("EmaBaseline", 4)?;
        state.serialize_field("window_size", &self.window_size)?;
        state.serialize_field("seed_sum", &self.seed_sum)?;
        state.serialize_field("value", &self.value)?;
        state.serialize_field("count", &self.count)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for EmaBaseline {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct EmaData {
            window_size: usize,
            seed_sum: f64,
            value: f64,
            count: u64,
        }

        let data = EmaData::deserialize(deserializer)?;
        if data.window_size == 0 {
            return Err(serde::de::Error::custom("window_size must be positive"));
        }
        Ok(EmaBaseline {
            window_size: data.window_size,
            seed_sum: data.seed_sum,
            value: data.value,
            count: data.count,
        })
    }
}
