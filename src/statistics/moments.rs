//! Running moments (mean, variance, standard deviation)
//!
//! Computes streaming statistics using Welford's numerically stable online
//! algorithm, extended with the reverse update so samples leaving a sliding
//! window can be retired in O(1).

use crate::math;
use crate::traits::OnlineStat;

/// Running moments accumulator using Welford's algorithm
///
/// Maintains count, mean, and the sum of squared deviations (M2) in O(1)
/// memory. Unlike a plain one-way accumulator it also supports [`remove`],
/// the reverse Welford update, so the scope of the statistics can track a
/// window that both grows at the back and shrinks at the front.
///
/// Variance and standard deviation are population statistics: the standard
/// deviation of a single sample is 0, not undefined.
///
/// [`remove`]: RunningMoments::remove
///
/// # Example
///
/// ```
/// use driftwatch::statistics::RunningMoments;
///
/// let mut moments = RunningMoments::new();
///
/// for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     moments.push(value);
/// }
///
/// assert!((moments.mean() - 5.0).abs() < 1e-9);
/// assert!((moments.variance() - 4.0).abs() < 1e-9);
/// assert!((moments.stddev() - 2.0).abs() < 1e-9);
///
/// // Retire the oldest sample; the accumulator now covers the last seven
/// moments.remove(2.0);
/// assert_eq!(moments.len(), 7);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunningMoments {
    /// Number of samples in scope
    count: u64,
    /// Running mean
    mean: f64,
    /// Sum of squared differences from the mean (M2 in Welford's algorithm)
    m2: f64,
}

impl RunningMoments {
    /// Create a new empty accumulator
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    /// Fold a sample into the accumulator
    ///
    /// Uses Welford's online algorithm for numerical stability.
    /// NaN values are ignored to prevent poisoning the statistics.
    pub fn push(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }

        self.count += 1;

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    /// Retire a sample from the accumulator
    ///
    /// The reverse of [`push`]: removing a value that was previously pushed
    /// restores count, mean, and M2 (up to floating-point rounding). The
    /// caller is responsible for only removing values that are in scope;
    /// removing anything else silently skews the statistics.
    ///
    /// NaN values are ignored, matching [`push`]. Removing from an empty
    /// accumulator is a no-op.
    ///
    /// [`push`]: RunningMoments::push
    pub fn remove(&mut self, value: f64) {
        if value.is_nan() || self.count == 0 {
            return;
        }

        if self.count == 1 {
            *self = Self::new();
            return;
        }

        let count = self.count as f64;
        let mean_without = (count * self.mean - value) / (count - 1.0);
        self.m2 -= (value - self.mean) * (value - mean_without);
        // Rounding can drive M2 slightly negative; variance must stay >= 0
        if self.m2 < 0.0 {
            self.m2 = 0.0;
        }
        self.mean = mean_without;
        self.count -= 1;
    }

    /// Number of samples in scope
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get the mean
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Get the population variance
    ///
    /// Variance over exactly the samples in scope. Use [`sample_variance`]
    /// for the unbiased estimator.
    ///
    /// [`sample_variance`]: RunningMoments::sample_variance
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.m2 / self.count as f64
        }
    }

    /// Get the sample variance (Bessel's correction)
    pub fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// Get the population standard deviation
    pub fn stddev(&self) -> f64 {
        math::sqrt(self.variance())
    }

    /// Get the sample standard deviation
    pub fn sample_stddev(&self) -> f64 {
        math::sqrt(self.sample_variance())
    }
}

impl OnlineStat for RunningMoments {
    fn update(&mut self, value: f64) {
        self.push(value);
    }

    fn clear(&mut self) {
        *self = Self::new();
    }

    fn count(&self) -> u64 {
        self.count
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RunningMoments {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("RunningMoments", 3)?;
        state.serialize_field("count", &self.count)?;
        state.serialize_field("mean", &self.mean)?;
        state.serialize_field("m2", &self.m2)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RunningMoments {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct MomentsData {
            count: u64,
            mean: f64,
            m2: f64,
        }

        let data = MomentsData::deserialize(deserializer)?;
        Ok(RunningMoments {
            count: data.count,
            mean: data.mean,
            m2: data.m2,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        let mut moments = RunningMoments::new();

        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            moments.push(v);
        }

        assert_eq!(moments.len(), 8);
        assert!((moments.mean() - 5.0).abs() < 0.001);
        assert!((moments.variance() - 4.0).abs() < 0.001);
        assert!((moments.stddev() - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_single_value() {
        let mut moments = RunningMoments::new();
        moments.push(42.0);

        assert_eq!(moments.len(), 1);
        assert!((moments.mean() - 42.0).abs() < 0.001);
        assert_eq!(moments.variance(), 0.0);
        assert_eq!(moments.stddev(), 0.0);
    }

    #[test]
    fn test_empty() {
        let moments = RunningMoments::new();

        assert!(moments.is_empty());
        assert_eq!(moments.mean(), 0.0);
        assert_eq!(moments.variance(), 0.0);
    }

    #[test]
    fn test_remove_reverses_push() {
        let mut moments = RunningMoments::new();
        for v in [1.0, 2.0, 3.0, 4.0] {
            moments.push(v);
        }

        let mut windowed = moments.clone();
        windowed.push(5.0);
        windowed.remove(5.0);

        assert_eq!(windowed.len(), moments.len());
        assert!((windowed.mean() - moments.mean()).abs() < 1e-9);
        assert!((windowed.variance() - moments.variance()).abs() < 1e-9);
    }

    #[test]
    fn test_remove_front_matches_fresh() {
        // Slide a window of 3 over a stream and compare against a fresh
        // accumulator over the same 3 values
        let data = [10.0, 12.0, 9.0, 15.0, 11.0, 8.0];

        let mut sliding = RunningMoments::new();
        for &v in &data[..3] {
            sliding.push(v);
        }
        for i in 3..data.len() {
            sliding.push(data[i]);
            sliding.remove(data[i - 3]);

            let mut fresh = RunningMoments::new();
            for &v in &data[i - 2..=i] {
                fresh.push(v);
            }

            assert_eq!(sliding.len(), 3);
            assert!(
                (sliding.mean() - fresh.mean()).abs() < 1e-9,
                "mean after slide {}: {} vs {}",
                i,
                sliding.mean(),
                fresh.mean()
            );
            assert!(
                (sliding.variance() - fresh.variance()).abs() < 1e-9,
                "variance after slide {}: {} vs {}",
                i,
                sliding.variance(),
                fresh.variance()
            );
        }
    }

    #[test]
    fn test_remove_to_empty() {
        let mut moments = RunningMoments::new();
        moments.push(7.0);
        moments.remove(7.0);

        assert!(moments.is_empty());
        assert_eq!(moments.mean(), 0.0);
        assert_eq!(moments.variance(), 0.0);

        // Removing from empty is a no-op
        moments.remove(3.0);
        assert!(moments.is_empty());
    }

    #[test]
    fn test_nan_ignored() {
        let mut moments = RunningMoments::new();

        moments.push(1.0);
        moments.push(f64::NAN);
        moments.push(2.0);
        moments.remove(f64::NAN);
        moments.push(3.0);

        assert_eq!(moments.len(), 3);
        assert!((moments.mean() - 2.0).abs() < 0.001);
        assert!(!moments.variance().is_nan());
    }

    #[test]
    fn test_variance_never_negative() {
        // Near-identical values drive M2 toward zero; rounding in remove
        // must not push it below
        let mut moments = RunningMoments::new();
        let base = 1e9;
        for i in 0..100 {
            moments.push(base + (i % 2) as f64 * 1e-6);
        }
        for i in 0..99 {
            moments.remove(base + (i % 2) as f64 * 1e-6);
            assert!(
                moments.variance() >= 0.0,
                "variance went negative after {} removals",
                i + 1
            );
        }
    }

    #[test]
    fn test_numerical_stability() {
        let mut moments = RunningMoments::new();

        let base = 1e12;
        for i in 0..1000 {
            moments.push(base + i as f64);
        }

        let expected_mean = base + 499.5;
        assert!(
            (moments.mean() - expected_mean).abs() < 1.0,
            "Mean: {} expected: {}",
            moments.mean(),
            expected_mean
        );
    }

    #[test]
    fn test_clear() {
        let mut moments = RunningMoments::new();
        moments.push(1.0);
        moments.push(2.0);

        moments.clear();

        assert!(OnlineStat::is_empty(&moments));
        assert_eq!(OnlineStat::count(&moments), 0);
    }
}
