//! FIFO-bounded sample store

#[cfg(feature = "std")]
use std::collections::VecDeque;

#[cfg(not(feature = "std"))]
use alloc::collections::VecDeque;

/// Append-only sample store with FIFO eviction
///
/// Samples occupy contiguous positions `0..len()` in arrival order. Once
/// `capacity` samples are held, each append evicts the front sample and
/// returns it, so callers maintaining statistics over the store contents can
/// retire it from their accumulators.
///
/// Positions are positions within the *current* store. The store also counts
/// total evictions, which relates current positions to arrival order:
/// arrival index = `evicted() + position`.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundedStream {
    /// Retained samples, oldest at the front
    samples: VecDeque<f64>,
    /// Maximum number of retained samples
    capacity: usize,
    /// Total samples evicted so far
    evicted: u64,
}

impl BoundedStream {
    /// Create an empty store with the given capacity
    ///
    /// Storage is allocated as the stream grows, not up front; large caps
    /// (the default is 10^6) cost nothing until reached.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0. Sessions validate their configuration
    /// before constructing one, so this is only reachable through direct use.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be positive");

        Self {
            samples: VecDeque::new(),
            capacity,
            evicted: 0,
        }
    }

    /// Append a sample, evicting the oldest if the capacity is exceeded
    ///
    /// Returns the evicted sample, if any.
    pub fn push(&mut self, sample: f64) -> Option<f64> {
        self.samples.push_back(sample);
        if self.samples.len() > self.capacity {
            let old = self.samples.pop_front();
            self.evicted += 1;
            old
        } else {
            None
        }
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the store holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of retained samples
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total samples evicted so far
    ///
    /// Also the arrival index of the sample currently at position 0.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Total samples ever appended
    pub fn arrivals(&self) -> u64 {
        self.evicted + self.samples.len() as u64
    }

    /// Get the sample at a position in the current store
    pub fn get(&self, position: usize) -> Option<f64> {
        self.samples.get(position).copied()
    }

    /// Most recently appended sample
    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    /// Iterate over the retained samples, oldest first
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    /// Drop all samples and reset the eviction count
    pub fn clear(&mut self) {
        self.samples.clear();
        self.evicted = 0;
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BoundedStream {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("BoundedStream", 3)?;
        state.serialize_field("capacity", &self.capacity)?;
        state.serialize_field("samples", &self.samples)?;
        state.serialize_field("evicted", &self.evicted)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BoundedStream {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[cfg(not(feature = "std"))]
        use alloc::vec::Vec;

        #[derive(serde::Deserialize)]
        struct StreamData {
            capacity: usize,
            samples: Vec<f64>,
            evicted: u64,
        }

        let data = StreamData::deserialize(deserializer)?;
        if data.capacity == 0 {
            return Err(serde::de::Error::custom("capacity must be positive"));
        }
        if data.samples.len() > data.capacity {
            return Err(serde::de::Error::custom("samples exceed capacity"));
        }
        Ok(BoundedStream {
            samples: data.samples.into_iter().collect(),
            capacity: data.capacity,
            evicted: data.evicted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_within_capacity() {
        let mut stream = BoundedStream::new(5);

        for i in 0..5 {
            assert_eq!(stream.push(i as f64), None);
        }

        assert_eq!(stream.len(), 5);
        assert_eq!(stream.evicted(), 0);
        assert_eq!(stream.get(0), Some(0.0));
        assert_eq!(stream.latest(), Some(4.0));
    }

    #[test]
    fn test_eviction_is_fifo() {
        let mut stream = BoundedStream::new(3);

        stream.push(1.0);
        stream.push(2.0);
        stream.push(3.0);

        assert_eq!(stream.push(4.0), Some(1.0));
        assert_eq!(stream.push(5.0), Some(2.0));

        assert_eq!(stream.len(), 3);
        assert_eq!(stream.evicted(), 2);
        let retained: Vec<f64> = stream.iter().collect();
        assert_eq!(retained, vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_arrival_bookkeeping() {
        let mut stream = BoundedStream::new(2);

        for i in 0..7 {
            stream.push(i as f64);
        }

        assert_eq!(stream.arrivals(), 7);
        assert_eq!(stream.evicted(), 5);
        // Arrival index of position 0 is the eviction count
        assert_eq!(stream.get(0), Some(stream.evicted() as f64));
    }

    #[test]
    fn test_get_out_of_range() {
        let mut stream = BoundedStream::new(4);
        stream.push(1.0);

        assert_eq!(stream.get(1), None);
        assert_eq!(stream.get(100), None);
    }

    #[test]
    fn test_clear() {
        let mut stream = BoundedStream::new(2);
        stream.push(1.0);
        stream.push(2.0);
        stream.push(3.0);

        stream.clear();

        assert!(stream.is_empty());
        assert_eq!(stream.evicted(), 0);
        assert_eq!(stream.arrivals(), 0);
        assert_eq!(stream.capacity(), 2);
    }

    #[test]
    #[should_panic(expected = "capacity must be positive")]
    fn test_zero_capacity_panics() {
        BoundedStream::new(0);
    }
}
