//! Bounded sample storage
//!
//! An ordered, append-only store of accepted samples with strict FIFO
//! eviction once a configured capacity is reached, so memory stays bounded
//! under infinite streams.
//!
//! # Example
//!
//! ```
//! use driftwatch::stream::BoundedStream;
//!
//! let mut stream = BoundedStream::new(3);
//!
//! assert_eq!(stream.push(1.0), None);
//! assert_eq!(stream.push(2.0), None);
//! assert_eq!(stream.push(3.0), None);
//!
//! // Capacity reached: the oldest sample is evicted and handed back
//! assert_eq!(stream.push(4.0), Some(1.0));
//! assert_eq!(stream.len(), 3);
//! ```

mod bounded;

pub use bounded::BoundedStream;
