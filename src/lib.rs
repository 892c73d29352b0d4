//! `canonical_interval_map` is a thread-safe map from half-open key intervals to values.
//!
//! The whole key space is always covered: keys that were never assigned hold the
//! default value given at construction. Internally the map is an ordered table of
//! breakpoints, where each breakpoint holds its value up to the next one. After every
//! write neighbouring breakpoints with equal values are merged, so the table is the
//! unique minimal representation of the current mapping.
//!
//! Every operation runs under one exclusive lock, and lookups return owned copies
//! (or an `Arc` snapshot) instead of references into the map.
//!
//! # Example
//!
//! ```rust
//! use canonical_interval_map::CanonicalIntervalMap;
//!
//! let map = CanonicalIntervalMap::new('d');
//! map.insert(0, i64::MAX, 'a');
//! map.insert(5, i64::MAX, 'b');
//! assert_eq!(map.lookup(&3), 'a');
//! assert_eq!(map.lookup(&-2), 'd');
//! assert_eq!(map.begin_point(&2), 0);
//! assert_eq!(map.end_point(&2), 5);
//! ```
//!

mod breakpoints;
mod error;
mod interval;
mod intervalmap;


pub use error::{Error, Result};
pub use interval::Interval;
pub use intervalmap::CanonicalIntervalMap;
