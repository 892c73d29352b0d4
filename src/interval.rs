//! The `Interval` assigned into `CanonicalIntervalMap`, representing [low, high)
//!
//! Intervals are only used on the write side: a lookup always answers with the
//! breakpoints around a key, never with a stored `Interval`.
//!
//! Currently, only half-open intervals are supported, i.e., [...,...).

use crate::error::{Error, Result};

/// The interval assigned into `CanonicalIntervalMap` represents [low, high)
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct Interval<T> {
    /// Low value
    pub low: T,
    /// high value
    pub high: T,
}

impl<T: Ord> Interval<T> {
    /// Create a new `Interval`
    ///
    /// # Panics
    ///
    /// This method panics when low >= high
    #[inline]
    pub fn new(low: T, high: T) -> Self {
        assert!(low < high, "invalid range");
        Self { low, high }
    }

    /// Create a new `Interval`, returning `Error::InvalidRange` when low >= high
    ///
    /// # Example
    /// ```rust
    /// use canonical_interval_map::{Error, Interval};
    ///
    /// assert!(Interval::try_new(1, 2).is_ok());
    /// assert_eq!(Interval::try_new(2, 2), Err(Error::InvalidRange));
    /// ```
    #[inline]
    pub fn try_new(low: T, high: T) -> Result<Self> {
        if low < high {
            Ok(Self { low, high })
        } else {
            Err(Error::InvalidRange)
        }
    }
}
