use thiserror::Error;

/// Errors reported by `CanonicalIntervalMap` and `Interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The interval `[begin, end)` is empty, i.e. `begin >= end`.
    #[error("invalid range: begin must be strictly less than end")]
    InvalidRange,
    /// The first breakpoint is not the minimum key.
    #[error("breakpoints must start at the minimum key")]
    MissingMinimum,
    /// Breakpoint keys are not strictly increasing.
    #[error("breakpoint keys must be strictly increasing")]
    Unordered,
    /// Two adjacent breakpoints hold equal values.
    #[error("adjacent breakpoints must hold different values")]
    NotCanonical,
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
