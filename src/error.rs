use thiserror::Error;

/// Errors returned when constructing an [`Interval`] or an
/// [`IntervalTreap`].
///
/// [`Interval`]: crate::Interval
/// [`IntervalTreap`]: crate::IntervalTreap
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The interval lower bound is greater than the upper bound.
    #[error("inverted interval: low bound {low} exceeds high bound {high}")]
    InvertedInterval { low: String, high: String },

    /// A priority bound of 0 leaves no priority values to draw from.
    #[error("priority bound must be non-zero")]
    ZeroPriorityBound,
}
