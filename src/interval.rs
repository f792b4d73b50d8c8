use std::{
    cmp::Ordering,
    fmt::{self, Debug, Display},
    ops::RangeInclusive,
};

use crate::Error;

/// A closed interval `[low, high]`.
///
/// An [`Interval`] is validated on construction (`low <= high`) and is
/// immutable afterwards.
///
/// Two orderings are defined over intervals and they are deliberately kept
/// apart:
///
/// * [`Interval::cmp_low`] orders by the lower bound alone. This is the key the
///   treap is sorted by and is used to place and locate nodes.
/// * [`Interval::cmp_overlap`] is a three-way comparison that treats any two
///   overlapping (or touching) intervals as equal. It is used to locate the
///   node to remove.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Interval<R> {
    low: R,
    high: R,
}

impl<R> Interval<R> {
    /// Construct a new [`Interval`], returning [`Error::InvertedInterval`] if
    /// `low > high`.
    ///
    /// ```
    /// use intreap::Interval;
    ///
    /// assert!(Interval::new(1, 4).is_ok());
    /// assert!(Interval::new(4, 4).is_ok());
    /// assert!(Interval::new(5, 4).is_err());
    /// ```
    pub fn new(low: R, high: R) -> Result<Self, Error>
    where
        R: PartialOrd + Debug,
    {
        if low > high {
            return Err(Error::InvertedInterval {
                low: format!("{low:?}"),
                high: format!("{high:?}"),
            });
        }

        Ok(Self { low, high })
    }

    /// The inclusive lower bound.
    pub fn low(&self) -> &R {
        &self.low
    }

    /// The inclusive upper bound.
    pub fn high(&self) -> &R {
        &self.high
    }

    /// Explode this [`Interval`] into its `(low, high)` bounds.
    pub fn into_inner(self) -> (R, R) {
        (self.low, self.high)
    }

    /// Order `self` and `other` by their lower bounds only.
    pub fn cmp_low(&self, other: &Self) -> Ordering
    where
        R: Ord,
    {
        self.low.cmp(&other.low)
    }

    /// Three-way overlap comparison.
    ///
    /// ```text
    ///   Less:       |---self---|
    ///                             |---other---|
    ///
    ///   Equal:        |---either---|
    ///                    |---either----|
    ///
    ///   Greater:                  |---self---|
    ///               |---other---|
    /// ```
    ///
    /// Intervals sharing an endpoint are [`Ordering::Equal`].
    pub fn cmp_overlap(&self, other: &Self) -> Ordering
    where
        R: Ord,
    {
        if self.high < other.low {
            Ordering::Less
        } else if self.low > other.high {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Returns true if this (stored) interval is reported as overlapping
    /// `query`.
    ///
    /// The predicate is:
    ///
    /// ```text
    ///   (self.low < query.low && self.high > query.low)
    ///     || (self.low > query.low && self.low < query.high)
    /// ```
    ///
    /// This is not symmetric and does not match the usual closed-interval
    /// overlap test: an interval starting at exactly `query.low` never
    /// matches, and neither does one that only touches an endpoint of
    /// `query`.
    ///
    /// ```
    /// use intreap::Interval;
    ///
    /// let query = Interval::new(9, 21).unwrap();
    ///
    /// assert!(Interval::new(5, 10).unwrap().overlaps(&query));
    /// assert!(Interval::new(20, 25).unwrap().overlaps(&query));
    ///
    /// // Same lower bound.
    /// assert!(!Interval::new(9, 12).unwrap().overlaps(&query));
    /// // Touching at query.high.
    /// assert!(!Interval::new(21, 30).unwrap().overlaps(&query));
    /// ```
    pub fn overlaps(&self, query: &Self) -> bool
    where
        R: Ord,
    {
        (self.low < query.low && self.high > query.low)
            || (self.low > query.low && self.low < query.high)
    }
}

impl<R> TryFrom<RangeInclusive<R>> for Interval<R>
where
    R: PartialOrd + Debug,
{
    type Error = Error;

    fn try_from(value: RangeInclusive<R>) -> Result<Self, Self::Error> {
        let (low, high) = value.into_inner();
        Self::new(low, high)
    }
}

impl<R> TryFrom<(R, R)> for Interval<R>
where
    R: PartialOrd + Debug,
{
    type Error = Error;

    fn try_from((low, high): (R, R)) -> Result<Self, Self::Error> {
        Self::new(low, high)
    }
}

impl<R> Display for Interval<R>
where
    R: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

#[cfg(feature = "serde")]
impl<R> serde::Serialize for Interval<R>
where
    R: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&(&self.low, &self.high), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, R> serde::Deserialize<'de> for Interval<R>
where
    R: serde::Deserialize<'de> + PartialOrd + Debug,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (low, high) = <(R, R) as serde::Deserialize<'de>>::deserialize(deserializer)?;
        Self::new(low, high).map_err(serde::de::Error::custom)
    }
}
