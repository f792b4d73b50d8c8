use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{Error, IntervalTreap};

/// Construction-time configuration of an [`IntervalTreap`].
///
/// ```
/// use intreap::{Builder, Interval};
///
/// let mut t = Builder::new()
///     .seed(42)
///     .priority_bound(1_000)
///     .build()
///     .unwrap();
///
/// t.insert(Interval::new(5, 10).unwrap());
/// assert_eq!(t.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    seed: Option<u64>,
    priority_bound: Option<u32>,
}

impl Builder {
    /// A [`Builder`] for a treap with full-width priorities drawn from an
    /// operating system seeded [`StdRng`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the default [`StdRng`] priority source, making the shape of the
    /// tree reproducible for a given sequence of operations.
    ///
    /// Ignored by [`Builder::build_with_rng()`].
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Draw node priorities uniformly from `0..bound` instead of the full
    /// `u32` range.
    ///
    /// Small bounds make priority ties likely; ties never cause a rotation,
    /// so the heap order still holds but balance degrades.
    pub fn priority_bound(mut self, bound: u32) -> Self {
        self.priority_bound = Some(bound);
        self
    }

    /// Build an empty [`IntervalTreap`] drawing priorities from a [`StdRng`],
    /// seeded from [`Builder::seed()`] if set, or from the operating system
    /// otherwise.
    pub fn build<R>(self) -> Result<IntervalTreap<R, StdRng>, Error> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.build_with_rng(rng)
    }

    /// Build an empty [`IntervalTreap`] drawing priorities from `rng`.
    pub fn build_with_rng<R, G>(self, rng: G) -> Result<IntervalTreap<R, G>, Error>
    where
        G: Rng,
    {
        if self.priority_bound == Some(0) {
            return Err(Error::ZeroPriorityBound);
        }

        log::debug!(
            "building interval treap (seed={:?}, priority_bound={:?})",
            self.seed,
            self.priority_bound
        );

        Ok(IntervalTreap::from_parts(rng, self.priority_bound))
    }
}
