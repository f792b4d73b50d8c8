use std::{collections::VecDeque, fmt::Display};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    interval::Interval,
    iter::{IntoIter, Iter, OverlapsPruner, PruningIter},
    node::{remove_recurse, Node},
};

/// A randomised treap of closed intervals, augmented with the maximum upper
/// bound of every subtree.
///
/// Intervals are ordered by their lower bound ([`Interval::cmp_low()`]); at
/// most one interval per lower bound is stored. Each node is assigned a random
/// priority from the injected [`Rng`] `G` when it is created, and the tree is
/// kept in max-heap order over those priorities, giving an expected height of
/// O(log n) regardless of insertion order.
///
/// ```
/// use intreap::{Interval, IntervalTreap};
///
/// let mut t = IntervalTreap::with_seed(42);
///
/// for (low, high) in [(5, 10), (11, 15), (20, 25), (0, 1), (3, 4)] {
///     t.insert(Interval::new(low, high).unwrap());
/// }
///
/// let mut got = t.find_overlapping(&Interval::new(9, 21).unwrap());
/// got.sort_by(|a, b| a.cmp_low(b));
///
/// assert_eq!(
///     got,
///     [(5, 10), (11, 15), (20, 25)].map(|(l, h)| Interval::new(l, h).unwrap())
/// );
/// ```
#[derive(Debug, Clone)]
pub struct IntervalTreap<R, G = StdRng> {
    root: Option<Box<Node<R>>>,
    len: usize,

    rng: G,
    priority_bound: Option<u32>,
}

impl<R> Default for IntervalTreap<R, StdRng> {
    /// An empty treap drawing priorities from a [`StdRng`] seeded by the
    /// operating system.
    fn default() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R> IntervalTreap<R, StdRng> {
    /// Construct an empty treap drawing priorities from a [`StdRng`] seeded
    /// with `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R, G> IntervalTreap<R, G> {
    /// Construct an empty treap drawing full-width `u32` priorities from
    /// `rng`.
    pub fn new(rng: G) -> Self {
        Self::from_parts(rng, None)
    }

    pub(crate) fn from_parts(rng: G, priority_bound: Option<u32>) -> Self {
        Self {
            root: None,
            len: 0,
            rng,
            priority_bound,
        }
    }

    /// The number of intervals in the treap.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the treap holds no intervals.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove all intervals, keeping the priority source.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// The number of levels in the tree: 0 for an empty treap, 1 for a single
    /// interval.
    pub fn height(&self) -> usize {
        fn depth<R>(n: Option<&Node<R>>) -> usize {
            n.map(|v| 1 + depth(v.left()).max(depth(v.right())))
                .unwrap_or_default()
        }

        depth(self.root.as_deref())
    }

    /// Iterate over all intervals in ascending lower bound order.
    pub fn iter(&self) -> Iter<'_, R> {
        Iter::new(self.root.as_deref())
    }

    /// The interval with the smallest lower bound, or [`None`] if the treap is
    /// empty.
    pub fn first(&self) -> Option<&Interval<R>> {
        let mut n = self.root.as_deref()?;
        while let Some(v) = n.left() {
            n = v;
        }
        Some(n.interval())
    }

    /// Return the treap in level order: one layer per tree depth, root first,
    /// each node given as `(subtree max, interval)`, left to right.
    ///
    /// The layout depends on the priorities drawn for each node, so this is
    /// only stable for a seeded or injected [`Rng`].
    pub fn levels(&self) -> Vec<Vec<(&R, &Interval<R>)>> {
        let mut levels = vec![];

        let mut queue = VecDeque::new();
        queue.extend(self.root.as_deref());

        while !queue.is_empty() {
            let mut level = Vec::with_capacity(queue.len());
            for _ in 0..queue.len() {
                let Some(n) = queue.pop_front() else {
                    break;
                };
                level.push((n.subtree_max(), n.interval()));
                queue.extend(n.left());
                queue.extend(n.right());
            }
            levels.push(level);
        }

        levels
    }

    /// Render [`IntervalTreap::levels()`] as text, one line per level, each
    /// entry formatted as `max=<subtree max> <interval>`.
    ///
    /// The output is intended for debugging and the format is not stable.
    pub fn dump(&self) -> String
    where
        R: Display,
    {
        self.levels()
            .into_iter()
            .map(|level| {
                level
                    .into_iter()
                    .map(|(max, interval)| format!("max={max} {interval}"))
                    .collect::<Vec<_>>()
                    .join("    ")
            })
            .fold(String::new(), |mut buf, line| {
                buf.push_str(&line);
                buf.push('\n');
                buf
            })
    }

    /// Render the treap as a Graphviz digraph.
    pub fn to_dot(&self) -> String
    where
        R: Display,
    {
        crate::dot::print_dot(self.root.as_deref())
    }
}

impl<R, G> IntervalTreap<R, G>
where
    R: Ord,
{
    /// Returns true if an interval with the same lower bound as `interval` is
    /// stored, regardless of its upper bound.
    ///
    /// ```
    /// use intreap::{Interval, IntervalTreap};
    ///
    /// let mut t = IntervalTreap::with_seed(1);
    /// t.insert(Interval::new(5, 10).unwrap());
    ///
    /// assert!(t.contains(&Interval::new(5, 6).unwrap()));
    /// assert!(!t.contains(&Interval::new(6, 10).unwrap()));
    /// ```
    pub fn contains(&self, interval: &Interval<R>) -> bool {
        self.get_low(interval).is_some()
    }

    /// Return the stored interval exactly equal to `interval` (both bounds),
    /// if any.
    pub fn get_exact(&self, interval: &Interval<R>) -> Option<&Interval<R>> {
        self.get_low(interval).filter(|v| *v == interval)
    }

    /// Point lookup keyed on the lower bound.
    fn get_low(&self, interval: &Interval<R>) -> Option<&Interval<R>> {
        let mut ptr = self.root.as_deref();

        while let Some(n) = ptr {
            ptr = match interval.cmp_low(n.interval()) {
                std::cmp::Ordering::Less => n.left(),
                std::cmp::Ordering::Equal => return Some(n.interval()),
                std::cmp::Ordering::Greater => n.right(),
            };
        }

        None
    }

    /// Return every stored interval that [`Interval::overlaps()`] `query`, in
    /// no particular order.
    ///
    /// This inspects every node in the treap. [`IntervalTreap::overlaps()`]
    /// yields the same set of intervals in O(log n + k) expected time.
    pub fn find_overlapping(&self, query: &Interval<R>) -> Vec<Interval<R>>
    where
        R: Clone,
    {
        self.iter()
            .filter(|v| v.overlaps(query))
            .cloned()
            .collect()
    }

    /// Iterate over the stored intervals that [`Interval::overlaps()`]
    /// `query`, in ascending lower bound order.
    ///
    /// Subtrees whose maximum upper bound is not above `query.low`, and nodes
    /// (with their right subtrees) whose lower bound is not below
    /// `query.high`, are never visited.
    pub fn overlaps<'a>(
        &'a self,
        query: &'a Interval<R>,
    ) -> impl Iterator<Item = &'a Interval<R>> + 'a {
        PruningIter::new(self.root.as_deref(), query, OverlapsPruner)
    }

    /// Remove one stored interval that overlaps or touches `interval` (as
    /// determined by [`Interval::cmp_overlap()`]), returning it.
    ///
    /// The node removed is the first overlap-equal node found descending from
    /// the root, which need not be an exact match for `interval`. Returns
    /// [`None`] and leaves the treap unchanged if no stored interval overlaps.
    ///
    /// ```
    /// use intreap::{Interval, IntervalTreap};
    ///
    /// let mut t = IntervalTreap::with_seed(1);
    /// t.insert(Interval::new(5, 10).unwrap());
    ///
    /// assert_eq!(t.remove(&Interval::new(11, 12).unwrap()), None);
    /// assert_eq!(
    ///     t.remove(&Interval::new(10, 12).unwrap()),
    ///     Some(Interval::new(5, 10).unwrap())
    /// );
    /// assert!(t.is_empty());
    /// ```
    pub fn remove(&mut self, interval: &Interval<R>) -> Option<Interval<R>>
    where
        R: Clone,
    {
        let removed = remove_recurse(&mut self.root, interval)?;
        self.len -= 1;
        log::trace!("removed interval, {} remaining", self.len);
        Some(removed)
    }
}

impl<R, G> IntervalTreap<R, G>
where
    R: Ord + Clone,
    G: Rng,
{
    /// Insert `interval`, returning true if it was added.
    ///
    /// If an interval with the same lower bound is already stored the treap is
    /// left unchanged (the stored interval is kept, no priority is drawn) and
    /// false is returned.
    pub fn insert(&mut self, interval: Interval<R>) -> bool {
        let Self {
            root,
            rng,
            priority_bound,
            ..
        } = self;

        let mut draw = || match *priority_bound {
            Some(bound) => rng.random_range(0..bound),
            None => rng.random(),
        };

        let inserted = match root {
            Some(v) => v.insert(interval, &mut draw),
            None => {
                *root = Some(Box::new(Node::new(interval, draw())));
                true
            }
        };

        if inserted {
            self.len += 1;
        } else {
            log::trace!("ignoring insert of duplicate lower bound");
        }

        inserted
    }
}

impl<R, G> Extend<Interval<R>> for IntervalTreap<R, G>
where
    R: Ord + Clone,
    G: Rng,
{
    fn extend<T: IntoIterator<Item = Interval<R>>>(&mut self, iter: T) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl<R, G> IntoIterator for IntervalTreap<R, G> {
    type Item = Interval<R>;
    type IntoIter = IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.root)
    }
}

impl<'a, R, G> IntoIterator for &'a IntervalTreap<R, G> {
    type Item = &'a Interval<R>;
    type IntoIter = Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
impl<R, G> IntervalTreap<R, G>
where
    R: Ord + Clone + std::fmt::Debug,
{
    /// Assert the BST, heap and subtree max invariants hold and the tracked
    /// length matches the node count.
    pub(crate) fn validate(&self) {
        let n_nodes = crate::test_utils::validate_subtree(self.root.as_deref());
        assert_eq!(n_nodes, self.len, "tracked length does not match tree");
    }

    pub(crate) fn priorities(&self) -> impl Iterator<Item = u32> + '_ {
        let mut stack = Vec::from_iter(self.root.as_deref());
        std::iter::from_fn(move || {
            let n = stack.pop()?;
            stack.extend(n.left());
            stack.extend(n.right());
            Some(n.priority())
        })
    }
}
