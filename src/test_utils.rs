use std::{cell::RefCell, fmt::Debug, sync::Once};

use proptest::prelude::*;
use rand::RngCore;

use crate::{interval::Interval, node::Node};

const BOUND_MAX: i64 = 40;

/// Generate arbitrary, valid intervals with bounds from [0..[`BOUND_MAX`]).
///
/// The small value domain encourages overlapping intervals and intervals
/// sharing a lower bound.
pub(crate) fn arbitrary_interval() -> impl Strategy<Value = Interval<i64>> {
    (0..BOUND_MAX, 0..BOUND_MAX)
        .prop_map(|(a, b)| Interval::new(a.min(b), a.max(b)).unwrap())
}

/// Generate a set of pairwise non-overlapping intervals (no shared points),
/// each placed in its own slot of width 10.
pub(crate) fn disjoint_intervals(n: usize) -> impl Strategy<Value = Vec<Interval<i64>>> {
    prop::collection::btree_map(0..(n as i64 * 4), 0_i64..10, 0..n).prop_map(|slots| {
        slots
            .into_iter()
            .map(|(slot, len)| Interval::new(slot * 10, slot * 10 + len).unwrap())
            .collect()
    })
}

/// A [`RngCore`] yielding a fixed sequence of `u32` values, for driving exact
/// priority assignments.
#[derive(Debug, Clone)]
pub(crate) struct ScriptedRng(std::vec::IntoIter<u32>);

impl ScriptedRng {
    pub(crate) fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self(values.into_iter().collect::<Vec<_>>().into_iter())
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next().expect("scripted rng exhausted")
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u32() as u64
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let v = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&v[..chunk.len()]);
        }
    }
}

thread_local! {
    static CAPTURED: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// A [`log::Log`] recording every message into a per-thread buffer, so
/// concurrently running tests see only their own output.
struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        CAPTURED.with(|v| v.borrow_mut().push(record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Call `f`, returning its result and the log messages emitted by this thread
/// while it ran.
pub(crate) fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("logger already installed");
        log::set_max_level(log::LevelFilter::Trace);
    });

    CAPTURED.with(|v| v.borrow_mut().clear());
    let out = f();
    let logs = CAPTURED.with(|v| std::mem::take(&mut *v.borrow_mut()));

    (out, logs)
}

/// Assert the BST, heap and interval tree properties of the subtree rooted at
/// `root`, returning the number of nodes visited.
pub(crate) fn validate_subtree<R>(root: Option<&Node<R>>) -> usize
where
    R: Ord + Debug + Clone,
{
    let root = match root {
        Some(v) => v,
        None => return 0,
    };

    let mut n_nodes = 0;

    // Perform a pre-order traversal of the tree.
    let mut stack = vec![root];
    while let Some(n) = stack.pop() {
        n_nodes += 1;

        // Prepare to visit the children
        stack.extend(n.left().iter().chain(n.right().iter()));

        // Invariant 1: every lower bound in the left subtree is strictly less
        // than this node's lower bound.
        if let Some(max) = subtree_low_bound(n.left(), |a, b| a.max(b)) {
            assert!(
                max < *n.interval().low(),
                "left subtree low {max:?} not below {:?}",
                n.interval()
            );
        }

        // Invariant 2: every lower bound in the right subtree is strictly
        // greater than this node's lower bound.
        if let Some(min) = subtree_low_bound(n.right(), |a, b| a.min(b)) {
            assert!(
                min > *n.interval().low(),
                "right subtree low {min:?} not above {:?}",
                n.interval()
            );
        }

        // Invariant 3: heap order. No child has a greater priority than its
        // parent.
        for child in [n.left(), n.right()].into_iter().flatten() {
            assert!(
                child.priority() <= n.priority(),
                "child {:?} (p={}) above parent {:?} (p={})",
                child.interval(),
                child.priority(),
                n.interval(),
                n.priority(),
            );
        }

        // Invariant 4: the subtree max of "n" is the largest upper bound of
        // any interval in the subtree, recomputed independently of the cached
        // child values.
        let want_max = subtree_high_max(n);
        assert_eq!(
            want_max,
            *n.subtree_max(),
            "subtree max mismatch for node {:?}",
            n.interval()
        );
    }

    n_nodes
}

fn subtree_low_bound<R, F>(n: Option<&Node<R>>, pick: F) -> Option<R>
where
    R: Clone,
    F: Fn(R, R) -> R + Copy,
{
    let n = n?;
    let mut acc = n.interval().low().clone();
    for child in [n.left(), n.right()] {
        if let Some(v) = subtree_low_bound(child, pick) {
            acc = pick(acc, v);
        }
    }
    Some(acc)
}

fn subtree_high_max<R>(n: &Node<R>) -> R
where
    R: Ord + Clone,
{
    [n.left(), n.right()]
        .into_iter()
        .flatten()
        .map(subtree_high_max)
        .fold(n.interval().high().clone(), |acc, v| acc.max(v))
}
