use crate::{interval::Interval, node::Node};

use super::pruning_iter::PruningOracle;

/// Prunes the walk for [`Interval::overlaps()`] matches.
///
/// A stored interval can only match if its upper bound is above `query.low`,
/// and its lower bound is below `query.high`.
#[derive(Debug)]
pub(crate) struct OverlapsPruner;

impl<R> PruningOracle<R> for OverlapsPruner
where
    R: Ord,
{
    fn visit_subtree(&self, subtree_root: &Node<R>, query: &Interval<R>) -> bool {
        subtree_root.subtree_max() > query.low()
    }

    fn visit_right(&self, n: &Node<R>, query: &Interval<R>) -> bool {
        n.interval().low() < query.high()
    }

    fn filter_yield(&self, n: &Node<R>, query: &Interval<R>) -> bool {
        n.interval().overlaps(query)
    }
}
