use std::cmp::Ordering;

use crate::interval::Interval;

#[derive(Debug, Clone)]
pub(crate) struct Node<R> {
    /// Child nodes pointers.
    left: Option<Box<Node<R>>>,
    right: Option<Box<Node<R>>>,

    /// The randomly drawn heap priority of this node.
    ///
    /// Numerically larger priorities sit closer to the root: a node's priority
    /// is always greater than or equal to the priority of both children.
    ///
    /// Drawn once when the node is created and never changed afterwards, even
    /// when the node's interval is overwritten during a removal.
    priority: u32,

    /// The maximum upper bound of all intervals for the subtree rooted at this
    /// [`Node`].
    subtree_max: R,

    interval: Interval<R>,
}

impl<R> Node<R> {
    pub(crate) fn new(interval: Interval<R>, priority: u32) -> Self
    where
        R: Clone,
    {
        Self {
            subtree_max: interval.high().clone(),
            interval,
            priority,
            left: None,
            right: None,
        }
    }

    /// Insert `interval` into the subtree rooted at `self`, drawing a priority
    /// for the new node from `draw`.
    ///
    /// Nodes are placed by their lower bound alone ([`Interval::cmp_low`]). If
    /// an interval with the same lower bound already exists, the subtree is
    /// left unchanged, `draw` is not called and false is returned.
    pub(crate) fn insert<F>(self: &mut Box<Self>, interval: Interval<R>, draw: &mut F) -> bool
    where
        R: Ord + Clone,
        F: FnMut() -> u32,
    {
        let direction = interval.cmp_low(&self.interval);
        let child = match direction {
            Ordering::Less => &mut self.left,
            Ordering::Equal => return false,
            Ordering::Greater => &mut self.right,
        };

        match child {
            Some(v) => {
                if !v.insert(interval, draw) {
                    // The tree structure has not been modified.
                    return false;
                }
            }
            None => *child = Some(Box::new(Self::new(interval, draw()))),
        }

        // The child subtree on the insertion side may now be rooted at a node
        // with a higher priority than self, in which case it is lifted above
        // self to restore the heap order.
        //
        // Rotations recompute the subtree max of both nodes involved.
        match direction {
            Ordering::Less if self.left().is_some_and(|v| v.priority > self.priority) => {
                log::trace!("lifting left child above parent (rotate right)");
                rotate_right(self);
            }
            Ordering::Greater if self.right().is_some_and(|v| v.priority > self.priority) => {
                log::trace!("lifting right child above parent (rotate left)");
                rotate_left(self);
            }
            _ => update_subtree_max(self),
        }

        true
    }

    pub(crate) fn interval(&self) -> &Interval<R> {
        &self.interval
    }

    pub(crate) fn subtree_max(&self) -> &R {
        &self.subtree_max
    }

    pub(crate) fn priority(&self) -> u32 {
        self.priority
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// Remove the left child, if any.
    pub(crate) fn take_left(&mut self) -> Option<Box<Self>> {
        self.left.take()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Remove the right child, if any.
    pub(crate) fn take_right(&mut self) -> Option<Box<Self>> {
        self.right.take()
    }

    /// Consume this [`Node`], returning the [`Interval`] it holds.
    pub(crate) fn into_interval(self) -> Interval<R> {
        self.interval
    }
}

/// Recompute the subtree max of `n` from its own upper bound and the subtree
/// max of its (at most two) children.
///
/// The children must already hold correct values.
pub(crate) fn update_subtree_max<R>(n: &mut Node<R>)
where
    R: Ord + Clone,
{
    let new_max = n
        .left()
        .map(|v| v.subtree_max())
        .max(n.right().map(|v| v.subtree_max()))
        .max(Some(n.interval().high()));

    if let Some(new_max) = new_max {
        n.subtree_max = new_max.clone();
    }
}

/// Remove the node holding an interval that is [`Ordering::Equal`] to `query`
/// under [`Interval::cmp_overlap`] from the subtree rooted at `node`.
///
/// At most one node is removed; the first overlap-equal node found when
/// descending from `node` is the target. Returns the removed [`Interval`], or
/// [`None`] if no such node was found.
///
/// A target with no children, or a single child, is spliced out. A target
/// with two children takes the interval of its in-order successor (keeping its
/// own priority), and the successor node is unlinked from the right subtree.
/// No rotations are performed; the subtree max of every node on the modified
/// path is recomputed on the way back up.
pub(crate) fn remove_recurse<R>(
    node: &mut Option<Box<Node<R>>>,
    query: &Interval<R>,
) -> Option<Interval<R>>
where
    R: Ord + Clone,
{
    let n = node.as_mut()?;

    let child = match query.cmp_overlap(n.interval()) {
        Ordering::Less => &mut n.left,
        Ordering::Greater => &mut n.right,
        Ordering::Equal => {
            if n.left.is_some() && n.right.is_some() {
                // Extract the minimum node in the right subtree and move its
                // interval into this node.
                let successor = extract_subtree_min(&mut n.right)?;
                log::trace!("substituting in-order successor for removed interval");
                let old = std::mem::replace(&mut n.interval, successor);
                update_subtree_max(n);
                return Some(old);
            }

            // Zero or one child: the child (if any) takes the place of "n".
            let old = node.take()?;
            let Node {
                left,
                right,
                interval,
                ..
            } = *old;

            *node = left.or(right);
            return Some(interval);
        }
    };

    let removed = remove_recurse(child, query)?;
    update_subtree_max(n);
    Some(removed)
}

/// Unlink the left-most node of the subtree rooted at `node`, linking its right
/// subtree (if any) in its place, and return the [`Interval`] it held.
///
/// Returns [`None`] if `node` is empty.
fn extract_subtree_min<R>(node: &mut Option<Box<Node<R>>>) -> Option<Interval<R>>
where
    R: Ord + Clone,
{
    let n = node.as_mut()?;

    if n.left.is_some() {
        // Descend left to the end of the left edge.
        let v = extract_subtree_min(&mut n.left);
        update_subtree_max(n);
        return v;
    }

    // "n" is the minimum. It has no left child, so its right subtree (if any)
    // replaces it.
    //
    // ```text
    //                 6
    //                / \
    //    here ->   <4>   7
    //                \
    //                 5
    // ```
    let min = node.take()?;
    let Node {
        right, interval, ..
    } = *min;

    *node = right;
    Some(interval)
}

/// Left rotate the given subtree rooted at `x` around the pivot point `P`.
///
/// ```text
///
///      x
///     / \                               P
///    1   P         Rotate Left        /   \
///       / \      --------------->    x     y
///      2   y                        / \   / \
///         / \                      1   2 3   4
///        3   4
/// ```
///
/// Does nothing if `x` has no right pointer.
fn rotate_left<R>(x: &mut Box<Node<R>>)
where
    R: Ord + Clone,
{
    let Some(mut p) = x.right.take() else {
        return;
    };
    std::mem::swap(x, &mut p);

    p.right = x.left.take();
    update_subtree_max(&mut p);

    x.left = Some(p);
    update_subtree_max(x);
}

/// Right rotate the given subtree rooted at `y` around the pivot point `P`.
///
/// ```text
///          y
///         / \                           P
///        P   4     Rotate Right       /   \
///       / \      --------------->    x     y
///      x   3                        / \   / \
///     / \                          1   2 3   4
///    1   2
/// ```
///
/// Does nothing if `y` has no left pointer.
fn rotate_right<R>(y: &mut Box<Node<R>>)
where
    R: Ord + Clone,
{
    let Some(mut p) = y.left.take() else {
        return;
    };
    std::mem::swap(y, &mut p);

    p.left = y.right.take();
    update_subtree_max(&mut p);

    y.right = Some(p);
    update_subtree_max(y);
}
