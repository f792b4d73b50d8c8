use crate::{interval::Interval, node::Node};

/// An iterator of owned [`Interval`] instances as the underlying treap
/// `into_iter()` impl, yielded in ascending lower bound order.
#[derive(Debug)]
pub struct IntoIter<R> {
    stack: Vec<Box<Node<R>>>,
}

impl<R> IntoIter<R> {
    pub(crate) fn new(root: Option<Box<Node<R>>>) -> Self {
        let mut this = Self { stack: vec![] };

        // Descend down the left side of the tree.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: Box<Node<R>>) {
        let mut ptr = Some(subtree_root);

        while let Some(mut v) = ptr {
            ptr = v.take_left();
            self.stack.push(v);
        }
    }
}

impl<R> Iterator for IntoIter<R> {
    type Item = Interval<R>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut v = self.stack.pop()?;

        // Descend down the left side of the right hand child of this node, if
        // any.
        if let Some(right) = v.take_right() {
            self.push_subtree(right);
        }

        Some(v.into_interval())
    }
}
