//! A randomised treap of closed intervals, augmented for overlap queries.
//!
//! An [`IntervalTreap`] stores [`Interval`] instances ordered by their lower
//! bound, and keeps itself balanced in expectation by assigning each node a
//! random priority drawn from an injected [`rand::Rng`] and maintaining a
//! max-heap over those priorities. Each node caches the maximum upper bound of
//! its subtree, allowing overlap searches to skip subtrees that cannot contain
//! a match.
//!
//! ```
//! use intreap::{Interval, IntervalTreap};
//!
//! // A fixed seed produces the same tree shape on every run.
//! let mut t = IntervalTreap::with_seed(42);
//!
//! t.insert(Interval::new(5, 10).unwrap());
//! t.insert(Interval::new(11, 15).unwrap());
//! t.insert(Interval::new(20, 25).unwrap());
//!
//! let got = t
//!     .overlaps(&Interval::new(9, 21).unwrap())
//!     .map(|v| (*v.low(), *v.high()))
//!     .collect::<Vec<_>>();
//!
//! assert_eq!(got, [(5, 10), (11, 15), (20, 25)]);
//! ```
//!
//! Two distinct comparisons are used: insertion and [`IntervalTreap::contains()`]
//! locate nodes by lower bound alone ([`Interval::cmp_low()`]), while
//! [`IntervalTreap::remove()`] removes the first node that overlaps the
//! argument ([`Interval::cmp_overlap()`]).

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::clone_on_ref_ptr, clippy::todo, clippy::dbg_macro)]

mod builder;
mod dot;
mod error;
mod interval;
mod iter;
mod node;
mod tree;

#[cfg(test)]
mod test_utils;

pub use builder::*;
pub use error::*;
pub use interval::*;
pub use iter::{IntoIter, Iter};
pub use tree::*;
