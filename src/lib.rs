//! An ordered 2-3-4 tree.
//!
//! [`Tree`] keeps caller-supplied items sorted by a [`Comparator`] fixed at
//! construction. Every node holds one to three items, an insertion into a
//! full node splits it and hands the median to the parent, and the tree only
//! grows taller when the root itself splits. Removal never rebalances;
//! [`Tree::rebalance`] rebuilds the tree on request.
//!
//! [`TreeMap`](tree_map::TreeMap) is a key/value map built on top of it.

pub mod tree_base;
pub mod tree_map;

pub use tree_base::{Comparator, Defects, Natural, Order, Rejected, Reverse, Tree, TreeStats};
