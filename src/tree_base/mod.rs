pub mod comparator;
pub mod iter;
mod node;
pub mod tree;
pub mod tree_stats;
pub mod verify;

pub use self::{
    comparator::{Comparator, Natural, Reverse},
    iter::Iter,
    node::Order,
    tree::{Rejected, Tree},
    tree_stats::TreeStats,
    verify::Defects,
};

pub type DefaultTree<T> = Tree<T, Natural>;
