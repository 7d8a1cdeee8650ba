use std::{
    cmp::Ordering,
    fmt::{self, Debug},
    mem,
    ops::ControlFlow,
};

use super::{
    comparator::{Comparator, Natural},
    iter::Iter,
    node::{Added, Node, Order},
    tree_stats::TreeStats,
    verify::{self, Defects},
};

/// A duplicate turned away by [`Tree::try_add`].
///
/// `resident` is the item already in the tree. It may be changed in place as
/// long as it keeps comparing equal to `item`.
#[derive(Debug, PartialEq, Eq)]
pub struct Rejected<'a, T> {
    pub item: T,
    pub resident: &'a mut T,
}

/// An ordered set of items kept in a 2-3-4 tree.
///
/// Items are placed by the tree's [`Comparator`], which is fixed when the
/// tree is built. The tree moves the items it is handed and hands them back
/// on removal; to keep ownership elsewhere store references or `Rc`s.
///
/// The tree is not synchronized. Share it across threads behind a lock.
#[derive(Clone)]
pub struct Tree<T, C = Natural> {
    root_: Node<T>,
    size_: usize,
    comparator: C,
}

impl<T: Ord> Tree<T> {
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T, C: Comparator<T> + Default> Default for Tree<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C: Comparator<T>> Tree<T, C> {
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root_: Node::Empty,
            size_: 0,
            comparator,
        }
    }

    /// Builds a tree from the contents of `source`, leaving `source` empty
    /// with the same comparator. No node is copied.
    pub fn take_guts(source: &mut Self) -> Self
    where
        C: Clone,
    {
        log::debug!("Tree::take_guts of {} items", source.size_);
        Self {
            root_: mem::take(&mut source.root_),
            size_: mem::replace(&mut source.size_, 0),
            comparator: source.comparator.clone(),
        }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }
}

/// Access functions to the item count
impl<T, C> Tree<T, C> {
    #[inline]
    pub fn len(&self) -> usize {
        self.size_
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size_ == 0
    }

    pub fn clear(&mut self) {
        self.root_ = Node::Empty;
        self.size_ = 0;
    }

    /// Number of levels along the leftmost path. While no removal has
    /// unbalanced the tree this is the length of every root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut node = &self.root_;
        if node.is_empty() {
            return 0;
        }
        let mut levels = 1;
        while let Some(child) = node.child(0) {
            node = child;
            levels += 1;
        }
        levels
    }

    pub fn stats(&self) -> TreeStats {
        TreeStats::collect(&self.root_)
    }
}

/// Lookup
impl<T, C: Comparator<T>> Tree<T, C> {
    pub fn find(&self, key: &T) -> Option<&T> {
        self.find_by(|item| self.comparator.compare(key, item))
    }

    /// Looks up an item with a probe instead of a full key. `probe` orders the
    /// sought key against the item it is given, and must agree with the
    /// tree's comparator.
    pub fn find_by<P>(&self, probe: P) -> Option<&T>
    where
        P: Fn(&T) -> Ordering,
    {
        log::trace!("Tree::find_by on tree size {}", self.size_);
        self.root_.find_by(&probe)
    }

    pub fn contains(&self, key: &T) -> bool {
        self.find(key).is_some()
    }

    pub fn find_min(&self) -> Option<&T> {
        let mut node = &self.root_;
        let mut min = None;
        while let Some((item, child)) = node.go_left() {
            min = Some(item);
            match child {
                Some(child) => node = child,
                None => break,
            }
        }
        min
    }

    pub fn find_max(&self) -> Option<&T> {
        let mut node = &self.root_;
        let mut max = None;
        while let Some((item, child)) = node.go_right() {
            max = Some(item);
            match child {
                Some(child) => node = child,
                None => break,
            }
        }
        max
    }

    /// Item at `index` in sorted order. This walks the tree and costs O(n).
    pub fn peek(&self, index: usize) -> Option<&T> {
        if index >= self.size_ {
            return None;
        }
        let mut remaining = index;
        let mut found = None;
        self.apply(Order::InOrder, |item| {
            if remaining == 0 {
                found = Some(item);
                return ControlFlow::Break(());
            }
            remaining -= 1;
            ControlFlow::Continue(())
        });
        found
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root_, self.size_)
    }

    /// Visits every item in `order` until `visit` breaks. Returns `true` when
    /// the walk ran to completion.
    pub fn apply<'a, F>(&'a self, order: Order, mut visit: F) -> bool
    where
        F: FnMut(&'a T) -> ControlFlow<()>,
    {
        self.root_.apply(order, &mut visit).is_continue()
    }

    pub fn verify(&self) -> Defects {
        verify::verify(&self.root_, self.size_, &self.comparator)
    }
}

/// Insertion
impl<T, C: Comparator<T>> Tree<T, C> {
    /// Inserts `item`. Returns `false`, leaving the tree untouched, when an
    /// equal item is already present.
    pub fn add(&mut self, item: T) -> bool {
        self.insert_start(item).is_ok()
    }

    /// Like [`add`](Self::add), but on a duplicate hands back the rejected
    /// item together with the resident one it collided with.
    pub fn try_add(&mut self, item: T) -> Result<(), Rejected<'_, T>> {
        let item = match self.insert_start(item) {
            Ok(()) => return Ok(()),
            Err(item) => item,
        };
        let Self {
            root_, comparator, ..
        } = self;
        let resident = root_.find_mut_by(&|resident: &T| comparator.compare(&item, resident));
        match resident {
            Some(resident) => Err(Rejected { item, resident }),
            None => unreachable!("rejected item has no resident twin"),
        }
    }

    /// Start the insertion descent at the root and grow a new root when the
    /// old one splits.
    fn insert_start(&mut self, item: T) -> Result<(), T> {
        log::trace!("Tree::insert_start on tree size {}", self.size_);
        match self.root_.add(&self.comparator, item) {
            Added::Fitted => {}
            Added::Found(item) => return Err(item),
            Added::Split { orphan, right } => {
                let left = mem::take(&mut self.root_);
                self.root_ = Node::One(orphan, [Some(Box::new(left)), Some(right)]);
                log::debug!("Tree::insert_start: root split, height now {}", self.height());
            }
        }
        self.size_ += 1;
        Ok(())
    }
}

/// Removal
impl<T, C: Comparator<T>> Tree<T, C> {
    /// Removes the item equal to `key` and hands it back.
    pub fn rm(&mut self, key: &T) -> Option<T> {
        let Self {
            root_,
            size_,
            comparator,
        } = self;
        Self::rm_start(root_, size_, &|item: &T| comparator.compare(key, item))
    }

    /// Removes the item `probe` settles on, see [`find_by`](Self::find_by).
    pub fn rm_by<P>(&mut self, probe: P) -> Option<T>
    where
        P: Fn(&T) -> Ordering,
    {
        Self::rm_start(&mut self.root_, &mut self.size_, &probe)
    }

    /// Start the removal descent at the root. A one-item root with at most
    /// one child that loses its item is replaced by that child, and the tree
    /// gets one level shorter.
    fn rm_start<P>(root: &mut Node<T>, size: &mut usize, probe: &P) -> Option<T>
    where
        P: Fn(&T) -> Ordering,
    {
        let collapses = matches!(root.items(), [item] if probe(item) == Ordering::Equal)
            && root.links().iter().flatten().count() < 2;

        let removed = root.rm_by(probe)?;
        *size -= 1;
        log::trace!("Tree::rm_start: tree size now {}", size);
        if root.is_empty() {
            log::debug!("Tree::rm_start: root collapsed to an empty node");
        } else if collapses {
            log::debug!(
                "Tree::rm_start: root collapsed into its {} child, one level shorter",
                root.shape()
            );
        }
        Some(removed)
    }

    /// Rebuilds the tree from scratch by re-inserting every item. Removals
    /// never rebalance, so after a burst of them this restores a tree whose
    /// leaves all sit at the same depth. Costs O(n log n).
    pub fn rebalance(&mut self) {
        let before = self.stats();
        let old = mem::take(&mut self.root_);
        self.size_ = 0;
        old.unload(&mut |item: T| {
            let inserted = self.insert_start(item);
            debug_assert!(inserted.is_ok());
        });
        log::debug!(
            "Tree::rebalance: {} items, paths {}..={} before, height {} after",
            self.size_,
            before.shortest_path,
            before.longest_path,
            self.height()
        );
    }
}

impl<T, C: Comparator<T>> Extend<T> for Tree<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T, C: Comparator<T> + Default> FromIterator<T> for Tree<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<'a, T, C: Comparator<T>> IntoIterator for &'a Tree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two trees are equal when they hold equal items, whatever their shape.
impl<T: PartialEq, C: Comparator<T>> PartialEq for Tree<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.size_ == other.size_
            && self.apply(Order::InOrder, |item| match other.find(item) {
                Some(found) if found == item => ControlFlow::Continue(()),
                _ => ControlFlow::Break(()),
            })
    }
}

impl<T: Eq, C: Comparator<T>> Eq for Tree<T, C> {}

/// Debug
impl<T: Debug, C> Tree<T, C> {
    fn print_node(f: &mut fmt::Formatter<'_>, node: &Node<T>, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            write!(f, "  ")?;
        }
        writeln!(f, "{} {:?}", node.shape(), node.items())?;

        for child in node.links().iter().flatten() {
            Self::print_node(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl<T: Debug, C> Debug for Tree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tree size {} height {}", self.size_, self.height())?;
        Self::print_node(f, &self.root_, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree_base::comparator::Reverse;

    #[test]
    fn root_splits_into_one_item_node() {
        let mut tree = Tree::new();
        for i in 1..=3 {
            assert!(tree.add(i));
        }
        assert_eq!(tree.height(), 1);
        assert!(tree.add(4));
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.root_.items(), &[2]);
        assert!(tree.verify().is_sound());
    }

    #[test]
    fn removal_collapses_root() {
        let mut tree: Tree<i32> = (1..=4).collect();
        for i in 1..=4 {
            assert_eq!(tree.rm(&i), Some(i));
        }
        assert!(tree.root_.is_empty());
        assert_eq!(tree.height(), 0);
        assert!(tree.verify().is_sound());
    }

    #[test]
    fn one_item_root_collapses_into_its_child() {
        let mut tree: Tree<i32> = (1..=4).collect();
        assert_eq!(tree.rm(&1), Some(1));
        assert_eq!(tree.root_.items(), &[2]);
        assert_eq!(tree.root_.links().iter().flatten().count(), 1);

        assert_eq!(tree.rm(&2), Some(2));
        assert_eq!(tree.root_.items(), &[3, 4]);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.len(), 2);
        assert!(tree.verify().is_sound());
    }

    #[test]
    fn reverse_comparator_flips_order() {
        let mut tree = Tree::with_comparator(Reverse(Natural));
        tree.extend([3, 1, 2, 5, 4]);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![5, 4, 3, 2, 1]);
        assert_eq!(tree.find_min(), Some(&5));
        assert_eq!(tree.find_max(), Some(&1));
    }

    #[test]
    fn debug_prints_every_node() {
        let tree: Tree<i32> = (1..=4).collect();
        let printed = format!("{:?}", tree);
        assert_eq!(printed, "tree size 4 height 2\none [2]\n  one [1]\n  two [3, 4]\n");
    }
}
