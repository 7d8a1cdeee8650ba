use std::iter::FusedIterator;

use super::node::Node;

/// Borrowing in-order iterator over a [`Tree`](super::tree::Tree).
///
/// Keeps the path from the root to the current node, each entry paired with
/// the slot of the next item to yield from that node.
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
    stack: Vec<(&'a Node<T>, usize)>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: &'a Node<T>, size: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: size,
        };
        iter.descend(root);
        iter
    }

    /// Pushes `node` and its chain of leftmost descendants.
    fn descend(&mut self, mut node: &'a Node<T>) {
        loop {
            self.stack.push((node, 0));
            match node.child(0) {
                Some(child) => node = child,
                None => break,
            }
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            let node = top.0;
            let slot = top.1;
            if let Some(item) = node.items().get(slot) {
                top.1 += 1;
                if let Some(child) = node.child(slot + 1) {
                    self.descend(child);
                }
                self.remaining = self.remaining.saturating_sub(1);
                return Some(item);
            }
            self.stack.pop();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::tree_base::tree::Tree;

    #[test]
    fn walks_in_sorted_order() {
        let tree: Tree<u32> = [50, 10, 40, 20, 30, 60, 70, 80, 5].into_iter().collect();
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 9);
        assert_eq!(iter.next(), Some(&5));
        assert_eq!(iter.len(), 8);
        assert_eq!(
            iter.copied().collect::<Vec<_>>(),
            vec![10, 20, 30, 40, 50, 60, 70, 80]
        );
    }

    #[test]
    fn empty_tree_yields_nothing() {
        let tree: Tree<u32> = Tree::new();
        let mut iter = tree.iter();
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn survives_removals_that_leave_gaps() {
        let mut tree: Tree<u32> = (0..64).collect();
        for i in (0..64).filter(|i| i % 3 != 0) {
            assert_eq!(tree.rm(&i), Some(i));
        }
        let expected: Vec<u32> = (0..64).filter(|i| i % 3 == 0).collect();
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), expected);
        assert_eq!(tree.iter().len(), expected.len());
    }
}
