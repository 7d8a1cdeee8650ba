use super::node::Node;

/// Structural snapshot of a tree, see [`Tree::stats`](super::tree::Tree::stats).
///
/// A path runs from the root down to a missing link, and its length is the
/// number of nodes on it. All paths have the same length in a balanced tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub size: usize,
    pub ones: usize,
    pub twos: usize,
    pub threes: usize,
    pub leaves: usize,
    /// `Empty` nodes hanging below the root.
    pub stray_empties: usize,
    pub shortest_path: usize,
    pub longest_path: usize,
}

impl TreeStats {
    pub(crate) fn collect<T>(root: &Node<T>) -> Self {
        let mut stats = Self::default();
        if !root.is_empty() {
            stats.shortest_path = usize::MAX;
            stats.visit(root, 1);
        }
        stats
    }

    fn visit<T>(&mut self, node: &Node<T>, depth: usize) {
        self.size += node.items().len();
        match node {
            Node::Empty => self.stray_empties += 1,
            Node::One(..) => self.ones += 1,
            Node::Two(..) => self.twos += 1,
            Node::Three(..) => self.threes += 1,
        }
        if !node.is_empty() && node.links().iter().all(Option::is_none) {
            self.leaves += 1;
        }

        for link in node.links() {
            match link {
                Some(child) => self.visit(child, depth + 1),
                None => {
                    self.shortest_path = self.shortest_path.min(depth);
                    self.longest_path = self.longest_path.max(depth);
                }
            }
        }
    }

    pub fn nodes(&self) -> usize {
        self.ones + self.twos + self.threes + self.stray_empties
    }

    /// Share of item slots in use across all nodes.
    pub fn avgfill(&self) -> f64 {
        if self.nodes() == 0 {
            return 0.0;
        }
        self.size as f64 / (self.nodes() * 3) as f64
    }

    pub fn is_balanced(&self) -> bool {
        self.shortest_path == self.longest_path
    }
}

#[cfg(test)]
#[test]
fn test_tree_stats() {
    use super::tree::Tree;

    let empty: Tree<u8> = Tree::new();
    assert_eq!(empty.stats(), TreeStats::default());
    assert_eq!(empty.stats().avgfill(), 0.0);

    let tree: Tree<u8> = (1..=4).collect();
    let stats = tree.stats();
    assert_eq!(stats.size, 4);
    assert_eq!((stats.ones, stats.twos, stats.threes), (2, 1, 0));
    assert_eq!(stats.leaves, 2);
    assert_eq!((stats.shortest_path, stats.longest_path), (2, 2));
    assert!(stats.is_balanced());
    assert_eq!(stats.avgfill(), 4.0 / 9.0);
}
