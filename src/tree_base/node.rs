use std::{cmp::Ordering, mem, ops::ControlFlow, slice};

use super::comparator::Comparator;

pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// The order in which [`Tree::apply`](super::tree::Tree::apply) visits items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// Sorted order: left child, item, next child, item, ..., right child.
    InOrder,
    /// Every descendant of a node before the node's own items.
    ChildrenFirst,
    /// A node's own items before any of its descendants.
    ParentFirst,
}

/// A node of the 2-3-4 tree.
///
/// The item count picks the shape, and a node with `k` items always carries
/// `k + 1` links. Links are `None` at the bottom of the tree and, after
/// removals, wherever a subtree ran out of items. `Empty` is only ever the
/// root of an empty tree; a child that drains to `Empty` is unlinked by its
/// parent.
#[derive(Clone, Debug)]
pub(crate) enum Node<T> {
    Empty,
    One(T, [Link<T>; 2]),
    Two([T; 2], [Link<T>; 3]),
    Three([T; 3], [Link<T>; 4]),
}

/// Outcome of adding an item to a subtree.
pub(crate) enum Added<T> {
    /// The item was placed without growing past three items.
    Fitted,
    /// An equal item is already resident; the new one is handed back.
    Found(T),
    /// The node was full and split. It now holds the left half and the
    /// parent must absorb `orphan` with `right` as its right-hand link.
    Split { orphan: T, right: Box<Node<T>> },
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Node::Empty
    }
}

/// Read-only access
impl<T> Node<T> {
    #[inline]
    pub fn items(&self) -> &[T] {
        match self {
            Node::Empty => &[],
            Node::One(item, _) => slice::from_ref(item),
            Node::Two(items, _) => items,
            Node::Three(items, _) => items,
        }
    }

    #[inline]
    pub fn links(&self) -> &[Link<T>] {
        match self {
            Node::Empty => &[],
            Node::One(_, links) => links,
            Node::Two(_, links) => links,
            Node::Three(_, links) => links,
        }
    }

    #[inline]
    fn items_mut(&mut self) -> &mut [T] {
        match self {
            Node::Empty => &mut [],
            Node::One(item, _) => slice::from_mut(item),
            Node::Two(items, _) => items,
            Node::Three(items, _) => items,
        }
    }

    #[inline]
    fn links_mut(&mut self) -> &mut [Link<T>] {
        match self {
            Node::Empty => &mut [],
            Node::One(_, links) => links,
            Node::Two(_, links) => links,
            Node::Three(_, links) => links,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }

    #[inline]
    pub fn child(&self, slot: usize) -> Option<&Node<T>> {
        self.links().get(slot).and_then(|link| link.as_deref())
    }

    pub fn shape(&self) -> &'static str {
        match self {
            Node::Empty => "empty",
            Node::One(..) => "one",
            Node::Two(..) => "two",
            Node::Three(..) => "three",
        }
    }

    /// Linear scan of the node's own items. `probe` orders the sought key
    /// against a resident item. `Ok` holds the slot of an equal item, `Err`
    /// the link slot the key would descend into.
    fn search_by<P>(&self, probe: &P) -> Result<usize, usize>
    where
        P: Fn(&T) -> Ordering,
    {
        let items = self.items();
        for (slot, item) in items.iter().enumerate() {
            match probe(item) {
                Ordering::Less => return Err(slot),
                Ordering::Equal => return Ok(slot),
                Ordering::Greater => {}
            }
        }
        Err(items.len())
    }

    pub fn find_by<P>(&self, probe: &P) -> Option<&T>
    where
        P: Fn(&T) -> Ordering,
    {
        match self.search_by(probe) {
            Ok(slot) => Some(&self.items()[slot]),
            Err(slot) => self.child(slot)?.find_by(probe),
        }
    }

    pub fn find_mut_by<P>(&mut self, probe: &P) -> Option<&mut T>
    where
        P: Fn(&T) -> Ordering,
    {
        match self.search_by(probe) {
            Ok(slot) => Some(&mut self.items_mut()[slot]),
            Err(slot) => self
                .links_mut()
                .get_mut(slot)?
                .as_deref_mut()?
                .find_mut_by(probe),
        }
    }

    /// Leftmost item and the link hanging off its left side.
    pub fn go_left(&self) -> Option<(&T, Option<&Node<T>>)> {
        let item = self.items().first()?;
        Some((item, self.child(0)))
    }

    /// Rightmost item and the link hanging off its right side.
    pub fn go_right(&self) -> Option<(&T, Option<&Node<T>>)> {
        let last = self.items().len().checked_sub(1)?;
        Some((&self.items()[last], self.child(last + 1)))
    }

    pub fn apply<'a, F>(&'a self, order: Order, visit: &mut F) -> ControlFlow<()>
    where
        F: FnMut(&'a T) -> ControlFlow<()>,
    {
        let items = self.items();
        let links = self.links();
        match order {
            Order::InOrder => {
                for (item, link) in items.iter().zip(links) {
                    if let Some(child) = link {
                        child.apply(order, visit)?;
                    }
                    visit(item)?;
                }
                if let Some(child) = self.child(items.len()) {
                    child.apply(order, visit)?;
                }
            }
            Order::ChildrenFirst => {
                for child in links.iter().flatten() {
                    child.apply(order, visit)?;
                }
                for item in items {
                    visit(item)?;
                }
            }
            Order::ParentFirst => {
                for item in items {
                    visit(item)?;
                }
                for child in links.iter().flatten() {
                    child.apply(order, visit)?;
                }
            }
        }
        ControlFlow::Continue(())
    }

    /// Consumes the subtree, handing every item to `sink` children first.
    pub fn unload<F: FnMut(T)>(self, sink: &mut F) {
        match self {
            Node::Empty => {}
            Node::One(item, links) => {
                unload_links(links, sink);
                sink(item);
            }
            Node::Two(items, links) => {
                unload_links(links, sink);
                items.into_iter().for_each(&mut *sink);
            }
            Node::Three(items, links) => {
                unload_links(links, sink);
                items.into_iter().for_each(&mut *sink);
            }
        }
    }
}

fn unload_links<T, F: FnMut(T), const N: usize>(links: [Link<T>; N], sink: &mut F) {
    for child in links.into_iter().flatten() {
        (*child).unload(sink);
    }
}

/// Insertion
impl<T> Node<T> {
    pub fn add<C: Comparator<T>>(&mut self, cmp: &C, item: T) -> Added<T> {
        let slot = match self.search_by(&|resident| cmp.compare(&item, resident)) {
            Ok(_) => return Added::Found(item),
            Err(slot) => slot,
        };

        let (item, right) = match self
            .links_mut()
            .get_mut(slot)
            .and_then(|link| link.as_deref_mut())
        {
            Some(child) => match child.add(cmp, item) {
                Added::Split { orphan, right } => (orphan, Some(right)),
                done => return done,
            },
            None => (item, None),
        };

        match self.absorb(slot, item, right) {
            Some((orphan, right)) => Added::Split {
                orphan,
                right: Box::new(right),
            },
            None => Added::Fitted,
        }
    }

    /// Morphs the node one size up by placing `item` at `slot` with `right`
    /// as the link to its right. A full node splits instead: it keeps the
    /// left half and returns the median together with the right half. The
    /// half that received the new item ends up with two items.
    fn absorb(&mut self, slot: usize, item: T, right: Link<T>) -> Option<(T, Node<T>)> {
        let (grown, split) = match mem::take(self) {
            Node::Empty => (Node::One(item, [None, right]), None),
            Node::One(a, [l0, l1]) => {
                let grown = match slot {
                    0 => Node::Two([item, a], [l0, right, l1]),
                    _ => Node::Two([a, item], [l0, l1, right]),
                };
                (grown, None)
            }
            Node::Two([a, b], [l0, l1, l2]) => {
                let grown = match slot {
                    0 => Node::Three([item, a, b], [l0, right, l1, l2]),
                    1 => Node::Three([a, item, b], [l0, l1, right, l2]),
                    _ => Node::Three([a, b, item], [l0, l1, l2, right]),
                };
                (grown, None)
            }
            Node::Three([a, b, c], [l0, l1, l2, l3]) => {
                log::debug!("Node::absorb: splitting full node, new item lands at slot {}", slot);
                let (left, right) = match slot {
                    0 => (
                        Node::Two([item, a], [l0, right, l1]),
                        Node::One(c, [l2, l3]),
                    ),
                    1 => (
                        Node::Two([a, item], [l0, l1, right]),
                        Node::One(c, [l2, l3]),
                    ),
                    2 => (
                        Node::One(a, [l0, l1]),
                        Node::Two([item, c], [l2, right, l3]),
                    ),
                    _ => (
                        Node::One(a, [l0, l1]),
                        Node::Two([c, item], [l2, l3, right]),
                    ),
                };
                (left, Some((b, right)))
            }
        };
        *self = grown;
        split
    }
}

/// Removal
impl<T> Node<T> {
    /// Removes the item `probe` settles on. A node that runs out of items is
    /// left `Empty` for its parent to unlink.
    pub fn rm_by<P>(&mut self, probe: &P) -> Option<T>
    where
        P: Fn(&T) -> Ordering,
    {
        match self.search_by(probe) {
            Ok(slot) => Some(self.rm_slot(slot)),
            Err(slot) => {
                let link = self.links_mut().get_mut(slot)?;
                let removed = link.as_deref_mut()?.rm_by(probe)?;
                unlink_if_empty(link);
                Some(removed)
            }
        }
    }

    fn rm_slot(&mut self, slot: usize) -> T {
        if self.links()[slot].is_none() {
            return self.shed(slot, slot);
        }
        match take_min(&mut self.links_mut()[slot + 1]) {
            Some(successor) => mem::replace(&mut self.items_mut()[slot], successor),
            None => self.shed(slot, slot + 1),
        }
    }

    /// Removes the leftmost item of a non-empty subtree.
    fn pop_first(&mut self) -> T {
        match self.links_mut().first_mut().and_then(take_min) {
            Some(min) => min,
            None => self.shed(0, 0),
        }
    }

    /// Morphs the node one size down by dropping the item at `slot` and the
    /// absent link at `gone`, which must be one of the two links beside it.
    /// A one-item node collapses into its remaining child, or into `Empty`.
    fn shed(&mut self, slot: usize, gone: usize) -> T {
        debug_assert!(gone == slot || gone == slot + 1);
        debug_assert!(self.links()[gone].is_none());

        let (shrunk, item) = match mem::take(self) {
            Node::Empty => unreachable!("shed called on an empty node"),
            Node::One(item, [l0, l1]) => {
                let kept = if gone == 0 { l1 } else { l0 };
                (kept.map_or(Node::Empty, |child| *child), item)
            }
            Node::Two([a, b], [l0, l1, l2]) => {
                let (item, rest) = if slot == 0 { (a, b) } else { (b, a) };
                let links = match gone {
                    0 => [l1, l2],
                    1 => [l0, l2],
                    _ => [l0, l1],
                };
                (Node::One(rest, links), item)
            }
            Node::Three([a, b, c], [l0, l1, l2, l3]) => {
                let (item, rest) = match slot {
                    0 => (a, [b, c]),
                    1 => (b, [a, c]),
                    _ => (c, [a, b]),
                };
                let links = match gone {
                    0 => [l1, l2, l3],
                    1 => [l0, l2, l3],
                    2 => [l0, l1, l3],
                    _ => [l0, l1, l2],
                };
                (Node::Two(rest, links), item)
            }
        };
        *self = shrunk;
        item
    }
}

fn take_min<T>(link: &mut Link<T>) -> Option<T> {
    let min = link.as_deref_mut()?.pop_first();
    unlink_if_empty(link);
    Some(min)
}

fn unlink_if_empty<T>(link: &mut Link<T>) {
    if link.as_deref().map_or(false, Node::is_empty) {
        *link = None;
    }
}
