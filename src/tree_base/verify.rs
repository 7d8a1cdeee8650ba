use std::ops::ControlFlow;

use bitmask_enum::bitmask;

use super::{
    comparator::Comparator,
    node::{Node, Order},
    tree_stats::TreeStats,
};

/// Invariant violations found by [`Tree::verify`](super::tree::Tree::verify).
///
/// `Unordered`: an in-order walk met two items that are not strictly
/// increasing. `Unbalanced`: root-to-leaf paths differ in length.
/// `Miscounted`: the recorded item count disagrees with the items reachable.
/// `StrayEmpty`: an `Empty` node sits below the root.
#[bitmask(u8)]
pub enum Defects {
    Sound = 0,
    Unordered = 1,
    Unbalanced = 2,
    Miscounted = 4,
    StrayEmpty = 8,
}

impl Defects {
    pub fn is_sound(&self) -> bool {
        *self == Defects::Sound
    }

    pub fn has(&self, defect: Defects) -> bool {
        self.contains(defect)
    }
}

pub(crate) fn verify<T, C: Comparator<T>>(root: &Node<T>, size: usize, cmp: &C) -> Defects {
    let mut defects = Defects::Sound;

    let mut prev: Option<&T> = None;
    let mut ordered = true;
    let mut count = 0;
    let _ = root.apply(Order::InOrder, &mut |item| {
        if let Some(prev) = prev {
            ordered &= cmp.less(prev, item);
        }
        prev = Some(item);
        count += 1;
        ControlFlow::Continue(())
    });
    if !ordered {
        defects = defects | Defects::Unordered;
    }

    let stats = TreeStats::collect(root);
    if !stats.is_balanced() {
        defects = defects | Defects::Unbalanced;
    }
    if count != size || stats.size != size {
        defects = defects | Defects::Miscounted;
    }
    if stats.stray_empties > 0 {
        defects = defects | Defects::StrayEmpty;
    }

    if !defects.is_sound() {
        log::debug!("verify: tree of {} items has defects {:?}", size, defects);
    }
    defects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree_base::{comparator::Natural, node::Link};

    fn leaf(item: i32) -> Link<i32> {
        Some(Box::new(Node::One(item, [None, None])))
    }

    #[test]
    fn sound_tree_has_no_defects() {
        let root = Node::One(2, [leaf(1), leaf(3)]);
        let defects = verify(&root, 3, &Natural);
        assert!(defects.is_sound());
        assert!(!defects.has(Defects::Unordered));
    }

    #[test]
    fn reports_each_defect() {
        let unordered = Node::One(2, [leaf(3), leaf(1)]);
        assert_eq!(verify(&unordered, 3, &Natural), Defects::Unordered);

        let lopsided = Node::One(2, [None, leaf(3)]);
        assert_eq!(verify(&lopsided, 2, &Natural), Defects::Unbalanced);

        let root = Node::One(2, [leaf(1), leaf(3)]);
        assert_eq!(verify(&root, 4, &Natural), Defects::Miscounted);

        let stray = Node::One(2, [Some(Box::new(Node::Empty)), leaf(3)]);
        let defects = verify(&stray, 2, &Natural);
        assert!(defects.has(Defects::StrayEmpty));
        assert!(!defects.has(Defects::Miscounted));
    }
}
