use std::{cmp::Ordering, fmt::Debug};

/// Three-way ordering used by a [`Tree`](super::tree::Tree).
///
/// A comparator must describe a total order and keep describing the same
/// order for as long as the tree holding it is alive.
pub trait Comparator<T> {
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering;

    fn less(&self, lhs: &T, rhs: &T) -> bool {
        self.compare(lhs, rhs) == Ordering::Less
    }

    fn equal(&self, lhs: &T, rhs: &T) -> bool {
        self.compare(lhs, rhs) == Ordering::Equal
    }
}

/// Orders items by their `Ord` implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord> Comparator<T> for Natural {
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        lhs.cmp(rhs)
    }
}

/// Flips the order of the wrapped comparator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reverse<C>(pub C);

impl<T, C: Comparator<T>> Comparator<T> for Reverse<C> {
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        self.0.compare(rhs, lhs)
    }
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        self(lhs, rhs)
    }
}

#[cfg(test)]
#[test]
fn test_comparators() {
    assert_eq!(Natural.compare(&1, &2), Ordering::Less);
    assert_eq!(Reverse(Natural).compare(&1, &2), Ordering::Greater);
    assert!(Comparator::<i32>::equal(&Natural, &7, &7));

    let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
    assert!(by_len.less(&"ab", &"abc"));
    assert!(by_len.equal(&"ab", &"xy"));
}
