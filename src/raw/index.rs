//! Implicit addressing: a node's children and parent are pure functions of its slot.

/// One of the two children of a slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Returns the child of `index` on this side.
    #[inline]
    pub(crate) const fn child(self, index: usize) -> usize {
        match self {
            Side::Left => left(index),
            Side::Right => right(index),
        }
    }
}

#[inline]
pub(crate) const fn left(index: usize) -> usize {
    2 * index + 1
}

#[inline]
pub(crate) const fn right(index: usize) -> usize {
    2 * index + 2
}

/// Returns the parent slot, or `None` for the root.
#[inline]
pub(crate) const fn parent(index: usize) -> Option<usize> {
    if index == 0 { None } else { Some((index - 1) / 2) }
}

/// Depth of `index` below the root, `floor(log2(index + 1))`.
#[inline]
pub(crate) const fn level(index: usize) -> u32 {
    (index + 1).ilog2()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn root_has_no_parent() {
        assert_eq!(parent(0), None);
        assert_eq!(level(0), 0);
    }

    #[test]
    fn levels_of_first_rows() {
        assert_eq!([1, 2].map(level), [1, 1]);
        assert_eq!([3, 4, 5, 6].map(level), [2, 2, 2, 2]);
        assert_eq!(level(7), 3);
        assert_eq!(level(15), 4);
    }

    #[test]
    fn side_child_and_opposite() {
        assert_eq!(Side::Left.child(3), 7);
        assert_eq!(Side::Right.child(3), 8);
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
    }

    proptest! {
        #[test]
        fn children_point_back_to_parent(index in 0usize..(1 << 40)) {
            prop_assert_eq!(parent(left(index)), Some(index));
            prop_assert_eq!(parent(right(index)), Some(index));
            prop_assert_eq!(level(left(index)), level(index) + 1);
            prop_assert_eq!(level(right(index)), level(index) + 1);
        }
    }
}
