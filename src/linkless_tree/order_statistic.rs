use core::ops::Index;

use super::LinklessTree;
use crate::Rank;

impl<T> LinklessTree<T> {
    /// Returns the value at position `rank` in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(depth)
    ///
    /// # Examples
    ///
    /// ```
    /// use linkless_tree::LinklessTree;
    ///
    /// let tree: LinklessTree<_> = [10, 20, 30].into_iter().collect();
    /// assert_eq!(tree.get_by_rank(1), Some(&20));
    /// assert!(tree.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&T> {
        self.raw.get_by_rank(rank)
    }

    /// Returns the smallest value in the tree, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkless_tree::LinklessTree;
    ///
    /// let tree: LinklessTree<_> = [2, 1].into_iter().collect();
    /// assert_eq!(tree.first(), Some(&1));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.get_by_rank(0)
    }

    /// Returns the largest value in the tree, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkless_tree::LinklessTree;
    ///
    /// let tree: LinklessTree<_> = [2, 1].into_iter().collect();
    /// assert_eq!(tree.last(), Some(&2));
    /// ```
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|rank| self.get_by_rank(rank))
    }
}

/// Indexes into the tree by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use linkless_tree::{LinklessTree, Rank};
///
/// let tree: LinklessTree<_> = [10, 20, 30].into_iter().collect();
/// assert_eq!(tree[Rank(1)], 20);
/// ```
impl<T> Index<Rank> for LinklessTree<T> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).expect("index out of bounds")
    }
}
