use core::borrow::Borrow;
use core::fmt;
use core::num::NonZero;

use tracing::debug;

use crate::Error;
use crate::raw::RawLinklessTree;

mod capacity;
mod order_statistic;

/// Capacity of a tree created with [`LinklessTree::new`].
pub const DEFAULT_CAPACITY: usize = 16;

/// Weight factor used unless one is given to [`LinklessTree::with_capacity_and_weight`].
pub const DEFAULT_WEIGHT_FACTOR: usize = 3;

/// An ordered set stored as an implicit, weight-balanced binary search tree.
///
/// Values live in a single flat buffer. The node in slot `i` has its left child in slot
/// `2i + 1` and its right child in slot `2i + 2`, so the tree has no links to follow or
/// maintain. Each slot also records the size of its subtree, which makes rank-based access
/// ([`get_by_rank`](Self::get_by_rank)) logarithmic in the tree's depth.
///
/// After every insertion the tree is rebalanced from the root: a node whose heavier child
/// holds more than `weight_factor` times as many values as the lighter child is rotated.
/// Because positions encode the shape, a rotation relocates whole subtrees in the buffer.
/// Removal never rotates, so balance may degrade until the next insertion.
///
/// The buffer capacity is a power of two and doubles whenever a node would land past its
/// end. It never shrinks, not even on [`clear`](Self::clear).
///
/// It is a logic error for a value to be modified in such a way that its ordering relative
/// to any other value, as determined by the [`Ord`] trait, changes while it is in the tree.
///
/// # Examples
///
/// ```
/// use linkless_tree::LinklessTree;
///
/// let mut tree = LinklessTree::with_capacity(17)?;
/// assert_eq!(tree.capacity(), 32);
///
/// for value in (1..=100).rev() {
///     tree.insert(value);
/// }
///
/// assert!(tree.contains(&50));
/// assert_eq!(tree.value_at(tree.locate(&42)), Some(&42));
///
/// assert!(tree.remove(&21));
/// assert!(!tree.contains(&21));
/// assert_eq!(tree.len(), 99);
/// # Ok::<(), linkless_tree::Error>(())
/// ```
pub struct LinklessTree<T> {
    raw: RawLinklessTree<T>,
}

impl<T> LinklessTree<T> {
    /// Makes a new, empty tree with [`DEFAULT_CAPACITY`] slots and the
    /// [`DEFAULT_WEIGHT_FACTOR`].
    ///
    /// # Examples
    ///
    /// ```
    /// use linkless_tree::LinklessTree;
    ///
    /// let mut tree = LinklessTree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.capacity(), 16);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        LinklessTree {
            raw: RawLinklessTree::new(DEFAULT_CAPACITY, DEFAULT_WEIGHT_FACTOR),
        }
    }

    /// Makes a new, empty tree with room for at least `capacity` slots and the given
    /// weight factor.
    ///
    /// `capacity` is rounded up to the next power of two. A node is considered unbalanced
    /// when one child's subtree holds more than `weight_factor` times as many values as the
    /// other's. Factors below 3 cannot always be restored by a single or double rotation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use core::num::NonZero;
    /// use linkless_tree::{Error, LinklessTree};
    ///
    /// let tree: LinklessTree<u8> = LinklessTree::with_capacity_and_weight(5, NonZero::new(4).unwrap())?;
    /// assert_eq!(tree.capacity(), 8);
    /// assert_eq!(tree.weight_factor(), 4);
    ///
    /// let error = LinklessTree::<u8>::with_capacity_and_weight(0, NonZero::new(4).unwrap()).unwrap_err();
    /// assert_eq!(error, Error::InvalidArgument { name: "capacity", value: 0 });
    /// # Ok::<(), Error>(())
    /// ```
    pub fn with_capacity_and_weight(capacity: usize, weight_factor: NonZero<usize>) -> Result<Self, Error> {
        if capacity == 0 {
            debug!(capacity, "rejected tree capacity");
            return Err(Error::InvalidArgument {
                name: "capacity",
                value: capacity,
            });
        }

        Ok(LinklessTree {
            raw: RawLinklessTree::new(capacity.next_power_of_two(), weight_factor.get()),
        })
    }

    /// Returns the number of values in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkless_tree::LinklessTree;
    ///
    /// let mut tree = LinklessTree::new();
    /// assert_eq!(tree.len(), 0);
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no values.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the weight factor used to decide when a node is unbalanced.
    #[must_use]
    pub fn weight_factor(&self) -> usize {
        self.raw.weight_factor()
    }

    /// Clears the tree, removing all values. The capacity is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkless_tree::LinklessTree;
    ///
    /// let mut tree = LinklessTree::new();
    /// tree.insert(1);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the value stored in slot `index`, if any.
    ///
    /// Slots are addressed implicitly: slot 0 is the root and slot `i` has children
    /// `2i + 1` and `2i + 2`. Out-of-bounds slots read as empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkless_tree::LinklessTree;
    ///
    /// let tree: LinklessTree<_> = [2, 1, 3].into_iter().collect();
    /// assert_eq!(tree.value_at(0), Some(&2));
    /// assert_eq!(tree.value_at(1), Some(&1));
    /// assert_eq!(tree.value_at(1000), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<&T> {
        self.raw.value_at(index)
    }
}

impl<T: Ord> LinklessTree<T> {
    /// Returns the slot holding `value` if it is present, otherwise the slot where it
    /// would be inserted. The latter may lie past the current capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkless_tree::LinklessTree;
    ///
    /// let tree: LinklessTree<_> = [20, 10, 30].into_iter().collect();
    /// assert_eq!(tree.locate(&30), 2);
    /// // 15 would become the right child of 10.
    /// assert_eq!(tree.locate(&15), 4);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(depth)
    pub fn locate<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.locate(value)
    }

    /// Returns `true` if the tree contains a value.
    ///
    /// The value may be any borrowed form of the tree's value type, but the ordering on
    /// the borrowed form *must* match the ordering on the value type.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkless_tree::LinklessTree;
    ///
    /// let tree: LinklessTree<String> = ["a".to_owned(), "b".to_owned()].into_iter().collect();
    /// assert!(tree.contains("a"));
    /// assert!(!tree.contains("c"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(depth)
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.contains(value)
    }

    /// Adds a value to the tree.
    ///
    /// Returns whether the value was newly inserted. That is:
    ///
    /// - If the tree did not previously contain an equal value, `true` is returned.
    /// - If the tree already contained an equal value, `false` is returned, and the tree
    ///   is not modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkless_tree::LinklessTree;
    ///
    /// let mut tree = LinklessTree::with_capacity(1)?;
    ///
    /// assert_eq!(tree.insert(5), true);
    /// assert_eq!(tree.insert(5), false);
    /// assert_eq!(tree.len(), 1);
    /// # Ok::<(), linkless_tree::Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) for the rebalancing pass, plus the relocation cost of any rotation. Growing
    /// the buffer costs O(capacity) and is amortized over the insertions that filled it.
    pub fn insert(&mut self, value: T) -> bool {
        self.raw.insert(value)
    }

    /// If the tree contains a value equal to `value`, removes it and returns `true`.
    ///
    /// The value may be any borrowed form of the tree's value type, but the ordering on
    /// the borrowed form *must* match the ordering on the value type.
    ///
    /// Removal does not rotate. The weight balance is restored by the next insertion.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkless_tree::LinklessTree;
    ///
    /// let mut tree = LinklessTree::new();
    /// assert_eq!(tree.remove(&5), false);
    ///
    /// tree.insert(5);
    /// assert_eq!(tree.remove(&5), true);
    /// assert!(tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(depth²)
    #[doc(alias = "delete")]
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for LinklessTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries((0..self.len()).filter_map(|rank| self.raw.get_by_rank(rank))).finish()
    }
}

impl<T: Clone> Clone for LinklessTree<T> {
    fn clone(&self) -> Self {
        LinklessTree { raw: self.raw.clone() }
    }
}

impl<T> Default for LinklessTree<T> {
    fn default() -> Self {
        LinklessTree::new()
    }
}

impl<T: Ord> FromIterator<T> for LinklessTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = LinklessTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for LinklessTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for LinklessTree<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for &value in iter {
            self.insert(value);
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;
    use static_assertions::assert_impl_all;

    assert_impl_all!(LinklessTree<u64>: Send, Sync, Clone, Default);

    #[test]
    fn debug_lists_values_in_order() {
        let tree: LinklessTree<_> = [3, 1, 2].into_iter().collect();
        assert_eq!(format!("{tree:?}"), "{1, 2, 3}");
    }

    #[test]
    fn extend_by_reference() {
        let mut tree: LinklessTree<i32> = LinklessTree::new();
        tree.extend(&[4, 2, 4]);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn clone_is_independent() {
        let mut tree: LinklessTree<_> = [1, 2].into_iter().collect();
        let copy = tree.clone();
        tree.remove(&1);
        assert!(copy.contains(&1));
        assert!(!tree.contains(&1));
    }
}
