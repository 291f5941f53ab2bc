use core::num::NonZero;

use super::{DEFAULT_WEIGHT_FACTOR, LinklessTree};
use crate::Error;

impl<T> LinklessTree<T> {
    /// Makes a new, empty tree with room for at least `capacity` slots and the
    /// [`DEFAULT_WEIGHT_FACTOR`](crate::DEFAULT_WEIGHT_FACTOR).
    ///
    /// `capacity` is rounded up to the next power of two. The buffer doubles on demand, so
    /// this is a sizing hint rather than a limit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkless_tree::LinklessTree;
    ///
    /// let tree: LinklessTree<i32> = LinklessTree::with_capacity(17)?;
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.capacity(), 32);
    ///
    /// assert!(LinklessTree::<i32>::with_capacity(0).is_err());
    /// # Ok::<(), linkless_tree::Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        const WEIGHT_FACTOR: NonZero<usize> = NonZero::new(DEFAULT_WEIGHT_FACTOR).unwrap();
        Self::with_capacity_and_weight(capacity, WEIGHT_FACTOR)
    }

    /// Returns the number of slots in the backing buffer.
    ///
    /// This is always a power of two. A tree can need far more slots than it holds
    /// values, since every slot position encodes a place in the tree's shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkless_tree::LinklessTree;
    ///
    /// let mut tree = LinklessTree::with_capacity(1)?;
    /// tree.insert(1);
    /// tree.insert(2);
    /// // 2 goes to slot 2, the right child of the root.
    /// assert_eq!(tree.capacity(), 4);
    /// # Ok::<(), linkless_tree::Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
