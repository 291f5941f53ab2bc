use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};

use smallvec::SmallVec;
use tracing::trace;

use super::index::{Side, left, parent, right};
use super::slots::Slots;

/// Work stack for the top-down rebalancing pass.
type Pending = SmallVec<[usize; 32]>;

/// The core implicit tree backing `LinklessTree`.
#[derive(Clone)]
pub(crate) struct RawLinklessTree<T> {
    /// Values and subtree sizes, addressed implicitly.
    slots: Slots<T>,
    /// A node is unbalanced when one child's size exceeds the other's times this factor.
    weight_factor: usize,
}

impl<T> RawLinklessTree<T> {
    /// Creates a tree with exactly `capacity` slots, which must be a power of two.
    pub(crate) fn new(capacity: usize, weight_factor: usize) -> Self {
        Self {
            slots: Slots::with_capacity(capacity),
            weight_factor,
        }
    }

    /// Number of values, the size of the subtree at the root.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.size(0)
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    #[inline]
    pub(crate) fn weight_factor(&self) -> usize {
        self.weight_factor
    }

    #[inline]
    pub(crate) fn value_at(&self, index: usize) -> Option<&T> {
        self.slots.value(index)
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }

    /// Gets a value by its rank (0-indexed position in sorted order).
    pub(crate) fn get_by_rank(&self, rank: usize) -> Option<&T> {
        if rank >= self.len() {
            return None;
        }

        let mut index = 0;
        let mut remaining = rank;

        loop {
            let left_size = self.slots.size(left(index));
            match remaining.cmp(&left_size) {
                Equal => return self.slots.value(index),
                Less => index = left(index),
                Greater => {
                    remaining -= left_size + 1;
                    index = right(index);
                }
            }
        }
    }
}

impl<T: Ord> RawLinklessTree<T> {
    /// Returns the slot holding `value`, or the empty (possibly out of bounds) slot where
    /// it would be inserted.
    pub(crate) fn locate<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut index = 0;
        while let Some(current) = self.slots.value(index) {
            match value.cmp(current.borrow()) {
                Equal => break,
                Less => index = left(index),
                Greater => index = right(index),
            }
        }
        index
    }

    pub(crate) fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.slots.value(self.locate(value)).is_some()
    }

    /// Inserts `value`. Returns `false` if an equal value was already present.
    pub(crate) fn insert(&mut self, value: T) -> bool {
        let index = self.locate(&value);
        self.insert_at(index, value)
    }

    /// Writes `value` into `index`, which must be the end of the search path for `value`.
    fn insert_at(&mut self, index: usize, value: T) -> bool {
        self.slots.reserve_index(index);

        if let Some(existing) = self.slots.value(index) {
            if *existing == value {
                return false;
            }
            self.displace(index);
        }

        self.slots.put_value(index, Some(value));
        self.slots.recount(index);

        let mut ancestor = parent(index);
        while let Some(current) = ancestor {
            self.slots.set_size(current, self.slots.size(current) + 1);
            ancestor = parent(current);
        }

        self.rebalance();
        true
    }

    /// Pushes the whole subtree at `index` one level down, toward the lighter child.
    fn displace(&mut self, index: usize) {
        let side = if self.slots.size(left(index)) <= self.slots.size(right(index)) {
            Side::Left
        } else {
            Side::Right
        };
        trace!(index, ?side, "displacing occupied subtree");
        self.slots.shift_down(index, side);
    }

    /// Removes `value`. Returns `false` if it was not present.
    pub(crate) fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let index = self.locate(value);
        if self.slots.value(index).is_none() {
            return false;
        }

        // Pull in-order neighbours up from the heavier side until a leaf is vacated.
        let mut vacated = index;
        loop {
            let left_size = self.slots.size(left(vacated));
            let right_size = self.slots.size(right(vacated));
            if left_size == 0 && right_size == 0 {
                self.slots.take_slot(vacated);
                break;
            }

            let neighbour = if left_size > right_size {
                self.rightmost(left(vacated))
            } else {
                self.leftmost(right(vacated))
            };
            let moved = self.slots.take_value(neighbour);
            self.slots.put_value(vacated, moved);
            vacated = neighbour;
        }

        let mut ancestor = parent(vacated);
        while let Some(current) = ancestor {
            self.slots.recount(current);
            ancestor = parent(current);
        }
        true
    }

    /// Slot of the largest value in the non-empty subtree at `index`.
    fn rightmost(&self, mut index: usize) -> usize {
        while self.slots.is_occupied(right(index)) {
            index = right(index);
        }
        index
    }

    /// Slot of the smallest value in the non-empty subtree at `index`.
    fn leftmost(&self, mut index: usize) -> usize {
        while self.slots.is_occupied(left(index)) {
            index = left(index);
        }
        index
    }

    /// Restores weight balance top-down from the root.
    ///
    /// Nodes in the bottom two levels of the buffer are never rotated; their children
    /// hold at most a handful of values.
    fn rebalance(&mut self) {
        let mut pending = Pending::new();
        pending.push(0);

        while let Some(index) = pending.pop() {
            if !self.slots.is_occupied(index) {
                continue;
            }
            let (left_child, right_child) = (left(index), right(index));
            if 2 * right_child + 2 >= self.slots.capacity() {
                continue;
            }

            let left_size = self.slots.size(left_child);
            let right_size = self.slots.size(right_child);
            if left_size >= 2 || right_size >= 2 {
                if right_size > left_size.saturating_mul(self.weight_factor) {
                    self.restore(index, Side::Right);
                } else if left_size > right_size.saturating_mul(self.weight_factor) {
                    self.restore(index, Side::Left);
                }
            }

            // Right before left.
            pending.push(left_child);
            pending.push(right_child);
        }
    }

    /// Rotates away from the `heavy` side of `index`, with a double rotation when the
    /// heavy child's inner grandchild is at least as large as its outer one.
    fn restore(&mut self, index: usize, heavy: Side) {
        let child = heavy.child(index);
        let inner = self.slots.size(heavy.opposite().child(child));
        let outer = self.slots.size(heavy.child(child));
        if inner >= outer {
            self.rotate(child, heavy);
        }
        self.rotate(index, heavy.opposite());
    }

    /// Rotates the subtree at `pivot` toward `direction`: the child on the other side is
    /// promoted into `pivot` and the old pivot value drops into `direction`'s child.
    fn rotate(&mut self, pivot: usize, direction: Side) {
        trace!(pivot, ?direction, "rotating");
        let promoted = direction.opposite().child(pivot);
        let demoted = direction.child(pivot);

        // Make room below the slot that receives the old pivot value.
        self.slots.shift_down(demoted, direction);
        let pivot_value = self.slots.take_value(pivot);
        self.slots.put_value(demoted, pivot_value);

        // The promoted node's inner subtree now hangs from the demoted node.
        self.slots.shift_across(direction.child(promoted), direction);
        let promoted_value = self.slots.take_value(promoted);
        self.slots.put_value(pivot, promoted_value);

        // Its outer subtree moves up into the slot it left.
        self.slots.shift_up(direction.opposite().child(promoted));

        self.slots.recount(promoted);
        self.slots.recount(demoted);
        self.slots.recount(pivot);
    }
}
