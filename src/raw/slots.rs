use alloc::vec::Vec;

use tracing::trace;

use super::index::{left, right};

/// The backing buffer pair: one value slot and one subtree size per index.
///
/// Reads past the end behave like an empty slot with size 0.
#[derive(Clone)]
pub(crate) struct Slots<T> {
    values: Vec<Option<T>>,
    sizes: Vec<usize>,
}

impl<T> Slots<T> {
    /// Creates empty storage for exactly `capacity` slots.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        assert!(capacity.is_power_of_two(), "`Slots::with_capacity()` - `capacity` is not a power of two!");
        let mut values = Vec::with_capacity(capacity);
        values.resize_with(capacity, || None);
        Self {
            values,
            sizes: alloc::vec![0; capacity],
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Doubles the capacity. Existing slots keep their index.
    pub(crate) fn grow(&mut self) {
        let old = self.capacity();
        let new = old.checked_mul(2).expect("`Slots::grow()` - capacity overflow!");
        self.values.resize_with(new, || None);
        self.sizes.resize(new, 0);
        trace!(old, new, "grew slot buffer");
    }

    /// Grows until `index` is addressable.
    pub(crate) fn reserve_index(&mut self, index: usize) {
        while index >= self.capacity() {
            self.grow();
        }
    }

    #[inline]
    pub(crate) fn value(&self, index: usize) -> Option<&T> {
        self.values.get(index).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn is_occupied(&self, index: usize) -> bool {
        self.value(index).is_some()
    }

    /// Subtree size at `index`, 0 when out of bounds.
    #[inline]
    pub(crate) fn size(&self, index: usize) -> usize {
        self.sizes.get(index).copied().unwrap_or(0)
    }

    #[inline]
    pub(crate) fn set_size(&mut self, index: usize, size: usize) {
        self.sizes[index] = size;
    }

    /// Takes the value out of `index`, leaving its size untouched.
    pub(crate) fn take_value(&mut self, index: usize) -> Option<T> {
        self.values.get_mut(index).and_then(Option::take)
    }

    /// Stores `value` at `index`, leaving its size untouched.
    pub(crate) fn put_value(&mut self, index: usize, value: Option<T>) {
        self.values[index] = value;
    }

    /// Empties `index` and returns what it held.
    pub(crate) fn take_slot(&mut self, index: usize) -> (Option<T>, usize) {
        if index >= self.capacity() {
            return (None, 0);
        }
        (self.values[index].take(), core::mem::take(&mut self.sizes[index]))
    }

    pub(crate) fn put_slot(&mut self, index: usize, value: Option<T>, size: usize) {
        self.values[index] = value;
        self.sizes[index] = size;
    }

    /// Recomputes the size at `index` from its children. Empty slots get 0.
    pub(crate) fn recount(&mut self, index: usize) {
        let size = if self.is_occupied(index) {
            1 + self.size(left(index)) + self.size(right(index))
        } else {
            0
        };
        self.set_size(index, size);
    }

    /// Drops every value, keeping the capacity.
    pub(crate) fn clear(&mut self) {
        self.values.iter_mut().for_each(|value| *value = None);
        self.sizes.iter_mut().for_each(|size| *size = 0);
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "`Slots::with_capacity()` - `capacity` is not a power of two!")]
    fn capacity_must_be_power_of_two() {
        let _ = Slots::<u32>::with_capacity(12);
    }

    #[test]
    fn out_of_bounds_reads_are_empty() {
        let slots = Slots::<u32>::with_capacity(4);
        assert_eq!(slots.value(4), None);
        assert_eq!(slots.size(100), 0);
        assert!(!slots.is_occupied(7));
    }

    #[test]
    fn grow_keeps_existing_slots() {
        let mut slots = Slots::with_capacity(2);
        slots.put_slot(0, Some('a'), 2);
        slots.put_slot(1, Some('b'), 1);

        slots.grow();
        assert_eq!(slots.capacity(), 4);
        assert_eq!(slots.value(0), Some(&'a'));
        assert_eq!(slots.value(1), Some(&'b'));
        assert_eq!(slots.size(0), 2);
        assert_eq!(slots.value(3), None);
        assert_eq!(slots.size(3), 0);
    }

    #[test]
    fn reserve_index_doubles_until_addressable() {
        let mut slots = Slots::<u8>::with_capacity(1);
        slots.reserve_index(8);
        assert_eq!(slots.capacity(), 16);
        slots.reserve_index(3);
        assert_eq!(slots.capacity(), 16);
    }

    #[test]
    fn take_slot_clears_value_and_size() {
        let mut slots = Slots::with_capacity(4);
        slots.put_slot(2, Some(7), 1);
        assert_eq!(slots.take_slot(2), (Some(7), 1));
        assert_eq!(slots.value(2), None);
        assert_eq!(slots.size(2), 0);
        assert_eq!(slots.take_slot(9), (None, 0));
    }

    #[test]
    fn recount_sums_children() {
        let mut slots = Slots::with_capacity(4);
        slots.put_slot(0, Some(2), 0);
        slots.put_slot(1, Some(1), 1);
        slots.recount(0);
        assert_eq!(slots.size(0), 2);

        slots.take_value(0);
        slots.recount(0);
        assert_eq!(slots.size(0), 0);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut slots = Slots::with_capacity(8);
        slots.put_slot(0, Some(1), 1);
        slots.clear();
        assert_eq!(slots.capacity(), 8);
        assert_eq!(slots.value(0), None);
        assert_eq!(slots.size(0), 0);
    }
}
