//! Relocation primitives: moving a whole subtree to another position of the buffer.
//!
//! A subtree rooted at `from` covers, at relative depth `d`, the contiguous row
//! `(from + 1) * 2^d - 1 .. (from + 1) * 2^d - 1 + 2^d`. Relocating it to `to` maps every
//! node to the same depth and offset below `to`. The three shapes used by rotations are:
//!
//! - down: `to` is a child of `from`. Rows are moved deepest first, so a write never lands
//!   on a row that has not been read yet.
//! - up: `to` is the parent of `from`. Rows are moved shallowest first for the same
//!   reason, and the sibling subtree of `from` must already be empty.
//! - across: `to` is the adjacent cousin of `from` at the same depth. Source and target
//!   rows never overlap, the target subtree must already be empty.
//!
//! Source slots are always left empty with size 0.

use smallvec::SmallVec;

use super::index::{Side, level, parent};
use super::slots::Slots;

/// One level of a subtree being relocated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Row {
    src: usize,
    dst: usize,
    /// Slots up to and including the last occupied one.
    width: usize,
}

type Rows = SmallVec<[Row; 32]>;

impl<T> Slots<T> {
    /// Moves the subtree at `root` one level deeper, into `side`'s child of `root`.
    pub(crate) fn shift_down(&mut self, root: usize, side: Side) {
        self.relocate(root, side.child(root));
    }

    /// Moves the subtree at `root` one level up, into its parent's slot.
    pub(crate) fn shift_up(&mut self, root: usize) {
        if let Some(target) = parent(root) {
            self.relocate(root, target);
        }
    }

    /// Moves the subtree at `root` to the neighbouring slot on `side` at the same depth.
    pub(crate) fn shift_across(&mut self, root: usize, side: Side) {
        let target = match side {
            Side::Left => root - 1,
            Side::Right => root + 1,
        };
        debug_assert_eq!(level(root), level(target), "`Slots::shift_across()` - target changes depth!");
        self.relocate(root, target);
    }

    fn relocate(&mut self, from: usize, to: usize) {
        let rows = self.rows(from, to);
        if let Some(last) = rows.iter().map(|row| row.dst + row.width - 1).max() {
            self.reserve_index(last);
        }

        if level(to) > level(from) {
            for row in rows.iter().rev() {
                self.move_row(row);
            }
        } else {
            for row in &rows {
                self.move_row(row);
            }
        }
    }

    /// Collects the rows of the subtree at `from` down to its last occupied level.
    fn rows(&self, from: usize, to: usize) -> Rows {
        let mut rows = Rows::new();
        let (mut src, mut dst, mut width) = (from, to, 1usize);

        while src < self.capacity() {
            let end = (src + width).min(self.capacity());
            let Some(last) = (src..end).rev().find(|&index| self.is_occupied(index)) else {
                break;
            };
            rows.push(Row {
                src,
                dst,
                width: last - src + 1,
            });
            src = 2 * src + 1;
            dst = 2 * dst + 1;
            width *= 2;
        }

        rows
    }

    fn move_row(&mut self, row: &Row) {
        for offset in 0..row.width {
            let (value, size) = self.take_slot(row.src + offset);
            if value.is_some() {
                self.put_slot(row.dst + offset, value, size);
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use pretty_assertions::assert_eq;

    /// Builds slots holding `(index, value)` pairs, each with size 1.
    fn slots_with(capacity: usize, nodes: &[(usize, char)]) -> Slots<char> {
        let mut slots = Slots::with_capacity(capacity);
        for &(index, value) in nodes {
            slots.put_slot(index, Some(value), 1);
        }
        slots
    }

    fn occupied(slots: &Slots<char>) -> Vec<(usize, char)> {
        (0..slots.capacity())
            .filter_map(|index| slots.value(index).map(|&value| (index, value)))
            .collect()
    }

    #[test]
    fn shift_down_left_keeps_branching() {
        // b at 1 with children a (3) and c (4), and a grandchild at 9.
        let mut slots = slots_with(16, &[(1, 'b'), (3, 'a'), (4, 'c'), (9, 'd')]);
        slots.shift_down(1, Side::Left);

        // Same depth and offset below the new root: 9 is the third node of its row.
        assert_eq!(occupied(&slots), [(3, 'b'), (7, 'a'), (8, 'c'), (17, 'd')]);
        assert_eq!(slots.capacity(), 32);
        assert_eq!(slots.size(1), 0);
    }

    #[test]
    fn shift_down_right_moves_every_level() {
        let mut slots = slots_with(16, &[(2, 'x'), (5, 'w'), (6, 'y'), (14, 'z')]);
        slots.shift_down(2, Side::Right);

        assert_eq!(occupied(&slots), [(6, 'x'), (13, 'w'), (14, 'y'), (30, 'z')]);
    }

    #[test]
    fn shift_up_clears_sources() {
        let mut slots = slots_with(32, &[(3, 'a'), (7, 'b'), (8, 'c'), (17, 'd')]);
        slots.shift_up(3);

        assert_eq!(occupied(&slots), [(1, 'a'), (3, 'b'), (4, 'c'), (9, 'd')]);
        assert_eq!(slots.size(17), 0);
    }

    #[test]
    fn shift_across_uses_row_offsets() {
        // Subtree at 4 (right child of 1) moves to 5 (left child of 2).
        let mut slots = slots_with(32, &[(4, 'm'), (9, 'l'), (10, 'n'), (22, 'o')]);
        slots.shift_across(4, Side::Right);

        assert_eq!(occupied(&slots), [(5, 'm'), (11, 'l'), (12, 'n'), (26, 'o')]);

        slots.shift_across(5, Side::Left);
        assert_eq!(occupied(&slots), [(4, 'm'), (9, 'l'), (10, 'n'), (22, 'o')]);
    }

    #[test]
    fn shift_across_grows_at_partial_last_row() {
        // Capacity 16 leaves only slot 15 of row four addressable.
        let mut slots = slots_with(16, &[(3, 'a'), (7, 'b'), (15, 'c')]);
        slots.shift_across(3, Side::Right);

        assert_eq!(occupied(&slots), [(4, 'a'), (9, 'b'), (19, 'c')]);
        assert_eq!(slots.capacity(), 32);
    }

    #[test]
    fn empty_subtree_is_a_no_op() {
        let mut slots = slots_with(8, &[(0, 'r')]);
        slots.shift_down(1, Side::Left);
        slots.shift_up(2);
        assert_eq!(occupied(&slots), [(0, 'r')]);
        assert_eq!(slots.capacity(), 8);
    }

    #[test]
    fn sizes_travel_with_values() {
        let mut slots = Slots::with_capacity(8);
        slots.put_slot(1, Some(2), 2);
        slots.put_slot(3, Some(1), 1);
        slots.shift_up(1);

        assert_eq!(slots.value(0), Some(&2));
        assert_eq!(slots.size(0), 2);
        assert_eq!(slots.value(1), Some(&1));
        assert_eq!(slots.size(1), 1);
        assert_eq!(slots.size(3), 0);
    }
}
