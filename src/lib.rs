//! Linkless weight-balanced order-statistic trees for Rust.
//!
//! This crate provides [`LinklessTree`], an ordered set that stores a binary search tree
//! *implicitly* in one flat buffer: the node in slot `i` has its children in slots
//! `2i + 1` and `2i + 2`. There are no stored links at all. Every slot also records the
//! size of the subtree rooted there, which gives O(log n) rank-based access:
//!
//! - [`get_by_rank`](LinklessTree::get_by_rank) - Get the element at a given sorted position
//! - Indexing by [`Rank`] - e.g., `tree[Rank(0)]` for the smallest element
//!
//! # Example
//!
//! ```
//! use linkless_tree::{LinklessTree, Rank};
//!
//! let mut tree = LinklessTree::new();
//! tree.insert(30);
//! tree.insert(10);
//! tree.insert(20);
//!
//! assert!(tree.contains(&20));
//! assert_eq!(tree.len(), 3);
//!
//! // Order-statistic access
//! assert_eq!(tree.get_by_rank(1), Some(&20));
//! assert_eq!(tree[Rank(0)], 10);
//!
//! // Every value lives at a fixed slot of the backing buffer.
//! let slot = tree.locate(&30);
//! assert_eq!(tree.value_at(slot), Some(&30));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **No links** - Tree shape is encoded purely by slot position
//! - **O(log n) rank operations** - Order-statistic queries via subtree size augmentation
//!
//! # Implementation
//!
//! The tree is kept approximately weight-balanced: a node is rotated when one child's
//! subtree outweighs the other by more than the weight factor. Since a child's position
//! is implied by its parent's position, a rotation cannot just rewire a few links. Instead
//! whole subtrees are relocated in the buffer, one level (row) at a time, moving down,
//! up, or across to the neighbouring branch.
//!
//! The buffer capacity is always a power of two and doubles whenever a node has to be
//! placed past its end. It never shrinks.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order_statistic;
mod raw;

pub mod linkless_tree;

pub use error::Error;
pub use linkless_tree::{DEFAULT_CAPACITY, DEFAULT_WEIGHT_FACTOR, LinklessTree};
pub use order_statistic::Rank;
