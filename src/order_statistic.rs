/// A zero-based rank into the sorted order of a tree.
///
/// # Examples
///
/// ```
/// use linkless_tree::{LinklessTree, Rank};
///
/// let tree: LinklessTree<_> = [20, 10].into_iter().collect();
///
/// assert_eq!(tree[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
