mod index;
mod raw_linkless_tree;
mod relocate;
mod slots;

pub(crate) use raw_linkless_tree::RawLinklessTree;
