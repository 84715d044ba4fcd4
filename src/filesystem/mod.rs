//! Builds node trees from the real filesystem.
//!
//! This is the only part of the crate that performs I/O. Sibling entries are
//! inspected concurrently on the async runtime and joined before their parent
//! node is finished.

mod tree_builder;

pub use tree_builder::{TreeBuilder, WalkError};
