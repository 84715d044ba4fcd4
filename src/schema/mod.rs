//! Tree representation of a directory layout, and the comparison between an
//! actual tree and an expected one.
//!
//! Nodes are either built from the filesystem (see [`crate::filesystem`]) or
//! declared by hand with [`root_dir`], [`dir`], [`file`] and [`link`].

mod compare;
mod declare;
mod kind;
mod node;

pub use compare::{CompareOptions, CompareResult};
pub use declare::{dir, file, link, root_dir};
pub use kind::{NodeKind, NodeStat};
pub use node::{Anchor, NodeSnapshot, SchemaError, SchemaNode};
