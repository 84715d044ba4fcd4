use std::path::{Path, PathBuf};

use crate::ext::PathExt;
use crate::schema::{Anchor, NodeKind, SchemaNode};

/// Directory at the top of an expected tree.
///
/// Without a path it stands for the schema root itself. A relative path is
/// taken relative to the schema root, not to the working directory; both are
/// placed on disk later by [`SchemaNode::rebase_root`]. An absolute path is
/// used as is.
pub fn root_dir(path: Option<&Path>) -> SchemaNode {
    match path {
        Some(path) if path.is_absolute() => {
            SchemaNode::anchored(path.normalized(), NodeKind::Directory, Anchor::Resolved)
        }
        Some(path) => SchemaNode::anchored(path.normalized(), NodeKind::Directory, Anchor::SchemaRoot),
        None => SchemaNode::anchored(PathBuf::new(), NodeKind::Directory, Anchor::SchemaRoot),
    }
}

pub fn dir(name: &str) -> SchemaNode {
    detached(name, NodeKind::Directory)
}

pub fn file(name: &str) -> SchemaNode {
    detached(name, NodeKind::File)
}

pub fn link(name: &str) -> SchemaNode {
    detached(name, NodeKind::Link)
}

fn detached(name: &str, kind: NodeKind) -> SchemaNode {
    SchemaNode::detached(name, kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_dir_with_absolute_path_is_resolved() {
        let root = root_dir(Some(Path::new("/srv/./out")));

        assert_eq!(root.anchor(), Anchor::Resolved);
        assert_eq!(root.absolute_path(), Path::new("/srv/out"));
        assert_eq!(root.name(), "out");
        assert_eq!(root.kind(), NodeKind::Directory);
    }

    #[test]
    fn root_dir_with_relative_path_waits_for_rebase() {
        let root = root_dir(Some(Path::new("./testDir")));

        assert_eq!(root.anchor(), Anchor::SchemaRoot);
        assert_eq!(root.absolute_path(), Path::new("testDir"));
        assert_eq!(root.name(), "testDir");
    }

    #[test]
    fn root_dir_without_path_is_the_schema_root() {
        let root = root_dir(None);

        assert_eq!(root.anchor(), Anchor::SchemaRoot);
        assert_eq!(root.absolute_path(), Path::new(""));
    }

    #[test]
    fn detached_nodes_carry_their_kind_and_name() {
        let nodes = [dir("folder"), file("file.txt"), link("latest")];
        let kinds: Vec<NodeKind> = nodes.iter().map(SchemaNode::kind).collect();

        assert_eq!(
            kinds,
            vec![NodeKind::Directory, NodeKind::File, NodeKind::Link]
        );
        for node in &nodes {
            assert_eq!(node.anchor(), Anchor::Detached);
            assert_eq!(node.absolute_path(), Path::new(node.name()));
        }
    }

    #[test]
    fn detached_names_are_kept_verbatim() {
        let node = file("sub/x");

        assert_eq!(node.name(), "sub/x");
        assert!(root_dir(None).add_child(node).is_err());
    }

    #[test]
    fn detached_nodes_take_the_anchor_of_their_parent() {
        let root = root_dir(Some(Path::new("testDir")))
            .add_child(dir("folder1").add_child(file("file1.1")).unwrap())
            .unwrap();

        let leaf = &root.children()[0].children()[0];
        assert_eq!(leaf.anchor(), Anchor::SchemaRoot);
        assert_eq!(leaf.absolute_path(), Path::new("testDir/folder1/file1.1"));
    }
}
