use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use snafu::Snafu;
use tracing::debug;

use crate::ext::PathExt;
use crate::schema::{NodeKind, NodeStat};

/// How a node's path relates to the real filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// The path is a concrete filesystem path.
    Resolved,
    /// The path is relative to a schema root that has not been chosen yet.
    SchemaRoot,
    /// Declared on its own; the path is just the name until attached.
    Detached,
}

/// One filesystem entry and the entries it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNode {
    absolute_path: PathBuf,
    name: String,
    parent_directory: PathBuf,
    kind: NodeKind,
    children: Vec<SchemaNode>,
    ignore_children: bool,
    optional: bool,
    anchor: Anchor,
}

/// Plain view of a node, for debugging and inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSnapshot {
    pub kind: NodeKind,
    pub absolute_path: String,
    pub name: String,
    pub children: Vec<NodeSnapshot>,
}

impl SchemaNode {
    /// Creates a node of a known kind at a concrete path.
    pub fn new(path: impl Into<PathBuf>, kind: NodeKind) -> Self {
        Self::anchored(path.into(), kind, Anchor::Resolved)
    }

    /// Creates a node at a concrete path, classifying it from a stat result.
    pub fn from_stat(path: impl Into<PathBuf>, stat: &impl NodeStat) -> Result<Self, SchemaError> {
        let path = path.into();
        let kind = NodeKind::classify(stat).ok_or_else(|| SchemaError::UnsupportedTypeError {
            path: path.clone(),
        })?;
        Ok(Self::new(path, kind))
    }

    pub(crate) fn anchored(path: PathBuf, kind: NodeKind, anchor: Anchor) -> Self {
        let node = Self {
            name: path.entry_name(),
            parent_directory: path.parent_directory(),
            absolute_path: path,
            kind,
            children: Vec::new(),
            ignore_children: false,
            optional: false,
            anchor,
        };
        debug!("{} of type {}", node.name, node.kind);
        node
    }

    /// Creates a node whose name is kept exactly as given, so that it can be
    /// checked when the node is attached.
    pub(crate) fn detached(name: &str, kind: NodeKind) -> Self {
        let mut node = Self::anchored(PathBuf::from(name), kind, Anchor::Detached);
        node.name = name.to_string();
        node
    }

    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent_directory(&self) -> &Path {
        &self.parent_directory
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn children(&self) -> &[SchemaNode] {
        &self.children
    }

    pub fn ignores_children(&self) -> bool {
        self.ignore_children
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn add_child(self, child: SchemaNode) -> Result<Self, SchemaError> {
        self.add_children([child])
    }

    /// Attaches `children` and returns the node for chaining.
    ///
    /// Does nothing unless the node is a directory. Fails without attaching
    /// anything if a child name is not a single path segment, or if a
    /// (name, kind) pair would appear twice among the siblings.
    pub fn add_children(
        mut self,
        children: impl IntoIterator<Item = SchemaNode>,
    ) -> Result<Self, SchemaError> {
        self.attach_children(children.into_iter().collect())?;
        Ok(self)
    }

    pub(crate) fn attach_children(&mut self, children: Vec<SchemaNode>) -> Result<(), SchemaError> {
        if self.kind != NodeKind::Directory {
            debug!(
                "Ignoring {} children attached to {} {}",
                children.len(),
                self.kind,
                self.absolute_path.display()
            );
            return Ok(());
        }

        if let Some(child) = children.iter().find(|child| !is_entry_name(&child.name)) {
            return Err(SchemaError::InvalidNameError {
                name: child.name.clone(),
                kind: child.kind,
                parent: self.absolute_path.clone(),
            });
        }

        let mut seen: HashSet<(&str, NodeKind)> = self
            .children
            .iter()
            .map(|child| (child.name.as_str(), child.kind))
            .collect();
        for child in &children {
            if !seen.insert((child.name.as_str(), child.kind)) {
                return Err(SchemaError::DuplicatedChildError {
                    name: child.name.clone(),
                    kind: child.kind,
                    parent: self.absolute_path.clone(),
                });
            }
        }

        for mut child in children {
            child.reattach(&self.absolute_path, self.anchor);
            self.children.push(child);
        }
        Ok(())
    }

    /// Rewrites the node's location to sit directly under `parent`, then does
    /// the same for its descendants.
    fn reattach(&mut self, parent: &Path, anchor: Anchor) {
        self.absolute_path = parent.join(&self.name);
        self.parent_directory = parent.to_path_buf();
        self.anchor = anchor;

        let own_path = self.absolute_path.clone();
        for child in &mut self.children {
            child.reattach(&own_path, anchor);
        }
    }

    /// Children of this node are not checked when it is the expected side of
    /// a comparison.
    pub fn mark_wildcard_children(mut self) -> Self {
        self.ignore_children = true;
        self
    }

    /// Absence of this node is tolerated when it is the expected side of a
    /// comparison.
    pub fn mark_optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Places a node declared against the schema root under `new_root`,
    /// resolved against `cwd` when relative. Nodes already resolved, or never
    /// anchored at the schema root, are left untouched.
    pub fn rebase_root(&mut self, new_root: &Path, cwd: &Path) {
        if self.anchor != Anchor::SchemaRoot {
            debug!(
                "{} is not anchored at the schema root, skipping rebase",
                self.absolute_path.display()
            );
            return;
        }

        let root = new_root.resolve_against(cwd);
        debug!("Rebasing schema onto {}", root.display());
        self.rebase_onto(&root);
    }

    fn rebase_onto(&mut self, root: &Path) {
        if self.anchor != Anchor::SchemaRoot {
            return;
        }

        self.absolute_path = root.join(&self.absolute_path).normalized();
        self.parent_directory = self.absolute_path.parent_directory();
        self.name = self.absolute_path.entry_name();
        self.anchor = Anchor::Resolved;

        for child in &mut self.children {
            child.rebase_onto(root);
        }
    }

    pub fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot {
            kind: self.kind,
            absolute_path: self.absolute_path.display().to_string(),
            name: self.name.clone(),
            children: self.children.iter().map(SchemaNode::snapshot).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.snapshot())
    }
}

/// A single path segment naming an entry of its parent.
fn is_entry_name(name: &str) -> bool {
    !matches!(name, "" | "." | "..") && !name.chars().any(std::path::is_separator)
}

#[derive(Debug, Snafu)]
pub enum SchemaError {
    #[snafu(display("Unsupported type of entry {}", path.display()))]
    UnsupportedTypeError { path: PathBuf },
    #[snafu(display(
        "Duplicated child: {} '{}' is declared twice under {}",
        kind,
        name,
        parent.display()
    ))]
    DuplicatedChildError {
        name: String,
        kind: NodeKind,
        parent: PathBuf,
    },
    #[snafu(display(
        "Invalid name: {} '{}' under {} is not a single entry name",
        kind,
        name,
        parent.display()
    ))]
    InvalidNameError {
        name: String,
        kind: NodeKind,
        parent: PathBuf,
    },
}
