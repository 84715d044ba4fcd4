use std::env;
use std::path::{Path, PathBuf};

use compio::fs;
use futures::FutureExt;
use futures::future::{LocalBoxFuture, try_join_all};
use snafu::{ResultExt, Snafu};
use tracing::debug;

use crate::ext::{AsyncTryFrom, PathExt};
use crate::schema::{NodeKind, SchemaError, SchemaNode};

pub struct TreeBuilder;

impl TreeBuilder {
    /// Walks `path`, resolved against the process working directory.
    pub async fn build(path: impl AsRef<Path>) -> Result<SchemaNode, WalkError> {
        let cwd = env::current_dir().context(CurrentDirSnafu)?;
        Self::build_in(&cwd, path.as_ref()).await
    }

    /// Walks `path`, resolved against `cwd` when relative.
    ///
    /// The target itself is stat-ed following symbolic links; entries below
    /// it are not, so links inside the tree show up as link leaves.
    pub async fn build_in(cwd: &Path, path: &Path) -> Result<SchemaNode, WalkError> {
        let target = path.resolve_against(cwd);
        debug!("Parsing folder: {}", target.display());

        let stat = fs::metadata(&target).await.context(StatSnafu {
            path: target.clone(),
        })?;
        Self::build_node(target, stat).await
    }

    fn walk_entry(path: PathBuf) -> LocalBoxFuture<'static, Result<SchemaNode, WalkError>> {
        async move {
            let stat = fs::symlink_metadata(&path).await.context(StatSnafu {
                path: path.clone(),
            })?;
            Self::build_node(path, stat).await
        }
        .boxed_local()
    }

    async fn build_node(path: PathBuf, stat: fs::Metadata) -> Result<SchemaNode, WalkError> {
        let mut node = SchemaNode::from_stat(path.clone(), &stat).context(SchemaSnafu)?;
        if node.kind() != NodeKind::Directory {
            return Ok(node);
        }

        let entries = Self::list_entries(&path)?;
        debug!(
            "Children of {}: {:?}",
            path.display(),
            entries.iter().map(|entry| entry.entry_name()).collect::<Vec<_>>()
        );

        let children = try_join_all(entries.into_iter().map(Self::walk_entry)).await?;
        node.attach_children(children).context(SchemaSnafu)?;
        Ok(node)
    }

    /// Lists the entries of a directory, sorted by name.
    fn list_entries(path: &Path) -> Result<Vec<PathBuf>, WalkError> {
        // compio has no directory listing, so this one call blocks the task.
        let read_dir = std::fs::read_dir(path).context(ReadDirSnafu {
            path: path.to_path_buf(),
        })?;

        let mut entries = read_dir
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<Vec<_>, _>>()
            .context(ReadDirSnafu {
                path: path.to_path_buf(),
            })?;
        entries.sort_by(|left, right| left.file_name().cmp(&right.file_name()));
        Ok(entries)
    }
}

impl AsyncTryFrom<&Path> for SchemaNode {
    type Error = WalkError;

    async fn async_try_from(path: &Path) -> Result<Self, Self::Error> {
        TreeBuilder::build(path).await
    }
}

#[derive(Debug, Snafu)]
pub enum WalkError {
    #[snafu(display("Failed to obtain current dir"))]
    CurrentDirError { source: std::io::Error },
    #[snafu(display("Failed to inspect {}", path.display()))]
    StatError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to list directory {}", path.display()))]
    ReadDirError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Walked tree could not be assembled"))]
    SchemaError { source: SchemaError },
}
