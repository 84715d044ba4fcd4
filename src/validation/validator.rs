use std::env;
use std::path::Path;

use snafu::{ResultExt, Snafu};
use tracing::{debug, info};

use crate::filesystem::{TreeBuilder, WalkError};
use crate::schema::{CompareOptions, CompareResult, SchemaNode};

/// Walks `actual` and compares it against `expected`, both taken relative to
/// the process working directory.
pub async fn validate(
    actual: impl AsRef<Path>,
    expected: &SchemaNode,
    options: CompareOptions,
) -> Result<CompareResult, ValidationError> {
    let cwd = env::current_dir().context(CurrentDirSnafu)?;
    validate_in(&cwd, actual.as_ref(), expected, options).await
}

/// Walks `actual` and compares it against `expected`.
///
/// A relative `actual` path is resolved against `cwd`, and an expected tree
/// still anchored at the schema root is placed at `cwd` before comparing.
/// `expected` itself is left as it was.
pub async fn validate_in(
    cwd: &Path,
    actual: &Path,
    expected: &SchemaNode,
    options: CompareOptions,
) -> Result<CompareResult, ValidationError> {
    let actual_tree = TreeBuilder::build_in(cwd, actual)
        .await
        .context(WalkSnafu)?;
    Ok(compare_walked(cwd, &actual_tree, expected, options))
}

/// Compares a tree already built by [`TreeBuilder`] against `expected`,
/// placing an expected tree still anchored at the schema root at `cwd`.
pub fn compare_walked(
    cwd: &Path,
    actual_tree: &SchemaNode,
    expected: &SchemaNode,
    options: CompareOptions,
) -> CompareResult {
    let mut expected_tree = expected.clone();
    expected_tree.rebase_root(cwd, cwd);
    debug!(
        "Comparing {} against {}",
        actual_tree.absolute_path().display(),
        expected_tree.absolute_path().display()
    );

    let result = actual_tree.equals(&expected_tree, &options);
    match &result.reason {
        None => info!("{} matches the schema", actual_tree.absolute_path().display()),
        Some(reason) => info!(
            "{} does not match the schema: {}",
            actual_tree.absolute_path().display(),
            reason
        ),
    }
    result
}

#[derive(Debug, Snafu)]
pub enum ValidationError {
    #[snafu(display("Failed to obtain current dir"))]
    CurrentDirError { source: std::io::Error },
    #[snafu(display("Failed to build the actual tree"))]
    WalkError { source: WalkError },
}
