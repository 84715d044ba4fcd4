use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::schema::SchemaNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareOptions {
    /// Entries found on disk but absent from the expected tree fail the
    /// comparison. When unset they are skipped.
    pub strict: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl CompareOptions {
    pub fn lenient() -> Self {
        Self { strict: false }
    }
}

/// Outcome of comparing an actual tree against an expected one. A mismatch
/// is an ordinary result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompareResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CompareResult {
    pub fn matched() -> Self {
        Self {
            success: true,
            reason: None,
        }
    }

    pub fn mismatch(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            reason: Some(reason.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

impl fmt::Display for CompareResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "{}", reason),
            None if self.success => write!(f, "matched"),
            None => write!(f, "mismatched"),
        }
    }
}

impl SchemaNode {
    /// Checks that this tree, taken as the actual one, satisfies `expected`.
    ///
    /// Children are paired by name only, so an entry whose kind differs from
    /// the expected one is reported as a kind mismatch rather than as missing.
    /// The first mismatch found, in this tree's child order, is the one
    /// reported.
    pub fn equals(&self, expected: &SchemaNode, options: &CompareOptions) -> CompareResult {
        if self.name() != expected.name() {
            return CompareResult::mismatch(format!(
                "{} does not match {}",
                self.name(),
                expected.name()
            ));
        }

        if self.absolute_path() != expected.absolute_path() {
            return CompareResult::mismatch(format!(
                "{} does not match {}",
                self.absolute_path().display(),
                expected.absolute_path().display()
            ));
        }

        if self.kind() != expected.kind() {
            return CompareResult::mismatch(format!(
                "{} does not match {}",
                self.kind(),
                expected.kind()
            ));
        }

        if expected.ignores_children() {
            debug!(
                "Skipping children of {}",
                expected.absolute_path().display()
            );
            return CompareResult::matched();
        }

        let mut unvisited: Vec<&SchemaNode> = expected.children().iter().collect();

        for child in self.children() {
            let Some(expected_child) = expected
                .children()
                .iter()
                .find(|candidate| candidate.name() == child.name())
            else {
                if options.strict {
                    return CompareResult::mismatch(format!(
                        "Unexpected {} {}",
                        child.kind(),
                        child.absolute_path().display()
                    ));
                }
                debug!(
                    "Tolerating unexpected {} {}",
                    child.kind(),
                    child.absolute_path().display()
                );
                continue;
            };

            let result = child.equals(expected_child, options);
            if !result.success {
                return result;
            }

            unvisited.retain(|candidate| candidate.name() != child.name());
        }

        unvisited.retain(|candidate| !candidate.is_optional());

        if unvisited.is_empty() {
            return CompareResult::matched();
        }

        let reason = unvisited
            .iter()
            .map(|missing| {
                format!(
                    "Can not find {} {}",
                    missing.kind(),
                    missing.absolute_path().display()
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        CompareResult::mismatch(reason)
    }
}
