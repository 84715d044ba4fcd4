//! Declare the expected shape of a directory, walk the real one, and check
//! that they agree.
//!
//! ```rust,ignore
//! use std::path::Path;
//! use folder_schema::{CompareOptions, dir, file, root_dir, validate};
//!
//! let expected = root_dir(Some(Path::new("testDir")))
//!     .add_children([
//!         dir("folder1").add_child(file("file1.1"))?,
//!         dir("folder3").mark_wildcard_children(),
//!         file("file4").mark_optional(),
//!     ])?;
//!
//! let result = validate("./testDir", &expected, CompareOptions::lenient()).await?;
//! assert!(result.is_success());
//! ```

#![allow(clippy::enum_variant_names)]

pub mod application;
pub mod cli;
pub mod config;
pub mod ext;
pub mod filesystem;
pub mod schema;
pub mod validation;

pub use filesystem::{TreeBuilder, WalkError};
pub use schema::{
    CompareOptions, CompareResult, NodeKind, SchemaError, SchemaNode, dir, file, link, root_dir,
};
pub use validation::{ValidationError, compare_walked, validate, validate_in};
