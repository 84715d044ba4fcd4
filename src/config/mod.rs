mod schema_file;

pub use schema_file::{SchemaFile, SchemaFileError};
