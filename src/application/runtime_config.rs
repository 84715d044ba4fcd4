use std::path::PathBuf;

use crate::cli::Cli;
use crate::schema::CompareOptions;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub target: PathBuf,
    pub schema: PathBuf,
    pub lenient: bool,
    pub print_tree: bool,
}

impl RuntimeConfig {
    /// `--lenient` wins over the schema file, which wins over strict matching.
    pub fn compare_options(&self, schema_strict: Option<bool>) -> CompareOptions {
        if self.lenient {
            return CompareOptions::lenient();
        }
        match schema_strict {
            Some(strict) => CompareOptions { strict },
            None => CompareOptions::default(),
        }
    }
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            target: cli.target,
            schema: cli.schema,
            lenient: cli.lenient,
            print_tree: cli.print_tree,
        }
    }
}
