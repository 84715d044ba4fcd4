use std::env;
use std::path::Path;

use colored::Colorize;
use snafu::Snafu;
use snafu::prelude::*;
use tracing::debug;

use crate::application::RuntimeConfig;
use crate::config::{SchemaFile, SchemaFileError};
use crate::filesystem::{TreeBuilder, WalkError};
use crate::schema::CompareResult;
use crate::validation::compare_walked;

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        debug!("Runtime config: {:?}", app_config);

        let schema_file = SchemaFile::read(&app_config.schema)
            .await
            .context(SchemaFileSnafu)?;
        let options = app_config.compare_options(schema_file.strict);
        let expected = schema_file
            .into_schema(&app_config.target)
            .context(SchemaFileSnafu)?;

        let cwd = env::current_dir().context(CurrentDirSnafu)?;
        let actual = TreeBuilder::build_in(&cwd, &app_config.target)
            .await
            .context(TreeSnafu)?;
        if app_config.print_tree {
            println!("{}", actual.to_json().context(SnapshotSnafu)?);
        }

        let result = compare_walked(&cwd, &actual, &expected, options);
        Self::print_verdict(&app_config.target, &result);

        match result.reason {
            None => Ok(()),
            Some(reason) => MismatchSnafu { reason }.fail(),
        }
    }

    fn print_verdict(target: &Path, result: &CompareResult) {
        if result.is_success() {
            println!(
                "{} {} matches the schema",
                "✓".green().bold(),
                target.display()
            );
        } else {
            println!(
                "{} {} does not match the schema",
                "✗".red().bold(),
                target.display()
            );
            if let Some(reason) = &result.reason {
                for line in reason.lines() {
                    println!("  {}", line.red());
                }
            }
        }
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading the schema"))]
    SchemaFileError { source: SchemaFileError },
    #[snafu(display("Critical failure encountered while walking the target"))]
    TreeError { source: WalkError },
    #[snafu(display("Failed to serialize the walked tree"))]
    SnapshotError { source: serde_json::Error },
    #[snafu(display("Failed to obtain current dir"))]
    CurrentDirError { source: std::io::Error },
    #[snafu(display("Directory layout does not match the schema"))]
    MismatchError { reason: String },
}
