use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Validates a directory layout against a YAML schema.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// The directory to validate
    pub target: PathBuf,

    /// YAML file declaring the expected layout
    #[clap(long, short)]
    pub schema: PathBuf,

    /// Tolerate entries the schema does not declare
    #[clap(long)]
    pub lenient: bool,

    /// Print the walked tree as JSON before validating
    #[clap(long)]
    pub print_tree: bool,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn parses_minimal_arguments() {
        let cli = Cli::try_parse_from(["folder-schema", "out", "--schema", "layout.yaml"])
            .expect("Arguments should parse");

        assert_eq!(cli.target, PathBuf::from("out"));
        assert_eq!(cli.schema, PathBuf::from("layout.yaml"));
        assert!(!cli.lenient);
        assert!(!cli.print_tree);
        assert_eq!(cli.log_level, LogLevel::Warn);
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "folder-schema",
            "out",
            "-s",
            "layout.yaml",
            "--lenient",
            "--print-tree",
            "-l",
            "debug",
        ])
        .expect("Arguments should parse");

        assert!(cli.lenient);
        assert!(cli.print_tree);
        assert_eq!(cli.log_level, LogLevel::Debug);
    }

    #[test]
    fn target_is_described_as_a_directory() {
        let command = Cli::command();
        let target = command
            .get_arguments()
            .find(|arg| arg.get_id() == "target")
            .expect("Target argument should exist");

        assert_eq!(
            target.get_help().map(ToString::to_string).as_deref(),
            Some("The directory to validate")
        );
    }

    #[test]
    fn schema_is_required() {
        assert!(Cli::try_parse_from(["folder-schema", "out"]).is_err());
    }
}
