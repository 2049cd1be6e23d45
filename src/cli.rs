use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dto::{OutputFormat, ReportView};

/// Reconcile dependency license evidence and check compatibility and policy
#[derive(Parser, Debug)]
#[command(name = "license-reconciler")]
#[command(version)]
#[command(
    about = "Reconcile dependency license evidence and check compatibility and policy",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Full report: determinations, issues and license statistics
    Scan(ScanOptions),
    /// Dependency tree with the license of every package
    Tree(ScanOptions),
    /// Pairwise license compatibility matrix
    Matrix(ScanOptions),
}

#[derive(clap::Args, Debug, Clone)]
pub struct ScanOptions {
    /// Path to the project snapshot (JSON)
    pub snapshot: PathBuf,

    /// Output format: json or markdown
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (defaults to .license-reconciler.yml next to the snapshot)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Compatibility ruleset file replacing the built-in rules
    #[arg(long)]
    pub ruleset: Option<PathBuf>,

    /// Add a license to the allow-list. Can be specified multiple times
    #[arg(short, long = "allow", value_name = "LICENSE")]
    pub allow: Vec<String>,

    /// Ignore a package. Can be specified multiple times
    #[arg(short, long = "ignore", value_name = "PACKAGE")]
    pub ignore: Vec<String>,

    /// Do not expand dependencies deeper than this
    #[arg(long, value_name = "N")]
    pub max_depth: Option<u32>,

    /// Suppress progress output and the summary line
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parses the process arguments, leaving the exit status to the caller
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}

impl Command {
    pub fn view(&self) -> ReportView {
        match self {
            Command::Scan(_) => ReportView::Scan,
            Command::Tree(_) => ReportView::Tree,
            Command::Matrix(_) => ReportView::Matrix,
        }
    }

    pub fn options(&self) -> &ScanOptions {
        match self {
            Command::Scan(options) | Command::Tree(options) | Command::Matrix(options) => options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_scan_defaults() {
        let args = parse(&["license-reconciler", "scan", "snapshot.json"]);
        let options = args.command.options();

        assert_eq!(args.command.view(), ReportView::Scan);
        assert_eq!(options.snapshot, PathBuf::from("snapshot.json"));
        assert_eq!(options.format, OutputFormat::Json);
        assert!(options.output.is_none());
        assert!(options.allow.is_empty());
        assert!(options.max_depth.is_none());
        assert!(!options.quiet);
    }

    #[test]
    fn test_subcommands_map_to_views() {
        let tree = parse(&["license-reconciler", "tree", "s.json"]);
        let matrix = parse(&["license-reconciler", "matrix", "s.json"]);
        assert_eq!(tree.command.view(), ReportView::Tree);
        assert_eq!(matrix.command.view(), ReportView::Matrix);
    }

    #[test]
    fn test_repeated_allow_and_ignore() {
        let args = parse(&[
            "license-reconciler",
            "scan",
            "s.json",
            "--allow",
            "MIT",
            "-a",
            "Apache-2.0",
            "--ignore",
            "internal-tool",
            "--max-depth",
            "2",
            "--format",
            "md",
            "--quiet",
        ]);
        let options = args.command.options();

        assert_eq!(options.allow, vec!["MIT", "Apache-2.0"]);
        assert_eq!(options.ignore, vec!["internal-tool"]);
        assert_eq!(options.max_depth, Some(2));
        assert_eq!(options.format, OutputFormat::Markdown);
        assert!(options.quiet);
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        let result = Args::try_parse_from(["license-reconciler", "scan", "s.json", "-f", "yaml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_snapshot_is_required() {
        assert!(Args::try_parse_from(["license-reconciler", "scan"]).is_err());
    }
}
