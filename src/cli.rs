//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "annota",
    version,
    about = "Annota (Rust + YAML)",
    long_about = "Annota — a tiny, fast CLI to validate and export issue-annotation records for snapshot corpora.\n\nConfiguration precedence: CLI > annota.toml > defaults.",
    after_help = "Examples:\n  annota validate --records 'specimens/**/*.yaml'\n  annota validate --output json\n  annota export --out-dir canonical --check\n  annota export --out-dir canonical --write",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for validating and exporting records.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current annota version."
    )]
    Version,
    /// Validate issue records
    #[command(
        about = "Run record validation",
        long_about = "Parse, normalize, and validate every issue record matched by the configured patterns. Any finding is an authoring error and fails the run.",
        after_help = "Examples:\n  annota validate --records 'specimens/**/*.yaml'\n  annota validate --output json"
    )]
    Validate {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Glob pattern for record files (repeatable)")]
        records: Vec<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Export canonical records
    #[command(
        about = "Export canonical records",
        long_about = "Build every record and write its fully-normalized canonical JSON form under the output directory, ready for ingestion. Unchanged targets are skipped by content fingerprint.",
        after_help = "Examples:\n  annota export --out-dir canonical --dry-run\n  annota export --out-dir canonical --write"
    )]
    Export {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Glob pattern for record files (repeatable)")]
        records: Vec<String>,
        #[arg(long, help = "Directory for canonical JSON output")]
        out_dir: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Apply changes to disk (disabled if --dry-run/--check)")]
        write: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Preview planned writes without changing files")]
        dry_run: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero if changes would occur")]
        check: bool,
    },
}
