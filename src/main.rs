//! Annota CLI binary entry point.
//! Delegates to modules for validate/export and prints results.

mod build;
mod cli;
mod config;
mod detection;
mod error;
mod export;
mod models;
mod normalize;
mod occurrence;
mod output;
mod utils;
mod validate;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Validate {
            repo_root,
            records,
            output,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                &records,
                output.as_deref(),
                None,
                None,
            );
            // Require record patterns to be configured (no default)
            if !eff.records_configured {
                eprintln!(
                    "{} {}",
                    crate::utils::error_prefix(),
                    "Records are not configured. Pass --records or add annota.toml."
                );
                std::process::exit(2);
            }
            // Friendly note if no annota config was found
            if config::load_config(&eff.repo_root).is_none() {
                eprintln!(
                    "{} {}",
                    crate::utils::note_prefix(),
                    "No annota.toml found; using defaults."
                );
            }
            if eff.output != "json" {
                let joined = format!("[{}]", eff.records.join(", "));
                eprintln!(
                    "{} {}",
                    crate::utils::info_prefix(),
                    format!("Validating records matching: {}", joined)
                );
            }
            let repo_root_str = eff.repo_root.to_string_lossy().to_string();
            let result = validate::run_validate(&repo_root_str, &eff.records);
            output::print_validate(&result, &eff.output);
            if result.summary.errors > 0 {
                std::process::exit(1);
            }
        }
        Commands::Export {
            repo_root,
            records,
            out_dir,
            output,
            write,
            dry_run,
            check,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                &records,
                output.as_deref(),
                out_dir.as_deref(),
                if write { Some(true) } else { None },
            );
            if !eff.records_configured {
                eprintln!(
                    "{} {}",
                    crate::utils::error_prefix(),
                    "Records are not configured. Pass --records or add annota.toml."
                );
                std::process::exit(2);
            }
            let out_dir = match eff.out_dir.as_deref() {
                Some(d) => d.to_string(),
                None => {
                    eprintln!(
                        "{} {}",
                        crate::utils::error_prefix(),
                        "Output directory is not configured. Pass --out-dir or add [export] out_dir to annota.toml."
                    );
                    std::process::exit(2);
                }
            };
            if config::load_config(&eff.repo_root).is_none() {
                eprintln!(
                    "{} {}",
                    crate::utils::note_prefix(),
                    "No annota.toml found; using defaults."
                );
            }
            // CLI/config precedence at runtime:
            // - If dry-run or check is enabled, force write=false for this run.
            // - Otherwise respect write.
            let eff_write = if dry_run || check { false } else { eff.write };
            let repo_root_str = eff.repo_root.to_string_lossy().to_string();
            let (actions, findings) =
                export::run_export(&repo_root_str, &eff.records, &out_dir, eff_write);
            output::print_export(&actions, &eff.output, &findings);
            // In check mode, exit non-zero when any action would write;
            // a record that failed to build always fails the run.
            if !findings.is_empty() {
                std::process::exit(1);
            }
            if check && actions.iter().any(|a| a.would_write) {
                std::process::exit(1);
            }
        }
    }
}
