//! Configuration discovery and effective settings resolution.
//!
//! Annota reads `annota.toml|yaml|yml` from the repository root (or closest
//! ancestor) and merges it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `records`: none (must be configured; validation refuses to guess)
//! - `output`: `human`
//! - `export.out_dir`: none (must be configured for `annota export`)
//! - `export.write`: false
//!
//! Overrides precedence: CLI > config file > defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// Export-related configuration section under `[export]`.
pub struct ExportCfg {
    pub out_dir: Option<String>,
    pub write: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `annota.toml|yaml`.
pub struct AnnotaConfig {
    /// Glob patterns selecting issue record files, relative to the root.
    pub records: Option<Vec<String>>,
    pub output: Option<String>,
    pub export: Option<ExportCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub records: Vec<String>,
    pub records_configured: bool,
    pub output: String,
    pub out_dir: Option<String>,
    pub write: bool,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when an `annota.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("annota.toml").exists()
            || cur.join("annota.yaml").exists()
            || cur.join("annota.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `AnnotaConfig` from `annota.toml` or `annota.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<AnnotaConfig> {
    let toml_path = root.join("annota.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: AnnotaConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["annota.yaml", "annota.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: AnnotaConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_records: &[String],
    cli_output: Option<&str>,
    cli_out_dir: Option<&str>,
    cli_write: Option<bool>,
) -> Effective {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let cfg = load_config(&repo_root).unwrap_or_default();

    let records_src = if cli_records.is_empty() {
        cfg.records
    } else {
        Some(cli_records.to_vec())
    };
    let (records, records_configured) = match records_src {
        Some(pats) if !pats.is_empty() => (pats, true),
        _ => (Vec::new(), false),
    };

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let out_dir = cli_out_dir
        .map(|s| s.to_string())
        .or_else(|| cfg.export.as_ref().and_then(|e| e.out_dir.clone()));

    let write = cli_write
        .or_else(|| cfg.export.as_ref().and_then(|e| e.write))
        .unwrap_or(false);

    Effective {
        repo_root,
        records,
        records_configured,
        output,
        out_dir,
        write,
    }
}
