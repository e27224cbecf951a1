//! Batch validation of issue record files.
//!
//! Expands the configured glob patterns to record files, runs the build
//! pipeline on each, and collects findings with a summary. Records carry no
//! cross-record state; per-file work runs in parallel and the output
//! ordering is made deterministic afterwards.

use crate::build;
use crate::models::canonical::Issue;
use crate::models::raw::RawIssue;
use crate::models::{Finding, Summary, ValidateResult};
use crate::utils;
use glob::glob;
use rayon::prelude::*;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Record ids are file stems: no colons, no leading punctuation.
static RECORD_ID_RE: OnceLock<Regex> = OnceLock::new();

fn record_id_re() -> &'static Regex {
    RECORD_ID_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("static regex"))
}

/// Run validation across files matched by the record patterns.
///
/// Every finding is an error: authoring problems have no soft-failure mode,
/// a record either validates cleanly or is rejected outright.
pub fn run_validate(repo_root: &str, patterns: &[String]) -> ValidateResult {
    let root = PathBuf::from(repo_root);
    let mut findings: Vec<Finding> = Vec::new();
    let targets = expand_patterns(&root, patterns, &mut findings);

    let per_file: Vec<Vec<Finding>> = targets
        .par_iter()
        .map(|path| build_record(&root, path).err().unwrap_or_default())
        .collect();
    findings.extend(per_file.into_iter().flatten());

    // Deterministic ordering of findings by file then message
    findings.sort_by(|a, b| a.file.cmp(&b.file).then(a.message.cmp(&b.message)));

    let errors = findings.iter().filter(|f| f.severity == "error").count();
    let warnings = findings.iter().filter(|f| f.severity == "warning").count();
    let infos = findings.len() - errors - warnings;
    ValidateResult {
        findings,
        summary: Summary {
            errors,
            warnings,
            infos,
            files: targets.len(),
        },
    }
}

/// Expand glob patterns relative to the root into a sorted, deduplicated
/// file list. Bad patterns become findings rather than aborting the batch.
pub fn expand_patterns(
    root: &Path,
    patterns: &[String],
    findings: &mut Vec<Finding>,
) -> Vec<PathBuf> {
    let mut targets: BTreeSet<PathBuf> = BTreeSet::new();
    for pat in patterns {
        let abs = root.join(pat);
        let pattern = abs.to_string_lossy().to_string();
        match glob(&pattern) {
            Ok(paths) => {
                for entry in paths.flatten() {
                    if entry.is_file() {
                        targets.insert(entry);
                    }
                }
            }
            Err(e) => findings.push(Finding {
                file: pat.clone(),
                rule: "bad-pattern".into(),
                severity: "error".into(),
                message: format!("Invalid record pattern: {e}"),
            }),
        }
    }
    targets.into_iter().collect()
}

/// Load, parse, and build one record file.
///
/// Returns the canonical issue when the record is clean, otherwise every
/// finding for the file (an invalid id and an invalid body both surface).
pub fn build_record(root: &Path, path: &Path) -> Result<Issue, Vec<Finding>> {
    let display = utils::rel_display(root, path);
    let mut findings = Vec::new();

    if let Some(finding) = check_record_id(&display, path) {
        findings.push(finding);
    }

    let built = match fs::read_to_string(path) {
        Ok(data) => match serde_yaml::from_str::<RawIssue>(&data) {
            Ok(raw) => match build::build_issue(&raw) {
                Ok(issue) => Some(issue),
                Err(e) => {
                    findings.push(Finding {
                        file: display.clone(),
                        rule: e.kind().into(),
                        severity: "error".into(),
                        message: e.to_string(),
                    });
                    None
                }
            },
            Err(e) => {
                findings.push(Finding {
                    file: display.clone(),
                    rule: "parse-record".into(),
                    severity: "error".into(),
                    message: format!("Record is not a valid issue document: {e}"),
                });
                None
            }
        },
        Err(e) => {
            findings.push(Finding {
                file: display.clone(),
                rule: "load-record".into(),
                severity: "error".into(),
                message: format!("Record file could not be read: {e}"),
            });
            None
        }
    };

    match built {
        Some(issue) if findings.is_empty() => Ok(issue),
        _ => Err(findings),
    }
}

fn check_record_id(display: &str, path: &Path) -> Option<Finding> {
    let stem = path.file_stem()?.to_string_lossy();
    if record_id_re().is_match(&stem) {
        return None;
    }
    Some(Finding {
        file: display.to_string(),
        rule: "record-id".into(),
        severity: "error".into(),
        message: format!(
            "Record id '{stem}' is not a valid issue id (letters, digits, '._-', no leading punctuation)"
        ),
    })
}
