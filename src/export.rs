//! Canonical record export.
//!
//! Builds each record and writes its fully-normalized canonical JSON form
//! under the output directory, mirroring the record's path relative to the
//! repository root with a `.json` extension. Targets whose content
//! fingerprint already matches are skipped; `--check` detects drift without
//! writing.
//!
//! Records that fail to build are reported as findings and produce no
//! target; a partial canonical record is never written.

use crate::models::canonical::Issue;
use crate::models::Finding;
use crate::utils;
use crate::validate;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
/// Outcome of exporting one record.
pub struct ExportAction {
    pub record: String,
    pub target: String,
    pub wrote: bool,
    pub skipped: bool,
    pub would_write: bool,
}

/// Run export across files matched by the record patterns.
///
/// Returns the per-record actions plus findings for records that failed to
/// build. When `write` is false this is a pure preview.
pub fn run_export(
    repo_root: &str,
    patterns: &[String],
    out_dir: &str,
    write: bool,
) -> (Vec<ExportAction>, Vec<Finding>) {
    let root = PathBuf::from(repo_root);
    let out_root = root.join(out_dir);
    let mut findings: Vec<Finding> = Vec::new();
    let targets = validate::expand_patterns(&root, patterns, &mut findings);

    let per_file: Vec<Result<ExportAction, Vec<Finding>>> = targets
        .par_iter()
        .map(|path| {
            validate::build_record(&root, path)
                .map(|issue| emit(&root, &out_root, path, &issue, write))
        })
        .collect();

    let mut actions = Vec::new();
    for outcome in per_file {
        match outcome {
            Ok(action) => actions.push(action),
            Err(mut file_findings) => findings.append(&mut file_findings),
        }
    }
    findings.sort_by(|a, b| a.file.cmp(&b.file).then(a.message.cmp(&b.message)));
    (actions, findings)
}

fn emit(root: &Path, out_root: &Path, path: &Path, issue: &Issue, write: bool) -> ExportAction {
    let target = target_path(root, out_root, path);
    let record = utils::rel_display(root, path);
    let target_display = utils::rel_display(root, &target);

    let canonical = issue.to_canonical_json();
    let out_str = match serde_json::to_string_pretty(&canonical) {
        Ok(s) => s,
        Err(_) => canonical.to_string(),
    };

    // Compare fingerprints; identical content means nothing to do.
    let out_fp = utils::fingerprint(&out_str);
    let cur_fp = fs::read_to_string(&target).ok().map(|s| utils::fingerprint(&s));
    if cur_fp.as_deref() == Some(out_fp.as_str()) {
        return ExportAction {
            record,
            target: target_display,
            wrote: false,
            skipped: true,
            would_write: false,
        };
    }

    let mut wrote = false;
    if write {
        ensure_parent(&target);
        if fs::write(&target, out_str).is_ok() {
            wrote = true;
        }
    }
    ExportAction {
        record,
        target: target_display,
        wrote,
        skipped: false,
        would_write: true,
    }
}

/// Target mirrors the record's root-relative path with a `.json` extension.
fn target_path(root: &Path, out_root: &Path, path: &Path) -> PathBuf {
    let rel = path.strip_prefix(root).unwrap_or(path);
    out_root.join(rel).with_extension("json")
}

fn ensure_parent(path: &Path) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const RECORD: &str = r#"
rationale: "retry loop never backs off on repeated failures"
should_flag: true
occurrences:
  - files:
      worker.py: [[12, 30]]
"#;

    #[test]
    fn test_export_writes_canonical_target_then_skips() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        let specimens = root.join("specimens/demo");
        fs::create_dir_all(&specimens).unwrap();
        fs::write(specimens.join("retry-loop.yaml"), RECORD).unwrap();

        let patterns = vec!["specimens/**/*.yaml".to_string()];
        let (actions, findings) = run_export(root.to_str().unwrap(), &patterns, "canonical", true);
        assert!(findings.is_empty());
        assert_eq!(actions.len(), 1);
        assert!(actions[0].wrote);

        let target = root.join("canonical/specimens/demo/retry-loop.json");
        assert!(target.exists());
        let out: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
        assert_eq!(out["should_flag"], true);
        assert_eq!(
            out["occurrences"][0]["critic_scopes_expected_to_recall"][0][0],
            "worker.py"
        );

        // Second run: fingerprint matches, nothing to do.
        let (actions, _) = run_export(root.to_str().unwrap(), &patterns, "canonical", true);
        assert!(actions[0].skipped);
        assert!(!actions[0].wrote);
    }

    #[test]
    fn test_preview_reports_would_write_without_touching_disk() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join("rec.yaml"), RECORD).unwrap();

        let (actions, _) = run_export(
            root.to_str().unwrap(),
            &["*.yaml".to_string()],
            "canonical",
            false,
        );
        assert!(actions[0].would_write);
        assert!(!actions[0].wrote);
        assert!(!root.join("canonical/rec.json").exists());
    }

    #[test]
    fn test_failing_record_yields_finding_and_no_target() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        let record = r#"
rationale: "short"
should_flag: true
occurrences:
  - files:
      a.py: null
"#;
        fs::write(root.join("rec.yaml"), record).unwrap();
        let (actions, findings) = run_export(
            root.to_str().unwrap(),
            &["*.yaml".to_string()],
            "canonical",
            true,
        );
        assert!(actions.is_empty());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "rationale-length");
        assert!(!root.join("canonical/rec.json").exists());
    }

    #[test]
    fn test_rewrite_on_drift() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join("rec.yaml"), RECORD).unwrap();
        let patterns = vec!["*.yaml".to_string()];
        run_export(root.to_str().unwrap(), &patterns, "canonical", true);

        // Corrupt the target; the next run should notice and rewrite.
        fs::write(root.join("canonical/rec.json"), "{}").unwrap();
        let (actions, _) = run_export(root.to_str().unwrap(), &patterns, "canonical", true);
        assert!(actions[0].wrote);
        assert!(!actions[0].skipped);
    }
}
