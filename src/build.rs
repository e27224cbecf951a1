//! Issue assembly: the final stage of the build pipeline.
//!
//! Takes one raw record and produces the canonical `Issue`, or the first
//! build error encountered. Stages run in dependency order: occurrence
//! construction (notes, then ranges), the rationale window, then
//! detection/relevance resolution under the issue-level file-union rule.
//!
//! The union rule is the subtle part: once the union of file keys across all
//! occurrences has more than one element, every occurrence needs an explicit
//! set, even an occurrence that alone touches a single file.

use crate::detection;
use crate::error::{BuildError, Result};
use crate::models::canonical::Issue;
use crate::models::raw::RawIssue;
use crate::occurrence::{self, OccurrenceDraft};
use std::collections::BTreeSet;

const RATIONALE_MIN: usize = 10;
const RATIONALE_MAX: usize = 5000;

/// Build and validate one issue record. Fail-fast: no partial record is ever
/// produced.
pub fn build_issue(raw: &RawIssue) -> Result<Issue> {
    let drafts = if raw.occurrences.len() == 1 {
        vec![occurrence::build_single(&raw.occurrences[0])?]
    } else {
        occurrence::build_many(&raw.occurrences)?
    };

    check_rationale(&raw.rationale)?;

    let require_explicit = file_union(&drafts).len() > 1;
    if raw.should_flag {
        let occurrences = drafts
            .into_iter()
            .map(|d| detection::resolve_true_positive(d, require_explicit))
            .collect::<Result<Vec<_>>>()?;
        Ok(Issue::TruePositive {
            rationale: raw.rationale.clone(),
            occurrences,
        })
    } else {
        let occurrences = drafts
            .into_iter()
            .map(|d| detection::resolve_false_positive(d, require_explicit))
            .collect::<Result<Vec<_>>>()?;
        Ok(Issue::FalsePositive {
            rationale: raw.rationale.clone(),
            occurrences,
        })
    }
}

/// The rationale window is measured on trimmed text; the authored string is
/// emitted untouched.
fn check_rationale(rationale: &str) -> Result<()> {
    let length = rationale.trim().chars().count();
    if !(RATIONALE_MIN..=RATIONALE_MAX).contains(&length) {
        return Err(BuildError::RationaleLength { length });
    }
    Ok(())
}

fn file_union(drafts: &[OccurrenceDraft]) -> BTreeSet<&str> {
    drafts
        .iter()
        .flat_map(|d| d.files.keys().map(String::as_str))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::raw::RawOccurrence;
    use serde_json::{json, Value as Json};
    use std::collections::BTreeMap;

    fn files(entries: &[(&str, Option<Vec<Json>>)]) -> BTreeMap<String, Option<Vec<Json>>> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn occ(files: BTreeMap<String, Option<Vec<Json>>>, note: Option<&str>) -> RawOccurrence {
        RawOccurrence {
            files,
            note: note.map(|s| s.to_string()),
            critic_scopes_expected_to_recall: None,
            relevant_files: None,
        }
    }

    fn issue(should_flag: bool, occurrences: Vec<RawOccurrence>) -> RawIssue {
        RawIssue {
            rationale: "a rationale long enough to pass".into(),
            should_flag,
            occurrences,
        }
    }

    #[test]
    fn test_single_file_single_occurrence_infers_detection() {
        // {'a.py': [[10, 20]]}, no explicit set: succeeds with {{'a.py'}}
        let raw = issue(
            true,
            vec![occ(files(&[("a.py", Some(vec![json!([10, 20])]))]), None)],
        );
        let built = build_issue(&raw).unwrap();
        let out = built.to_canonical_json();
        assert_eq!(
            out["occurrences"][0]["critic_scopes_expected_to_recall"],
            json!([["a.py"]])
        );
        assert_eq!(out["occurrences"][0]["files"]["a.py"][0]["end_line"], 20);
    }

    #[test]
    fn test_two_files_single_occurrence_requires_explicit_sets() {
        let raw = issue(
            true,
            vec![occ(
                files(&[
                    ("a.py", Some(vec![json!([1, 1])])),
                    ("b.py", Some(vec![json!([2, 2])])),
                ]),
                None,
            )],
        );
        let err = build_issue(&raw).unwrap_err();
        assert_eq!(
            err,
            BuildError::MissingDetectionSet {
                files: vec!["a.py".into(), "b.py".into()]
            }
        );
    }

    #[test]
    fn test_issue_level_union_disables_inference() {
        // Two occurrences, each single-file but over different files. The
        // union has two elements, so the first occurrence (no explicit set)
        // fails even though it would infer cleanly in isolation.
        let raw = issue(
            true,
            vec![
                occ(files(&[("a.py", None)]), Some("definition site")),
                {
                    let mut o = occ(files(&[("b.py", None)]), Some("call site"));
                    o.critic_scopes_expected_to_recall = Some(vec![vec!["b.py".into()]]);
                    o
                },
            ],
        );
        let err = build_issue(&raw).unwrap_err();
        assert_eq!(
            err,
            BuildError::MissingDetectionSet {
                files: vec!["a.py".into()]
            }
        );
    }

    #[test]
    fn test_issue_level_union_satisfied_by_explicit_sets() {
        let raw = issue(
            true,
            vec![
                {
                    let mut o = occ(files(&[("a.py", None)]), Some("definition site"));
                    o.critic_scopes_expected_to_recall = Some(vec![vec!["a.py".into()]]);
                    o
                },
                {
                    let mut o = occ(files(&[("b.py", None)]), Some("call site"));
                    o.critic_scopes_expected_to_recall = Some(vec![vec!["b.py".into()]]);
                    o
                },
            ],
        );
        assert!(build_issue(&raw).is_ok());
    }

    #[test]
    fn test_fp_relevant_files_default_to_file_keys() {
        // {'x.py': null} with no relevant_files: defaults to {'x.py'}
        let raw = issue(false, vec![occ(files(&[("x.py", None)]), None)]);
        let built = build_issue(&raw).unwrap();
        let out = built.to_canonical_json();
        assert_eq!(out["should_flag"], false);
        assert_eq!(out["occurrences"][0]["relevant_files"], json!(["x.py"]));
        assert_eq!(out["occurrences"][0]["files"]["x.py"], Json::Null);
    }

    #[test]
    fn test_fp_issue_level_union_requires_explicit_relevance() {
        let raw = issue(
            false,
            vec![
                occ(files(&[("x.py", None)]), Some("first")),
                occ(files(&[("y.py", None)]), Some("second")),
            ],
        );
        let err = build_issue(&raw).unwrap_err();
        assert!(matches!(err, BuildError::MissingDetectionSet { .. }));
    }

    #[test]
    fn test_malformed_range_propagates() {
        let raw = issue(
            true,
            vec![occ(files(&[("a.py", Some(vec![json!([38])]))]), None)],
        );
        let err = build_issue(&raw).unwrap_err();
        assert!(matches!(err, BuildError::MalformedRange { .. }));
    }

    #[test]
    fn test_missing_notes_reported_before_detection() {
        let raw = issue(
            true,
            vec![
                occ(files(&[("a.py", None)]), None),
                occ(files(&[("b.py", None)]), Some("noted")),
                occ(files(&[("c.py", None)]), None),
            ],
        );
        let err = build_issue(&raw).unwrap_err();
        assert_eq!(err, BuildError::MissingNote { indices: vec![0, 2] });
    }

    #[test]
    fn test_rationale_window_boundaries() {
        let mut raw = issue(true, vec![occ(files(&[("a.py", None)]), None)]);

        raw.rationale = "a".repeat(10);
        assert!(build_issue(&raw).is_ok());

        raw.rationale = "a".repeat(9);
        assert_eq!(
            build_issue(&raw).unwrap_err(),
            BuildError::RationaleLength { length: 9 }
        );

        raw.rationale = "a".repeat(5000);
        assert!(build_issue(&raw).is_ok());

        raw.rationale = "a".repeat(5001);
        assert_eq!(
            build_issue(&raw).unwrap_err(),
            BuildError::RationaleLength { length: 5001 }
        );
    }

    #[test]
    fn test_rationale_measured_after_trim() {
        let mut raw = issue(true, vec![occ(files(&[("a.py", None)]), None)]);
        raw.rationale = format!("   {}   ", "a".repeat(9));
        assert_eq!(
            build_issue(&raw).unwrap_err(),
            BuildError::RationaleLength { length: 9 }
        );
        // the emitted rationale keeps the authored surrounding whitespace
        raw.rationale = format!("  {}  ", "a".repeat(10));
        let built = build_issue(&raw).unwrap();
        assert!(built.rationale().starts_with("  "));
    }
}
