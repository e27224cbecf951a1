//! Permissive input models for authored YAML issue records.
//!
//! These mirror the authoring schema: `rationale`, `should_flag`, and a list
//! of occurrences whose `files` values stay as raw JSON values until the
//! normalizer has checked their shape. Unknown fields are rejected at parse
//! time.

use serde::Deserialize;
use serde_json::Value as Json;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
/// Top-level authored record, one file per issue.
pub struct RawIssue {
    pub rationale: String,
    pub should_flag: bool,
    pub occurrences: Vec<RawOccurrence>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
/// One authored occurrence. `files` maps a path to a list of range specs
/// (line number, `[start, end]` pair, or `{start_line, end_line}` object) or
/// null for a whole-file reference.
pub struct RawOccurrence {
    pub files: BTreeMap<String, Option<Vec<Json>>>,
    #[serde(default)]
    pub note: Option<String>,
    /// Explicit detection sets for true positives (outer OR, inner AND).
    #[serde(default)]
    pub critic_scopes_expected_to_recall: Option<Vec<Vec<String>>>,
    /// Explicit relevance set for false positives.
    #[serde(default)]
    pub relevant_files: Option<Vec<String>>,
}
