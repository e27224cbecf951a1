//! Canonical issue record types: the fully normalized, validated output
//! handed to the external storage/ingestion side.
//!
//! Shapes:
//! - `LineRange`: 1-based inclusive bounds; `end_line == None` anchors a
//!   single line.
//! - `FileRanges`: file path → ranges, where `None` marks the whole file as
//!   relevant with no specific lines.
//! - `DetectionSet`: alternative file groups; the outer set is OR-combined,
//!   each inner group is AND-combined.
//!
//! Records are built once and never mutated afterwards; the dataset treats
//! them as frozen once written.

use serde::Serialize;
use serde_json::{json, Value as Json};
use std::collections::{BTreeMap, BTreeSet};

/// One line range inside a file, 1-based and inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRange {
    pub start_line: u32,
    pub end_line: Option<u32>,
}

impl LineRange {
    /// Compact display form, `123` or `123-145`.
    pub fn format(&self) -> String {
        match self.end_line {
            Some(end) => format!("{}-{}", self.start_line, end),
            None => self.start_line.to_string(),
        }
    }
}

/// File path → line ranges; `None` means the whole file is relevant.
pub type FileRanges = BTreeMap<String, Option<Vec<LineRange>>>;

/// Alternative file groups sufficient for detection (OR of ANDs).
pub type DetectionSet = BTreeSet<BTreeSet<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One located instance of a true-positive issue.
///
/// `detection_sets` states from which file combinations a competent reviewer
/// is expected to find the issue. The wire name is the reviewer-scope form
/// used by the grading side.
pub struct TruePositiveOccurrence {
    pub files: FileRanges,
    pub note: Option<String>,
    #[serde(rename = "critic_scopes_expected_to_recall")]
    pub detection_sets: DetectionSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One located instance of a false-positive exemplar.
///
/// `relevant_files` is advisory: graders reviewing any of these files are
/// shown the exemplar. It is not a detectability claim.
pub struct FalsePositiveOccurrence {
    pub files: FileRanges,
    pub note: Option<String>,
    pub relevant_files: BTreeSet<String>,
}

/// A canonical issue record, tagged by kind.
///
/// `should_flag` is derived from the tag: true positives should be flagged
/// by a reviewer, false positives should not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    TruePositive {
        rationale: String,
        occurrences: Vec<TruePositiveOccurrence>,
    },
    FalsePositive {
        rationale: String,
        occurrences: Vec<FalsePositiveOccurrence>,
    },
}

impl Issue {
    pub fn should_flag(&self) -> bool {
        matches!(self, Issue::TruePositive { .. })
    }

    pub fn rationale(&self) -> &str {
        match self {
            Issue::TruePositive { rationale, .. } => rationale,
            Issue::FalsePositive { rationale, .. } => rationale,
        }
    }

    /// Union of file keys across all occurrences.
    pub fn file_union(&self) -> BTreeSet<String> {
        let mut union = BTreeSet::new();
        match self {
            Issue::TruePositive { occurrences, .. } => {
                for occ in occurrences {
                    union.extend(occ.files.keys().cloned());
                }
            }
            Issue::FalsePositive { occurrences, .. } => {
                for occ in occurrences {
                    union.extend(occ.files.keys().cloned());
                }
            }
        }
        union
    }

    /// Canonical JSON form for the ingestion boundary: same shape as the
    /// authored record, with every range normalized and every inferred set
    /// made explicit.
    pub fn to_canonical_json(&self) -> Json {
        match self {
            Issue::TruePositive {
                rationale,
                occurrences,
            } => json!({
                "rationale": rationale,
                "should_flag": true,
                "occurrences": occurrences,
            }),
            Issue::FalsePositive {
                rationale,
                occurrences,
            } => json!({
                "rationale": rationale,
                "should_flag": false,
                "occurrences": occurrences,
            }),
        }
    }
}
