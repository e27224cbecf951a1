//! Detection-set inference and validation.
//!
//! True positives carry a testable claim: "a competent reviewer given these
//! files would be expected to find this issue." That claim is inferred only
//! in the unambiguous case (exactly one file, `require_explicit` off);
//! otherwise the author must commit to explicit file combinations. Explicit
//! sets must be non-empty and may only name files of the occurrence.
//!
//! False positives carry an advisory relevance set instead: it defaults to
//! every file of the occurrence, and a supplied set is only checked for
//! non-emptiness.

use crate::error::{BuildError, Result};
use crate::models::canonical::{
    DetectionSet, FalsePositiveOccurrence, TruePositiveOccurrence,
};
use crate::occurrence::OccurrenceDraft;
use std::collections::BTreeSet;

/// Resolve a draft into a true-positive occurrence.
///
/// `require_explicit` disables single-file inference; the issue builder sets
/// it when the issue as a whole spans more than one file.
pub fn resolve_true_positive(
    draft: OccurrenceDraft,
    require_explicit: bool,
) -> Result<TruePositiveOccurrence> {
    let detection_sets = match &draft.detection_sets {
        None => infer_detection_sets(&draft, require_explicit)?,
        Some(groups) => validate_detection_sets(&draft, groups)?,
    };
    Ok(TruePositiveOccurrence {
        files: draft.files,
        note: draft.note,
        detection_sets,
    })
}

/// Resolve a draft into a false-positive occurrence.
pub fn resolve_false_positive(
    draft: OccurrenceDraft,
    require_explicit: bool,
) -> Result<FalsePositiveOccurrence> {
    let relevant_files = match &draft.relevant_files {
        None => {
            if require_explicit {
                return Err(missing(&draft));
            }
            draft.files.keys().cloned().collect()
        }
        Some(files) => {
            if files.is_empty() {
                return Err(BuildError::EmptyDetectionSet);
            }
            // Relevance is advisory, so no subset constraint here.
            files.iter().cloned().collect()
        }
    };
    Ok(FalsePositiveOccurrence {
        files: draft.files,
        note: draft.note,
        relevant_files,
    })
}

fn infer_detection_sets(draft: &OccurrenceDraft, require_explicit: bool) -> Result<DetectionSet> {
    if require_explicit || draft.files.len() != 1 {
        return Err(missing(draft));
    }
    // Single file, unambiguous: that file alone suffices.
    let only = draft.files.keys().next().cloned().unwrap_or_default();
    Ok(BTreeSet::from([BTreeSet::from([only])]))
}

fn validate_detection_sets(draft: &OccurrenceDraft, groups: &[Vec<String>]) -> Result<DetectionSet> {
    if groups.is_empty() {
        return Err(BuildError::EmptyDetectionSet);
    }
    let mut out = DetectionSet::new();
    for group in groups {
        if group.is_empty() {
            return Err(BuildError::EmptyDetectionSet);
        }
        for path in group {
            if !draft.files.contains_key(path) {
                return Err(BuildError::DetectionSetNotSubset { file: path.clone() });
            }
        }
        out.insert(group.iter().cloned().collect());
    }
    Ok(out)
}

fn missing(draft: &OccurrenceDraft) -> BuildError {
    BuildError::MissingDetectionSet {
        files: draft.files.keys().cloned().collect(),
    }
}
