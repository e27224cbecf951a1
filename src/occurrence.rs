//! Occurrence construction.
//!
//! Two entry points mirror how records are authored: a single occurrence
//! needs no note, while a multi-occurrence issue must explain every location
//! individually. The note check reports all offending indices at once.
//!
//! The output draft has normalized ranges but still carries the authored
//! detection/relevance fields verbatim; resolving those is the inferencer's
//! job.

use crate::error::{BuildError, Result};
use crate::models::canonical::FileRanges;
use crate::models::raw::RawOccurrence;
use crate::normalize;

/// A normalized occurrence whose kind-specific sets are not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccurrenceDraft {
    pub files: FileRanges,
    pub note: Option<String>,
    pub detection_sets: Option<Vec<Vec<String>>>,
    pub relevant_files: Option<Vec<String>>,
}

/// Build the sole occurrence of a single-occurrence issue. No note is
/// required; one given by the author is preserved.
pub fn build_single(raw: &RawOccurrence) -> Result<OccurrenceDraft> {
    from_raw(raw)
}

/// Build the occurrences of a multi-occurrence issue, preserving input
/// order. Every element must carry a note.
pub fn build_many(raws: &[RawOccurrence]) -> Result<Vec<OccurrenceDraft>> {
    let missing: Vec<usize> = raws
        .iter()
        .enumerate()
        .filter(|(_, r)| r.note.is_none())
        .map(|(i, _)| i)
        .collect();
    if !missing.is_empty() {
        return Err(BuildError::MissingNote { indices: missing });
    }
    raws.iter().map(from_raw).collect()
}

fn from_raw(raw: &RawOccurrence) -> Result<OccurrenceDraft> {
    Ok(OccurrenceDraft {
        files: normalize::normalize_files(&raw.files)?,
        note: raw.note.clone(),
        detection_sets: raw.critic_scopes_expected_to_recall.clone(),
        relevant_files: raw.relevant_files.clone(),
    })
}
