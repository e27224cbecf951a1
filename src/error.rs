//! Build-time validation errors for issue records.
//!
//! Every variant is an authoring error: the record is rejected outright and
//! the message carries enough context (offending value, indices, file names,
//! measured lengths) to fix the source file. Nothing here is retried or
//! recovered from.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A range entry is not a line number, a `[start, end]` pair, or a
    /// `{start_line, end_line}` object with 1-based, ordered bounds.
    #[error("malformed line range {value} for '{file}': expected a line number, [start, end], or {{start_line, end_line}}")]
    MalformedRange { file: String, value: String },

    /// A multi-occurrence issue has occurrences without a `note`. Indices are
    /// 0-based and cover every offending occurrence, not just the first.
    #[error("occurrences {indices:?} are missing a note; every occurrence of a multi-occurrence issue needs one")]
    MissingNote { indices: Vec<usize> },

    /// The issue spans more than one file and the occurrence gives no
    /// explicit detection sets (or relevant files, for a false positive).
    #[error("occurrence over files {files:?} needs explicit detection sets; which file combinations suffice cannot be inferred")]
    MissingDetectionSet { files: Vec<String> },

    /// A detection-set group names a file the occurrence does not contain.
    #[error("detection set names '{file}', which is not among the occurrence's files")]
    DetectionSetNotSubset { file: String },

    /// A detection set (or one of its groups) is explicitly empty.
    #[error("empty detection set: at least one non-empty file group is required")]
    EmptyDetectionSet,

    /// Rationale text outside the 10..=5000 character window after trimming.
    #[error("rationale must be 10..=5000 characters after trimming, got {length}")]
    RationaleLength { length: usize },
}

impl BuildError {
    /// Stable rule id used in findings output.
    pub fn kind(&self) -> &'static str {
        match self {
            BuildError::MalformedRange { .. } => "malformed-range",
            BuildError::MissingNote { .. } => "missing-note",
            BuildError::MissingDetectionSet { .. } => "missing-detection-set",
            BuildError::DetectionSetNotSubset { .. } => "detection-set-not-subset",
            BuildError::EmptyDetectionSet => "empty-detection-set",
            BuildError::RationaleLength { .. } => "rationale-length",
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let e = BuildError::MissingNote { indices: vec![0, 2] };
        assert!(e.to_string().contains("[0, 2]"));
        let e = BuildError::RationaleLength { length: 9 };
        assert!(e.to_string().contains("got 9"));
        let e = BuildError::MalformedRange {
            file: "a.py".into(),
            value: "[38]".into(),
        };
        assert!(e.to_string().contains("[38]"));
        assert!(e.to_string().contains("a.py"));
    }

    #[test]
    fn test_kinds_are_stable() {
        assert_eq!(BuildError::EmptyDetectionSet.kind(), "empty-detection-set");
        assert_eq!(
            BuildError::DetectionSetNotSubset { file: "b.py".into() }.kind(),
            "detection-set-not-subset"
        );
    }
}
