//! Line-range normalization.
//!
//! Authored records may write a range as a bare line number, a
//! `[start, end]` pair, or an object carrying `start_line` and optionally
//! `end_line`. Everything is reduced to the canonical
//! `LineRange { start_line, end_line }` form; any other shape is a
//! `MalformedRange` build error carrying the offending value.
//!
//! Normalization is pure and idempotent: feeding back an already-canonical
//! range yields the same range.

use crate::error::{BuildError, Result};
use crate::models::canonical::{FileRanges, LineRange};
use serde_json::Value as Json;
use std::collections::BTreeMap;

/// Normalize every range list in a raw file map. A `null` value passes
/// through unchanged (whole-file reference, no specific lines).
pub fn normalize_files(raw: &BTreeMap<String, Option<Vec<Json>>>) -> Result<FileRanges> {
    let mut out = FileRanges::new();
    for (file, specs) in raw {
        let ranges = match specs {
            None => None,
            Some(specs) => Some(normalize_ranges(file, specs)?),
        };
        out.insert(file.clone(), ranges);
    }
    Ok(out)
}

/// Normalize a list of range specs for one file, element-wise.
pub fn normalize_ranges(file: &str, specs: &[Json]) -> Result<Vec<LineRange>> {
    specs.iter().map(|s| normalize_range(file, s)).collect()
}

/// Normalize one range spec for one file.
pub fn normalize_range(file: &str, spec: &Json) -> Result<LineRange> {
    match spec {
        Json::Number(_) => {
            let line = as_line(spec).ok_or_else(|| malformed(file, spec))?;
            Ok(LineRange {
                start_line: line,
                end_line: None,
            })
        }
        Json::Array(items) => {
            if items.len() != 2 {
                return Err(malformed(file, spec));
            }
            let start = as_line(&items[0]).ok_or_else(|| malformed(file, spec))?;
            let end = as_line(&items[1]).ok_or_else(|| malformed(file, spec))?;
            if end < start {
                return Err(malformed(file, spec));
            }
            Ok(LineRange {
                start_line: start,
                end_line: Some(end),
            })
        }
        Json::Object(map) => {
            // Only the canonical keys are accepted.
            if map.keys().any(|k| k != "start_line" && k != "end_line") {
                return Err(malformed(file, spec));
            }
            let start = map
                .get("start_line")
                .and_then(|v| as_line(v))
                .ok_or_else(|| malformed(file, spec))?;
            let end = match map.get("end_line") {
                None | Some(Json::Null) => None,
                Some(v) => Some(as_line(v).ok_or_else(|| malformed(file, spec))?),
            };
            if let Some(end) = end {
                if end < start {
                    return Err(malformed(file, spec));
                }
            }
            Ok(LineRange {
                start_line: start,
                end_line: end,
            })
        }
        _ => Err(malformed(file, spec)),
    }
}

/// A 1-based line number: a positive integer that fits in u32.
fn as_line(v: &Json) -> Option<u32> {
    let n = v.as_u64()?;
    if n == 0 {
        return None;
    }
    u32::try_from(n).ok()
}

fn malformed(file: &str, spec: &Json) -> BuildError {
    BuildError::MalformedRange {
        file: file.to_string(),
        value: spec.to_string(),
    }
}
