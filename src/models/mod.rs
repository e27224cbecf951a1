//! Shared data models for validate/export outputs and record schemas.

pub mod canonical;
pub mod raw;

use serde::Serialize;

#[derive(Serialize, Debug)]
/// A single validation finding with severity and source record.
pub struct Finding {
    pub file: String,
    pub rule: String,
    pub severity: String,
    pub message: String,
}

#[derive(Serialize)]
/// Aggregated validation summary used by printers.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub files: usize,
}

#[derive(Serialize)]
/// Validation results container.
pub struct ValidateResult {
    pub findings: Vec<Finding>,
    pub summary: Summary,
}
