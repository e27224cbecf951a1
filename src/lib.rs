//! Annota core library.
//!
//! This crate exposes programmatic APIs for validating, normalizing, and
//! exporting issue-annotation records: YAML files that pin labeled quality
//! issues (true positives and false positives) to files and line ranges of
//! frozen code snapshots.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `error`: The closed set of build-time validation errors.
//! - `normalize`: Canonicalization of heterogeneous line-range encodings.
//! - `occurrence`: Occurrence construction and the multi-occurrence note rule.
//! - `detection`: Detection-set inference/validation and relevance defaults.
//! - `build`: Issue assembly, rationale window, issue-level file-union rule.
//! - `validate`: Batch validation of record files with findings and summary.
//! - `export`: Canonical JSON export with fingerprint-based skipping.
//! - `models`: Raw input models, canonical record types, output structs.
//! - `output`: Human/JSON printers for validate/export.
//! - `utils`: Supporting helpers.
pub mod build;
pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod export;
pub mod models;
pub mod normalize;
pub mod occurrence;
pub mod output;
pub mod utils;
pub mod validate;
