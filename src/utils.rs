//! Supporting helpers: stderr prefixes, display paths, content fingerprints.

use owo_colors::OwoColorize;
use std::path::Path;

fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Prefix for fatal configuration/usage messages on stderr.
pub fn error_prefix() -> String {
    if use_colors() {
        "✖ error:".red().bold().to_string()
    } else {
        "✖ error:".to_string()
    }
}

/// Prefix for friendly notes on stderr.
pub fn note_prefix() -> String {
    if use_colors() {
        "◦ note:".bright_black().to_string()
    } else {
        "◦ note:".to_string()
    }
}

/// Prefix for informational messages on stderr.
pub fn info_prefix() -> String {
    if use_colors() {
        "◆ info:".blue().bold().to_string()
    } else {
        "◆ info:".to_string()
    }
}

/// Repo-relative display form of a path; falls back to the absolute form
/// when the path is outside the root.
pub fn rel_display(root: &Path, path: &Path) -> String {
    pathdiff::diff_paths(path, root)
        .filter(|p| !p.starts_with(".."))
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .to_string()
}

/// Content fingerprint (FNV-1a, 64-bit) used to skip up-to-date export
/// targets.
pub fn fingerprint(data: &str) -> String {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for b in data.as_bytes() {
        hash ^= u64::from(*b);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    format!("{hash:016x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_rel_display_inside_and_outside_root() {
        let root = PathBuf::from("/repo");
        assert_eq!(
            rel_display(&root, &root.join("specimens/a/rec.yaml")),
            "specimens/a/rec.yaml"
        );
        assert_eq!(rel_display(&root, Path::new("/other/x")), "/other/x");
    }

    #[test]
    fn test_fingerprint_is_stable_and_distinguishes() {
        assert_eq!(fingerprint("abc"), fingerprint("abc"));
        assert_ne!(fingerprint("abc"), fingerprint("abd"));
        assert_eq!(fingerprint("").len(), 16);
    }
}
