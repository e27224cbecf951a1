//! Output rendering for validate and export commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-item fields and a top-level summary.

use crate::export::ExportAction;
use crate::models::{Finding, ValidateResult};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Print validation results in the requested format.
pub fn print_validate(res: &ValidateResult, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_validate_json(res)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for finding in &res.findings {
                print_finding(finding, color);
            }
            let summary = format!(
                "— Summary — errors={} warnings={} infos={} files={}",
                res.summary.errors, res.summary.warnings, res.summary.infos, res.summary.files
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print export actions summarizing writes and skips, plus any findings for
/// records that failed to build.
pub fn print_export(actions: &[ExportAction], output: &str, findings: &[Finding]) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_export_json(actions, findings)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for finding in findings {
                print_finding(finding, color);
            }
            for a in actions {
                if a.skipped {
                    if color {
                        println!(
                            "{} {} -> {}",
                            "⏭️  up-to-date:".bright_black().to_string(),
                            a.record,
                            a.target
                        );
                    } else {
                        println!("⏭️  up-to-date: {} -> {}", a.record, a.target);
                    }
                } else if a.wrote {
                    if color {
                        println!(
                            "{} {} -> {}",
                            "📤 exported:".green().bold(),
                            a.record,
                            a.target
                        );
                    } else {
                        println!("📤 exported: {} -> {}", a.record, a.target);
                    }
                } else if a.would_write {
                    if color {
                        println!(
                            "{} {} -> {}",
                            "⟲ would export:".yellow().bold(),
                            a.record,
                            a.target
                        );
                    } else {
                        println!("⟲ would export: {} -> {}", a.record, a.target);
                    }
                }
            }
        }
    }
}

fn print_finding(finding: &Finding, color: bool) {
    let sev = match finding.severity.as_str() {
        "error" => {
            if color {
                "⟦error⟧".red().bold().to_string()
            } else {
                "⟦error⟧".to_string()
            }
        }
        "warning" | "warn" => {
            if color {
                "⟦warn⟧".yellow().bold().to_string()
            } else {
                "⟦warn⟧".to_string()
            }
        }
        _ => {
            if color {
                "⟦info⟧".blue().bold().to_string()
            } else {
                "⟦info⟧".to_string()
            }
        }
    };
    let icon = match finding.severity.as_str() {
        "error" => "✖".red().to_string(),
        "warning" | "warn" => "▲".yellow().to_string(),
        _ => "◆".blue().to_string(),
    };
    let file = if color {
        finding.file.clone().bold().to_string()
    } else {
        finding.file.clone()
    };
    println!(
        "{} {} {} ❲{}❳ — {}",
        icon, sev, file, finding.rule, finding.message
    );
}

/// Compose validation JSON object (pure) for testing/snapshot purposes.
pub fn compose_validate_json(res: &ValidateResult) -> JsonVal {
    // Directly serialize ValidateResult as JSON, keeping stable shape
    serde_json::to_value(res).unwrap()
}

/// Compose export JSON object (pure) for testing/snapshot purposes.
pub fn compose_export_json(actions: &[ExportAction], findings: &[Finding]) -> JsonVal {
    let items: Vec<_> = actions
        .iter()
        .map(|a| {
            json!({
                "record": a.record,
                "target": a.target,
                "wrote": a.wrote,
                "skipped": a.skipped,
                "would_write": a.would_write,
            })
        })
        .collect();
    let summary = json!({
        "wrote": actions.iter().filter(|a| a.wrote).count(),
        "skipped": actions.iter().filter(|a| a.skipped).count(),
        "pending": actions.iter().filter(|a| a.would_write && !a.wrote).count(),
        "failed": findings.len(),
        "total": actions.len(),
    });
    json!({"results": items, "findings": findings, "summary": summary})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Summary;

    #[test]
    fn test_compose_validate_json_shape() {
        let res = ValidateResult {
            findings: vec![Finding {
                file: "specimens/demo/rec.yaml".into(),
                rule: "missing-note".into(),
                severity: "error".into(),
                message: "msg".into(),
            }],
            summary: Summary {
                errors: 1,
                warnings: 0,
                infos: 0,
                files: 3,
            },
        };
        let out = compose_validate_json(&res);
        assert_eq!(out["summary"]["errors"], 1);
        assert_eq!(out["summary"]["files"], 3);
        assert_eq!(out["findings"][0]["rule"], "missing-note");
    }

    #[test]
    fn test_compose_export_json_counts() {
        let actions = vec![
            ExportAction {
                record: "a.yaml".into(),
                target: "canonical/a.json".into(),
                wrote: true,
                skipped: false,
                would_write: true,
            },
            ExportAction {
                record: "b.yaml".into(),
                target: "canonical/b.json".into(),
                wrote: false,
                skipped: true,
                would_write: false,
            },
            ExportAction {
                record: "c.yaml".into(),
                target: "canonical/c.json".into(),
                wrote: false,
                skipped: false,
                would_write: true,
            },
        ];
        let out = compose_export_json(&actions, &[]);
        assert_eq!(out["summary"]["wrote"], 1);
        assert_eq!(out["summary"]["skipped"], 1);
        assert_eq!(out["summary"]["pending"], 1);
        assert_eq!(out["summary"]["total"], 3);
        assert_eq!(out["results"][2]["would_write"], true);
    }
}
