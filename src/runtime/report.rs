use anyhow::Result;
use serde_json::json;

use crate::{checker::CheckReport, cli::OutputFormat};

/// Render a report in the requested format.
pub fn render_report(report: &CheckReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => render_json(report),
    }
}

/// Human-readable report grouped by module, then unexpected files.
pub fn render_text(report: &CheckReport) -> String {
    if !report.had_issues() {
        return "All checks passed!".to_string();
    }

    let mut lines = Vec::new();
    for module in &report.modules {
        lines.push(format!("{}:", module.qualname));
        lines.extend(module.outcomes.iter().map(|outcome| format!("- {outcome}")));
    }
    if !report.unexpected_files.is_empty() {
        lines.push("Unexpected files:".to_string());
        lines.extend(
            report
                .unexpected_files
                .iter()
                .map(|outcome| format!("- {outcome}")),
        );
    }
    lines.join("\n")
}

pub fn render_json(report: &CheckReport) -> Result<String> {
    let payload = json!({
        "had_issues": report.had_issues(),
        "unresolved": report.unresolved_count(),
        "modules": report.modules,
        "unexpected_files": report.unexpected_files,
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::Value;

    use super::*;
    use crate::checker::{ModuleReport, Outcome};

    fn sample_report() -> CheckReport {
        CheckReport {
            modules: vec![ModuleReport {
                qualname: "pkg.greet".into(),
                module_file: PathBuf::from("/p/src/pkg/greet.py"),
                outcomes: vec![
                    Outcome::Fixed {
                        message: "Could not find test file /p/tests/test_greet.py.".into(),
                    },
                    Outcome::Unresolved {
                        message: "Could not read API reference documentation file /p/docs/reference/greet.md."
                            .into(),
                    },
                ],
            }],
            unexpected_files: vec![Outcome::Removed {
                message: "Unexpected test file /p/tests/foo/test_bar.py.".into(),
            }],
        }
    }

    #[test]
    fn clean_report_says_all_passed() {
        assert_eq!(render_text(&CheckReport::default()), "All checks passed!");
    }

    #[test]
    fn text_report_groups_by_module_then_unexpected_files() {
        let text = render_text(&sample_report());

        assert_eq!(
            text,
            "pkg.greet:\n\
             - Fixed: Could not find test file /p/tests/test_greet.py.\n\
             - Could not read API reference documentation file /p/docs/reference/greet.md.\n\
             Unexpected files:\n\
             - Removed: Unexpected test file /p/tests/foo/test_bar.py."
        );
    }

    #[test]
    fn json_report_tags_outcomes() {
        let rendered = render_json(&sample_report()).expect("report should serialize");
        let value: Value = serde_json::from_str(&rendered).expect("output is JSON");

        assert_eq!(value["had_issues"], true);
        assert_eq!(value["unresolved"], 1);
        assert_eq!(value["modules"][0]["qualname"], "pkg.greet");
        assert_eq!(value["modules"][0]["outcomes"][0]["status"], "fixed");
        assert_eq!(value["unexpected_files"][0]["status"], "removed");
    }
}
