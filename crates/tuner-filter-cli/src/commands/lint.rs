use std::path::Path;

use tuner_filter_lint::{LintDiagnostic, LintSeverity, Linter};

use crate::{build_entries, capabilities, load};

/// Lint all settings under `input_path`. Returns the rendered report and the
/// number of error-severity diagnostics.
pub fn run_lint(
    input_path: &Path,
    format: &str,
    grants: &[String],
) -> Result<(String, usize), String> {
    let (config, files) = load(input_path)?;
    let ctx = capabilities(&config, grants);
    let entries = build_entries(&files, &ctx)?;

    let linter = Linter::new(config.lint.clone());
    let results = linter.lint(&entries);
    let error_count = results
        .iter()
        .filter(|d| d.severity == LintSeverity::Error)
        .count();

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&serde_json::json!({
                "diagnostics": results,
                "summary": {
                    "count": results.len(),
                    "errors": error_count,
                    "entries": entries.len(),
                    "files": files.len(),
                }
            }))
            .map_err(|e| format!("JSON serialization error: {e}"))?;
            Ok((json, error_count))
        }
        "sarif" => {
            let sarif = build_sarif(&results, &linter);
            let json = serde_json::to_string_pretty(&sarif)
                .map_err(|e| format!("SARIF serialization error: {e}"))?;
            Ok((json, error_count))
        }
        _ => {
            // Human-readable format
            let mut lines: Vec<String> = Vec::new();

            for d in &results {
                lines.push(format!(
                    "{}[{}] {}[{}]: {}",
                    d.file,
                    d.index,
                    severity_label(&d.severity),
                    d.rule,
                    d.message
                ));
            }

            let count = results.len();
            let file_count = files.len();
            let issue_word = if count == 1 { "issue" } else { "issues" };
            let file_word = if file_count == 1 { "file" } else { "files" };
            lines.push(format!("{count} lint {issue_word} in {file_count} {file_word}."));

            Ok((lines.join("\n"), error_count))
        }
    }
}

fn severity_label(severity: &LintSeverity) -> &'static str {
    match severity {
        LintSeverity::Error => "error",
        LintSeverity::Warning => "warning",
        LintSeverity::Info => "info",
    }
}

fn sarif_level(severity: &LintSeverity) -> &'static str {
    match severity {
        LintSeverity::Error => "error",
        LintSeverity::Warning => "warning",
        LintSeverity::Info => "note",
    }
}

fn build_sarif(results: &[LintDiagnostic], linter: &Linter) -> serde_json::Value {
    let rule_descriptors: Vec<serde_json::Value> = linter
        .rules()
        .iter()
        .map(|r| {
            serde_json::json!({
                "id": r.id(),
                "shortDescription": { "text": r.description() },
                "defaultConfiguration": { "level": sarif_level(&r.default_severity()) }
            })
        })
        .collect();

    // Settings documents have no line structure; the entry index is reported
    // as a logical location instead.
    let sarif_results: Vec<serde_json::Value> = results
        .iter()
        .map(|d| {
            serde_json::json!({
                "ruleId": d.rule,
                "level": sarif_level(&d.severity),
                "message": { "text": d.message },
                "locations": [{
                    "physicalLocation": {
                        "artifactLocation": { "uri": d.file }
                    },
                    "logicalLocations": [{
                        "fullyQualifiedName": format!("{}[{}]", d.file, d.index)
                    }]
                }]
            })
        })
        .collect();

    serde_json::json!({
        "$schema": "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/main/sarif-2.1/schema/sarif-schema-2.1.0.json",
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "tuner-filter-lint",
                    "version": env!("CARGO_PKG_VERSION"),
                    "rules": rule_descriptors
                }
            },
            "results": sarif_results
        }]
    })
}
