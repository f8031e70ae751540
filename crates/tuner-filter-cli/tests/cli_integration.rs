use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const TUNER: &str = "android.permission.ACCESS_TV_TUNER";

/// Get the workspace root (two levels up from CARGO_MANIFEST_DIR of tuner-filter-cli)
fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent() // crates/
        .unwrap()
        .parent() // workspace root
        .unwrap()
        .to_path_buf()
}

fn tuner_filter_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tuner-filter"));
    cmd.current_dir(workspace_root());
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run(args: &[&str]) -> Output {
    tuner_filter_bin().args(args).output().expect("failed to run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn cli_help() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Tuner section filter settings"));
}

#[test]
fn cli_version() {
    let output = run(&["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

// ---------------------------------------------------------------------------
// build
// ---------------------------------------------------------------------------

#[test]
fn cli_build_with_grant() {
    let output = run(&[
        "build",
        "--main-type",
        "ts",
        "--table-id",
        "17",
        "--version",
        "3",
        "--grant",
        TUNER,
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("invalid JSON output");
    assert_eq!(json["mainType"], "ts");
    assert_eq!(json["tableId"], 17);
    assert_eq!(json["version"], 3);
}

#[test]
fn cli_build_defaults() {
    let output = run(&["build", "--main-type", "mmtp", "--grant", TUNER]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("invalid JSON output");
    assert_eq!(json["mainType"], "mmtp");
    assert_eq!(json["tableId"], 0);
    assert_eq!(json["version"], 0);
}

#[test]
fn cli_build_accepts_negative_values() {
    let output = run(&["build", "--main-type", "1", "--table-id", "-4", "--grant", TUNER]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("invalid JSON output");
    assert_eq!(json["mainType"], "ts");
    assert_eq!(json["tableId"], -4);
}

#[test]
fn cli_build_without_grant_is_denied() {
    let output = run(&["build", "--main-type", "ts", "--table-id", "17"]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    let err = stderr(&output);
    assert!(err.contains("Error:"), "stderr: {err}");
    assert!(err.contains("permission denied"), "stderr: {err}");
}

#[test]
fn cli_build_yaml() {
    let output = run(&[
        "build", "--main-type", "alp", "--version", "9", "--format", "yaml", "--grant", TUNER,
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("mainType: alp"), "stdout: {out}");
    assert!(out.contains("version: 9"), "stdout: {out}");
}

#[test]
fn cli_build_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("settings.json");
    let output = run(&[
        "build",
        "--main-type",
        "tlv",
        "--table-id",
        "66",
        "--grant",
        TUNER,
        "-o",
        out_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Written to"));

    let content = std::fs::read_to_string(&out_path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["tableId"], 66);
}

#[test]
fn cli_build_unknown_main_type() {
    let output = run(&["build", "--main-type", "dvb", "--grant", TUNER]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid filter main type"));
}

// ---------------------------------------------------------------------------
// lint
// ---------------------------------------------------------------------------

#[test]
fn cli_lint_clean_file() {
    let output = run(&["lint", "samples/pat.json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("0 lint issues in 1 file."));
}

#[test]
fn cli_lint_yaml_list() {
    let output = run(&["lint", "samples/dvb-si.yaml", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("invalid JSON output");
    assert_eq!(json["summary"]["count"], 0);
    assert_eq!(json["summary"]["entries"], 3);
}

#[test]
fn cli_lint_config_sources() {
    let output = run(&["lint", "samples/multi", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("invalid JSON output");
    // ignored.json is not listed in sources
    assert_eq!(json["summary"]["files"], 2);
    assert_eq!(json["summary"]["entries"], 3);
    assert_eq!(json["summary"]["count"], 0);
}

#[test]
fn cli_lint_requires_capability() {
    // samples/invalid has no config granting the tuner capability
    let output = run(&["lint", "samples/invalid/out-of-range.json"]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("permission denied"), "stderr: {err}");
    assert!(err.contains("out-of-range.json[0]"), "stderr: {err}");
}

#[test]
fn cli_lint_reports_out_of_range() {
    let output = run(&[
        "lint",
        "samples/invalid/out-of-range.json",
        "--grant",
        TUNER,
    ]);
    assert!(!output.status.success());
    let out = stdout(&output);
    assert!(out.contains("[0] error[table-id-range]"), "stdout: {out}");
    assert!(out.contains("[1] warning[forbidden-table-id]"), "stdout: {out}");
    assert!(out.contains("[2] error[version-range]"), "stdout: {out}");
    assert!(out.contains("3 lint issues in 1 file."), "stdout: {out}");
}

#[test]
fn cli_lint_json_summary() {
    let output = run(&[
        "lint",
        "samples/invalid/out-of-range.json",
        "--format",
        "json",
        "--grant",
        TUNER,
    ]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("invalid JSON output");
    assert_eq!(json["summary"]["count"], 3);
    assert_eq!(json["summary"]["errors"], 2);
    let diagnostics = json["diagnostics"].as_array().unwrap();
    assert!(diagnostics.iter().any(|d| d["rule"] == "version-range" && d["index"] == 2));
}

#[test]
fn cli_lint_sarif() {
    let output = run(&[
        "lint",
        "samples/invalid/out-of-range.json",
        "--format",
        "sarif",
        "--grant",
        TUNER,
    ]);
    let sarif: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("invalid SARIF output");
    assert_eq!(sarif["version"], "2.1.0");
    let run = &sarif["runs"][0];
    assert_eq!(run["tool"]["driver"]["name"], "tuner-filter-lint");
    assert_eq!(run["tool"]["driver"]["rules"].as_array().unwrap().len(), 4);
    assert_eq!(run["results"].as_array().unwrap().len(), 3);
    assert_eq!(run["results"][0]["level"], "error");
}

#[test]
fn cli_lint_samples_directory_sarif() {
    let output = run(&["lint", "samples/", "--format", "sarif"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let sarif: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("invalid SARIF output");
    assert_eq!(sarif["version"], "2.1.0");
    assert_eq!(sarif["runs"][0]["results"].as_array().unwrap().len(), 0);
}

#[test]
fn cli_lint_sources_skip_config_file() {
    let output = run(&["lint", "samples/", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("invalid JSON output");
    // pat.json and dvb-si.yaml; the config matches "*.yaml" but is not read
    assert_eq!(json["summary"]["files"], 2);
    assert_eq!(json["summary"]["entries"], 4);
}

#[test]
fn cli_lint_nonexistent() {
    let output = run(&["lint", "nonexistent/path"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Error:"));
}

#[test]
fn cli_lint_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["lint", dir.path().to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("No settings files"));
}

#[test]
fn cli_lint_duplicate_promoted_by_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("tuner-filter.config.yaml"),
        format!("capabilities: [\"{TUNER}\"]\nlint:\n  rules:\n    duplicate-filter: error\n"),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("dup.json"),
        r#"[{"mainType":"ts","tableId":2},{"mainType":"ts","tableId":2}]"#,
    )
    .unwrap();

    let output = run(&["lint", dir.path().to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("error[duplicate-filter]"));
}

// ---------------------------------------------------------------------------
// describe
// ---------------------------------------------------------------------------

#[test]
fn cli_describe_needs_no_capability() {
    let output = run(&["describe", "samples/invalid/out-of-range.json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("[1]: ts section filter: table_id=0xff version=0 (forbidden)"), "stdout: {out}");
}

#[test]
fn cli_describe_json() {
    let output = run(&["describe", "samples/pat.json", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("invalid JSON output");
    assert_eq!(json[0]["index"], 0);
    assert_eq!(json[0]["settings"]["tableName"], "program_association_section");
}

#[test]
fn cli_describe_malformed() {
    let output = run(&["describe", "samples/invalid/malformed.yml"]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Invalid settings"), "stderr: {err}");
    assert!(err.contains("invalid filter main type: dvb"), "stderr: {err}");
}

#[test]
fn cli_describe_reports_unknown_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("typo.json");
    std::fs::write(&path, r#"[{"mainType":"ts","tableID":2}]"#).unwrap();

    let output = run(&["describe", path.to_str().unwrap()]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("unknown field `tableID`"), "stderr: {err}");
    assert!(!err.contains("untagged"), "stderr: {err}");
}

#[test]
fn cli_describe_raw_main_type() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw.yaml");
    std::fs::write(&path, "mainType: 1\ntableId: 2\n").unwrap();

    let output = run(&["describe", path.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("ts section filter: table_id=0x02"));
}
