use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("flowtag"))
}

fn fixture(name: &str) -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn help_lists_positional_inputs() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("LOG").and(contains("LOOKUP")).and(contains("OUTPUT")));
}

#[test]
fn writes_text_report() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("output_results.txt");

    cmd()
        .arg(fixture("valid_flow_logs.txt"))
        .arg(fixture("lookup_table.csv"))
        .arg(&output)
        .assert()
        .success()
        .stderr(contains("OK: report written"));

    let written = std::fs::read_to_string(&output).expect("read report");
    assert!(written.starts_with("Tag Counts:\nTag,Count\nsv_P2,1\nUntagged,2\n\n"));
    assert!(written.contains("Port,Protocol,Count\n443,tcp,1\n"));
}

#[test]
fn missing_lookup_is_not_fatal() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("output_results.txt");

    cmd()
        .arg(fixture("valid_flow_logs.txt"))
        .arg(temp.path().join("missing.csv"))
        .arg(&output)
        .assert()
        .success()
        .stderr(contains("Untagged"));

    let written = std::fs::read_to_string(&output).expect("read report");
    assert!(written.contains("Untagged,3\n"));
}

#[test]
fn missing_log_writes_partial_report() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("output_results.txt");

    cmd()
        .arg(temp.path().join("missing.txt"))
        .arg(fixture("lookup_table.csv"))
        .arg(&output)
        .assert()
        .code(1)
        .stderr(contains("failed to process flow log"));

    let written = std::fs::read_to_string(&output).expect("read report");
    assert_eq!(
        written,
        "Tag Counts:\nTag,Count\n\nPort/Protocol Combination Counts:\nPort,Protocol,Count\n"
    );
}

#[test]
fn stdout_outputs_report() {
    cmd()
        .arg(fixture("duplicate_logs.txt"))
        .arg(fixture("lookup_table.csv"))
        .arg("--stdout")
        .assert()
        .success()
        .stdout(contains("Untagged,3").and(contains("49153,tcp,2")));
}

#[test]
fn json_output_is_valid() {
    let assert = cmd()
        .arg(fixture("valid_flow_logs.txt"))
        .arg(fixture("lookup_table.csv"))
        .arg("--stdout")
        .arg("--json")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let report: flowtag_core::Report = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(report.total_records(), 3);
}

#[test]
fn pretty_requires_json() {
    cmd()
        .arg(fixture("valid_flow_logs.txt"))
        .arg("--stdout")
        .arg("--pretty")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn output_must_differ_from_log() {
    let temp = TempDir::new().expect("tempdir");
    let log = temp.path().join("flow_logs.txt");
    std::fs::copy(fixture("valid_flow_logs.txt"), &log).expect("copy fixture");

    cmd()
        .arg(&log)
        .arg(fixture("lookup_table.csv"))
        .arg(&log)
        .assert()
        .code(2)
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn glob_with_multiple_matches_is_rejected() {
    let pattern = fixture("*_logs.txt");

    cmd()
        .arg(pattern)
        .arg(fixture("lookup_table.csv"))
        .arg("--stdout")
        .assert()
        .code(2)
        .stderr(contains("multiple files match pattern"));
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("output_results.txt");

    cmd()
        .arg(fixture("valid_flow_logs.txt"))
        .arg(fixture("lookup_table.csv"))
        .arg(&output)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());
}

#[test]
fn json_report_file_is_written() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("reports").join("report.json");

    cmd()
        .arg(fixture("valid_flow_logs.txt"))
        .arg(fixture("lookup_table.csv"))
        .arg(&output)
        .arg("--json")
        .arg("--pretty")
        .assert()
        .success()
        .stderr(contains("OK: report written"));

    let written = std::fs::read_to_string(&output).expect("read report");
    let report: flowtag_core::Report = serde_json::from_str(&written).expect("valid json");
    assert_eq!(report.total_records(), 3);
    assert_eq!(report.tag_counts[0].tag, "sv_P2");
}
