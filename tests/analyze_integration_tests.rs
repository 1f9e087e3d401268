//! Integration tests for the `analyze` command.

mod common;

use common::{TestFixture, healthy_snapshot, snapshot, troubled_snapshot};
use predicates::prelude::*;
use serde_json::json;

// =============================================================================
// Exit Codes
// =============================================================================

#[test]
fn analyze_healthy_project_succeeds() {
    let fixture = TestFixture::new();
    fixture.create_snapshot("alpha.json", &healthy_snapshot(1, "alpha"));

    antipattern_guard!()
        .current_dir(fixture.path())
        .args(["analyze", "alpha.json", "--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project: alpha (id 1)"))
        .stdout(predicate::str::contains("✓ OK: Too Long Sprint"))
        .stdout(predicate::str::contains(
            "Summary: 1 projects analyzed, 0 detected, 4 not detected",
        ));
}

#[test]
fn analyze_detection_exits_with_one() {
    let fixture = TestFixture::new();
    fixture.create_snapshot("beta.json", &troubled_snapshot(2, "beta"));

    antipattern_guard!()
        .current_dir(fixture.path())
        .args(["analyze", "beta.json", "--color", "never"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("✗ DETECTED: Too Long Sprint"))
        .stdout(predicate::str::contains("✗ DETECTED: Ninety Ninety Rule"))
        .stdout(predicate::str::contains("Number of too long iterations: 2"));
}

#[test]
fn analyze_missing_snapshot_exits_with_two() {
    let fixture = TestFixture::new();

    antipattern_guard!()
        .current_dir(fixture.path())
        .args(["analyze", "missing.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn analyze_malformed_snapshot_exits_with_two() {
    let fixture = TestFixture::new();
    fixture.create_file("bad.json", "{ not json");

    antipattern_guard!()
        .current_dir(fixture.path())
        .args(["analyze", "bad.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("JSON error"));
}

#[test]
fn analyze_duplicate_project_exits_with_two() {
    let fixture = TestFixture::new();
    fixture.create_snapshot("a.json", &healthy_snapshot(1, "alpha"));
    fixture.create_snapshot("b.json", &healthy_snapshot(1, "alpha"));

    antipattern_guard!()
        .current_dir(fixture.path())
        .args(["analyze", "a.json", "b.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("more than one snapshot"));
}

#[test]
fn analyze_wrongly_typed_field_is_reported_as_failure() {
    let fixture = TestFixture::new();
    fixture.create_snapshot(
        "gamma.json",
        &snapshot(
            3,
            "gamma",
            json!({
                "too_long_sprint.iteration_lengths": [ { "iterationLength": "long" } ]
            }),
        ),
    );

    antipattern_guard!()
        .current_dir(fixture.path())
        .args(["analyze", "gamma.json", "--color", "never"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("! ERROR: Too Long Sprint"))
        .stdout(predicate::str::contains("iterationLength"));
}

// =============================================================================
// Selection, Config and Queries
// =============================================================================

#[test]
fn analyze_only_selected_detectors() {
    let fixture = TestFixture::new();
    fixture.create_snapshot("beta.json", &troubled_snapshot(2, "beta"));

    antipattern_guard!()
        .current_dir(fixture.path())
        .args([
            "analyze",
            "beta.json",
            "--only",
            "VaryingSprintLength,LongOrNonExistentFeedbackLoops",
            "--color",
            "never",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Too Long Sprint").not());
}

#[test]
fn analyze_only_unknown_code_exits_with_two() {
    let fixture = TestFixture::new();
    fixture.create_snapshot("alpha.json", &healthy_snapshot(1, "alpha"));

    antipattern_guard!()
        .current_dir(fixture.path())
        .args(["analyze", "alpha.json", "--only", "Nope"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown anti-pattern: Nope"));
}

#[test]
fn analyze_applies_local_config() {
    let fixture = TestFixture::new();
    fixture.create_config(
        r"
[anti_patterns.TooLongSprint]
maxIterationLength = 40

[anti_patterns.NinetyNinetyRule]
maxBadDivisionLimit = 5
",
    );
    fixture.create_snapshot("beta.json", &troubled_snapshot(2, "beta"));

    antipattern_guard!()
        .current_dir(fixture.path())
        .args(["analyze", "beta.json"])
        .assert()
        .success();
}

#[test]
fn analyze_no_config_ignores_local_config() {
    let fixture = TestFixture::new();
    fixture.create_config("[anti_patterns.TooLongSprint]\nmaxIterationLength = 40\n");
    fixture.create_snapshot("beta.json", &troubled_snapshot(2, "beta"));

    antipattern_guard!()
        .current_dir(fixture.path())
        .args(["analyze", "beta.json", "--no-config"])
        .assert()
        .code(1);
}

#[test]
fn analyze_invalid_config_exits_with_two() {
    let fixture = TestFixture::new();
    fixture.create_config("[anti_patterns.TooLongSprint]\nmaxIterationLength = 1.5\n");
    fixture.create_snapshot("alpha.json", &healthy_snapshot(1, "alpha"));

    antipattern_guard!()
        .current_dir(fixture.path())
        .args(["analyze", "alpha.json"])
        .assert()
        .code(2);
}

#[test]
fn analyze_with_custom_query_directory_missing_resource() {
    let fixture = TestFixture::new();
    fixture.create_file("sql/too_long_sprint.sql", "-- name: iteration_lengths\nSELECT 1;\n");
    fixture.create_snapshot("alpha.json", &healthy_snapshot(1, "alpha"));

    antipattern_guard!()
        .current_dir(fixture.path())
        .args(["analyze", "alpha.json", "--queries", "sql"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown query resource"));
}

// =============================================================================
// Output
// =============================================================================

#[test]
fn analyze_json_output() {
    let fixture = TestFixture::new();
    fixture.create_snapshot("alpha.json", &healthy_snapshot(1, "alpha"));
    fixture.create_snapshot("beta.json", &troubled_snapshot(2, "beta"));

    let output = antipattern_guard!()
        .current_dir(fixture.path())
        .args(["analyze", "alpha.json", "beta.json", "--format", "json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["summary"]["projects"], 2);
    assert_eq!(parsed["summary"]["detected"], 2);
    assert_eq!(parsed["reports"][0]["project"]["name"], "alpha");
    assert_eq!(parsed["reports"][1]["project"]["name"], "beta");
    assert_eq!(parsed["reports"][1]["results"][0]["detected"], true);
}

#[test]
fn analyze_writes_output_file() {
    let fixture = TestFixture::new();
    fixture.create_snapshot("alpha.json", &healthy_snapshot(1, "alpha"));

    antipattern_guard!()
        .current_dir(fixture.path())
        .args(["analyze", "alpha.json", "-o", "report.txt"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let report = std::fs::read_to_string(fixture.path().join("report.txt")).unwrap();
    assert!(report.contains("Project: alpha (id 1)"));
}

#[test]
fn analyze_quiet_suppresses_stdout() {
    let fixture = TestFixture::new();
    fixture.create_snapshot("beta.json", &troubled_snapshot(2, "beta"));

    antipattern_guard!()
        .current_dir(fixture.path())
        .args(["analyze", "beta.json", "--quiet"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn analyze_verbose_shows_all_details() {
    let fixture = TestFixture::new();
    fixture.create_snapshot("alpha.json", &healthy_snapshot(1, "alpha"));

    antipattern_guard!()
        .current_dir(fixture.path())
        .args(["analyze", "alpha.json", "-v", "--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Conclusion: All iterations in limit"));
}

#[test]
fn analyze_log_env_var_enables_debug_logging() {
    let fixture = TestFixture::new();
    fixture.create_snapshot("alpha.json", &healthy_snapshot(1, "alpha"));

    antipattern_guard!()
        .current_dir(fixture.path())
        .env("ANTIPATTERN_GUARD_LOG", "debug")
        .args(["analyze", "alpha.json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("snapshot loaded"));
}
