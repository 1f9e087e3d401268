#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the antipattern-guard binary.
#[macro_export]
macro_rules! antipattern_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("antipattern-guard"))
    };
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates `.antipattern-guard.toml` in the temp directory.
    pub fn create_config(&self, content: &str) {
        self.create_file(".antipattern-guard.toml", content);
    }

    /// Writes a snapshot document as pretty JSON.
    pub fn create_snapshot(&self, relative_path: &str, snapshot: &Value) -> PathBuf {
        let content = serde_json::to_string_pretty(snapshot).expect("Failed to render snapshot");
        self.create_file(relative_path, &content)
    }
}

/// Snapshot with the given `resource.query` result sets.
pub fn snapshot(id: i64, name: &str, result_sets: Value) -> Value {
    json!({
        "project": { "id": id, "name": name },
        "result_sets": result_sets,
    })
}

/// Snapshot in which nothing should be detected: steady two-week iterations,
/// feedback in every iteration and estimates kept.
pub fn healthy_snapshot(id: i64, name: &str) -> Value {
    snapshot(
        id,
        name,
        json!({
            "too_long_sprint.iteration_lengths": [
                { "iterationLength": 14 },
                { "iterationLength": 14 },
                { "iterationLength": 15 }
            ],
            "varying_sprint_length.iteration_lengths": [
                { "iterationLength": 14 },
                { "iterationLength": 14 },
                { "iterationLength": 15 }
            ],
            "ninety_ninety_rule.time_divisions": [
                { "timeDivision": 1.0 },
                { "timeDivision": 1.1 }
            ],
            "long_or_non_existent_feedback_loops.total_iterations": [
                { "numberOfIterations": 3 }
            ],
            "long_or_non_existent_feedback_loops.iterations_with_feedback": [
                { "totalCountOfIterationsWithFeedbackActivity": 3 }
            ]
        }),
    )
}

/// Snapshot where every iteration is too long and estimates keep overrunning.
pub fn troubled_snapshot(id: i64, name: &str) -> Value {
    snapshot(
        id,
        name,
        json!({
            "too_long_sprint.iteration_lengths": [
                { "iterationLength": 30 },
                { "iterationLength": 35 }
            ],
            "varying_sprint_length.iteration_lengths": [
                { "iterationLength": 30 },
                { "iterationLength": 35 }
            ],
            "ninety_ninety_rule.time_divisions": [
                { "timeDivision": 1.3 },
                { "timeDivision": 1.4 },
                { "timeDivision": 1.5 }
            ],
            "long_or_non_existent_feedback_loops.total_iterations": [
                { "numberOfIterations": 2 }
            ],
            "long_or_non_existent_feedback_loops.iterations_with_feedback": [
                { "totalCountOfIterationsWithFeedbackActivity": 2 }
            ]
        }),
    )
}

pub const BASIC_CONFIG: &str = r#"version = "1"

[anti_patterns.TooLongSprint]
maxIterationLength = 28
"#;
