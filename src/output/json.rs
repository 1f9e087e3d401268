use serde::Serialize;

use crate::error::Result;
use crate::runner::ProjectReport;

use super::OutputFormatter;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Summary,
    reports: &'a [ProjectReport],
}

#[derive(Serialize)]
struct Summary {
    projects: usize,
    detected: usize,
    not_detected: usize,
    failures: usize,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, reports: &[ProjectReport]) -> Result<String> {
        let (detected, not_detected, failures) =
            reports
                .iter()
                .fold((0, 0, 0), |(d, n, f), report| {
                    let found = report.detected_count();
                    (
                        d + found,
                        n + report.results.len() - found,
                        f + report.failures.len(),
                    )
                });

        let output = JsonOutput {
            summary: Summary {
                projects: reports.len(),
                detected,
                not_detected,
                failures,
            },
            reports,
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
