//! Runs registered detectors against projects and collects their verdicts.

use rayon::prelude::*;
use serde::Serialize;

use crate::detector::{Detector, DetectorRegistry};
use crate::error::{AntipatternGuardError, Result};
use crate::model::{AntiPatternRef, Project, QueryResultItem};
use crate::rows::RowSource;

/// Detector whose `analyze` call failed; other verdicts of the run are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectorFailure {
    pub anti_pattern: AntiPatternRef,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectReport {
    pub project: Project,
    pub results: Vec<QueryResultItem>,
    pub failures: Vec<DetectorFailure>,
}

impl ProjectReport {
    #[must_use]
    pub fn detected_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_detected()).count()
    }

    #[must_use]
    pub fn has_detections(&self) -> bool {
        self.results.iter().any(QueryResultItem::is_detected)
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

pub struct DetectionRunner<'a> {
    registry: &'a DetectorRegistry,
    only: Option<Vec<String>>,
}

impl<'a> DetectionRunner<'a> {
    #[must_use]
    pub const fn new(registry: &'a DetectorRegistry) -> Self {
        Self {
            registry,
            only: None,
        }
    }

    /// Restricts the run to the given anti-pattern codes.
    ///
    /// # Errors
    /// Returns `UnknownAntiPattern` for a code no registered detector has.
    pub fn with_only(mut self, codes: &[String]) -> Result<Self> {
        if let Some(unknown) = codes.iter().find(|code| self.registry.find(code).is_none()) {
            return Err(AntipatternGuardError::UnknownAntiPattern(unknown.clone()));
        }
        self.only = if codes.is_empty() {
            None
        } else {
            Some(codes.to_vec())
        };
        Ok(self)
    }

    fn selected(&self) -> impl Iterator<Item = &'a dyn Detector> + '_ {
        self.registry.iter().filter(|detector| {
            self.only.as_ref().is_none_or(|codes| {
                codes
                    .iter()
                    .any(|code| detector.anti_pattern().name().eq_ignore_ascii_case(code))
            })
        })
    }

    /// Analyzes one project with every selected detector, in catalog order.
    #[must_use]
    pub fn run(&self, project: &Project, rows: &dyn RowSource) -> ProjectReport {
        let mut results = Vec::new();
        let mut failures = Vec::new();

        for detector in self.selected() {
            match detector.analyze(project, rows) {
                Ok(result) => results.push(result),
                Err(err) => {
                    tracing::warn!(
                        anti_pattern = %detector.anti_pattern().print_name(),
                        project = %project.name,
                        error = %err,
                        "detector failed"
                    );
                    failures.push(DetectorFailure {
                        anti_pattern: detector.anti_pattern().reference(),
                        message: err.to_string(),
                    });
                }
            }
        }

        ProjectReport {
            project: project.clone(),
            results,
            failures,
        }
    }

    /// Analyzes several projects in parallel. Reports keep the input order.
    #[must_use]
    pub fn run_all(&self, projects: &[Project], rows: &dyn RowSource) -> Vec<ProjectReport> {
        projects
            .par_iter()
            .map(|project| self.run(project, rows))
            .collect()
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
