//! Anti-pattern detectors.
//!
//! Each detector owns one [`AntiPattern`] with its thresholds, receives the query
//! texts of its SQL resource once, and turns the rows a [`RowSource`] returns for a
//! project into a [`QueryResultItem`].

mod feedback_loops;
mod ninety_ninety_rule;
mod registry;
mod too_long_sprint;
mod varying_sprint_length;

pub use feedback_loops::{FeedbackFacts, LongOrNonExistentFeedbackLoopsDetector};
pub use ninety_ninety_rule::NinetyNinetyRuleDetector;
pub use registry::DetectorRegistry;
pub use too_long_sprint::TooLongSprintDetector;
pub use varying_sprint_length::{LengthChanges, VaryingSprintLengthDetector};

use crate::error::{AntipatternGuardError, Result};
use crate::model::{AntiPattern, Project, QueryResultItem};
use crate::queries::NamedQuery;
use crate::rows::RowSource;

pub trait Detector: Send + Sync {
    /// Descriptor including the current thresholds.
    fn anti_pattern(&self) -> &AntiPattern;

    /// Mutable descriptor, for applying threshold overrides between runs.
    fn anti_pattern_mut(&mut self) -> &mut AntiPattern;

    /// Logical name of the SQL resource this detector executes.
    fn query_resource_name(&self) -> &'static str;

    /// Injects the resolved queries. Called once before the first `analyze`.
    ///
    /// # Errors
    /// Returns `MissingQuery` if a query the detector reads from is absent.
    fn set_queries(&mut self, queries: Vec<NamedQuery>) -> Result<()>;

    /// Runs the detector's queries for `project` and decides whether the
    /// anti-pattern is present. Empty result sets are not an error.
    ///
    /// # Errors
    /// Returns an error when the queries were never set, when the row source
    /// fails, or when rows do not decode into the expected fields.
    fn analyze(&self, project: &Project, rows: &dyn RowSource) -> Result<QueryResultItem>;
}

/// Queries injected into a detector, checked against the names it reads.
#[derive(Debug, Clone)]
pub(crate) struct LoadedQueries {
    resource: &'static str,
    queries: Option<Vec<NamedQuery>>,
}

impl LoadedQueries {
    pub(crate) const fn new(resource: &'static str) -> Self {
        Self {
            resource,
            queries: None,
        }
    }

    pub(crate) fn set(&mut self, queries: Vec<NamedQuery>, required: &[&str]) -> Result<()> {
        if let Some(missing) = required
            .iter()
            .find(|name| !queries.iter().any(|query| query.name == **name))
        {
            return Err(AntipatternGuardError::MissingQuery {
                resource: self.resource.to_string(),
                name: (*missing).to_string(),
            });
        }
        self.queries = Some(queries);
        Ok(())
    }

    pub(crate) fn get(&self) -> Result<&[NamedQuery]> {
        self.queries
            .as_deref()
            .ok_or_else(|| AntipatternGuardError::QueriesNotLoaded {
                resource: self.resource.to_string(),
            })
    }
}

// Threshold readers. Configurations can be overwritten but never removed or
// re-kinded, so the fallback only guards against a catalog typo.

pub(crate) fn integer_threshold(anti_pattern: &AntiPattern, key: &str, fallback: i64) -> i64 {
    anti_pattern
        .value(key)
        .and_then(|value| value.as_integer())
        .unwrap_or(fallback)
}

pub(crate) fn float_threshold(anti_pattern: &AntiPattern, key: &str, fallback: f32) -> f32 {
    anti_pattern
        .value(key)
        .and_then(|value| value.as_float())
        .unwrap_or(fallback)
}

pub(crate) fn double_threshold(anti_pattern: &AntiPattern, key: &str, fallback: f64) -> f64 {
    anti_pattern
        .value(key)
        .and_then(|value| value.as_double())
        .unwrap_or(fallback)
}

pub(crate) fn log_verdict(result: &QueryResultItem, project: &Project) {
    tracing::info!(
        anti_pattern = %result.anti_pattern().print_name,
        project = %project.name,
        detected = result.is_detected(),
        "analysis finished"
    );
    tracing::debug!(details = ?result.details(), "evidence");
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
