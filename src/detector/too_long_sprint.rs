use crate::error::Result;
use crate::model::{
    AntiPattern, ConfigValue, Configuration, Project, QueryResultItem, ResultDetail,
};
use crate::queries::NamedQuery;
use crate::rows::{LabeledResultSets, RowSource};

use super::{Detector, LoadedQueries, integer_threshold, log_verdict};

const RESOURCE: &str = "too_long_sprint";
const ITERATION_LENGTHS: &str = "iteration_lengths";

const MAX_ITERATION_LENGTH: &str = "maxIterationLength";
const MAX_TOO_LONG_ITERATIONS: &str = "maxNumberOfTooLongIterations";
const DEFAULT_MAX_ITERATION_LENGTH: i64 = 21;
const DEFAULT_MAX_TOO_LONG_ITERATIONS: i64 = 0;

/// Flags projects whose iterations run longer than a fixed number of days.
///
/// The first and last iteration are excluded upstream by the query.
#[derive(Debug, Clone)]
pub struct TooLongSprintDetector {
    anti_pattern: AntiPattern,
    queries: LoadedQueries,
}

impl Default for TooLongSprintDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl TooLongSprintDetector {
    #[must_use]
    pub fn new() -> Self {
        let anti_pattern = AntiPattern::new(
            1,
            "Too Long Sprint",
            "TooLongSprint",
            "Iterations too long. (ideal iteration length is about 1-2 weeks, maximum 3 weeks). \
             It could also be detected here if the length of the iteration does not change often \
             (It can change at the beginning and at the end of the project, but it should not \
             change in the already started project).",
            vec![
                Configuration::new(
                    MAX_ITERATION_LENGTH,
                    "Max Iteration Length",
                    "Maximum iteration length in days",
                    ConfigValue::Integer(DEFAULT_MAX_ITERATION_LENGTH),
                ),
                Configuration::new(
                    MAX_TOO_LONG_ITERATIONS,
                    "Max number of too long iterations",
                    "Maximum number of too long iterations in project",
                    ConfigValue::Integer(DEFAULT_MAX_TOO_LONG_ITERATIONS),
                ),
            ],
        );
        Self {
            anti_pattern,
            queries: LoadedQueries::new(RESOURCE),
        }
    }

    #[must_use]
    pub fn max_iteration_length(&self) -> i64 {
        integer_threshold(
            &self.anti_pattern,
            MAX_ITERATION_LENGTH,
            DEFAULT_MAX_ITERATION_LENGTH,
        )
    }

    #[must_use]
    pub fn max_number_of_too_long_iterations(&self) -> i64 {
        integer_threshold(
            &self.anti_pattern,
            MAX_TOO_LONG_ITERATIONS,
            DEFAULT_MAX_TOO_LONG_ITERATIONS,
        )
    }

    fn decode(sets: &LabeledResultSets) -> Result<Vec<Option<i64>>> {
        let label = sets.query_label(ITERATION_LENGTHS);
        sets.rows(ITERATION_LENGTHS)?
            .iter()
            .map(|row| row.fields(&label).optional_integer("iterationLength"))
            .collect()
    }

    /// Decides on iteration lengths in days. `None` entries count toward the total
    /// but are never too long.
    #[must_use]
    pub fn evaluate(&self, iteration_lengths: &[Option<i64>]) -> QueryResultItem {
        let max_iteration_length = self.max_iteration_length();
        let max_too_long = self.max_number_of_too_long_iterations();

        let too_long = iteration_lengths
            .iter()
            .flatten()
            .filter(|length| **length > max_iteration_length)
            .count();
        let detected = i64::try_from(too_long).unwrap_or(i64::MAX) > max_too_long;

        let details = vec![
            ResultDetail::new(
                "Count of iterations without first and last",
                iteration_lengths.len(),
            ),
            ResultDetail::new("Number of too long iterations", too_long),
            ResultDetail::conclusion(if detected {
                "One or more iteration is too long"
            } else {
                "All iterations in limit"
            }),
        ];

        QueryResultItem::new(&self.anti_pattern, detected, details)
    }
}

impl Detector for TooLongSprintDetector {
    fn anti_pattern(&self) -> &AntiPattern {
        &self.anti_pattern
    }

    fn anti_pattern_mut(&mut self) -> &mut AntiPattern {
        &mut self.anti_pattern
    }

    fn query_resource_name(&self) -> &'static str {
        RESOURCE
    }

    fn set_queries(&mut self, queries: Vec<NamedQuery>) -> Result<()> {
        self.queries.set(queries, &[ITERATION_LENGTHS])
    }

    fn analyze(&self, project: &Project, rows: &dyn RowSource) -> Result<QueryResultItem> {
        let queries = self.queries.get()?;
        let sets = LabeledResultSets::new(RESOURCE, queries, rows.execute_many(project, queries)?)?;
        let result = self.evaluate(&Self::decode(&sets)?);
        log_verdict(&result, project);
        Ok(result)
    }
}

#[cfg(test)]
#[path = "too_long_sprint_tests.rs"]
mod tests;
