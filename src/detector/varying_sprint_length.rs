use crate::error::{AntipatternGuardError, Result};
use crate::model::{
    AntiPattern, ConfigValue, Configuration, Project, QueryResultItem, ResultDetail,
};
use crate::queries::NamedQuery;
use crate::rows::{RowCursor, RowSource};

use super::{Detector, LoadedQueries, integer_threshold, log_verdict};

const RESOURCE: &str = "varying_sprint_length";
const ITERATION_LENGTHS: &str = "iteration_lengths";

const MAX_DAYS_DIFFERENCE: &str = "maxDaysDifference";
const MAX_ITERATION_CHANGED: &str = "maxIterationChanged";
const DEFAULT_MAX_DAYS_DIFFERENCE: i64 = 7;
const DEFAULT_MAX_ITERATION_CHANGED: i64 = 1;

/// Running tally of significant length changes between consecutive iterations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LengthChanges {
    pub iterations: usize,
    pub changed: usize,
    previous: Option<i64>,
}

impl LengthChanges {
    /// Feeds the next iteration length. The first known length only seeds the
    /// comparison; a null length is counted but skipped.
    pub fn push(&mut self, length: Option<i64>, max_days_difference: i64) {
        self.iterations += 1;
        let Some(current) = length else {
            return;
        };
        if let Some(previous) = self.previous
            && (previous - current).abs() >= max_days_difference
        {
            self.changed += 1;
        }
        self.previous = Some(current);
    }

    #[must_use]
    pub fn from_lengths(lengths: &[Option<i64>], max_days_difference: i64) -> Self {
        let mut changes = Self::default();
        for length in lengths {
            changes.push(*length, max_days_difference);
        }
        changes
    }
}

/// Flags projects whose iteration length keeps changing.
///
/// Reads iteration lengths through a cursor, ordered by iteration name upstream.
/// A failure while reading the cursor is reported as a detection carrying the
/// error text, not as an error.
#[derive(Debug, Clone)]
pub struct VaryingSprintLengthDetector {
    anti_pattern: AntiPattern,
    queries: LoadedQueries,
}

impl Default for VaryingSprintLengthDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl VaryingSprintLengthDetector {
    #[must_use]
    pub fn new() -> Self {
        let anti_pattern = AntiPattern::new(
            2,
            "Varying Sprint Length",
            "VaryingSprintLength",
            "The length of the sprint changes very often. It is clear that iterations will be \
             different lengths at the beginning and end of the project, but the length of the \
             sprint should not change during the project.",
            vec![
                Configuration::new(
                    MAX_DAYS_DIFFERENCE,
                    "Max days difference",
                    "Maximum distance of two consecutive iterations in days",
                    ConfigValue::Integer(DEFAULT_MAX_DAYS_DIFFERENCE),
                ),
                Configuration::new(
                    MAX_ITERATION_CHANGED,
                    "Max number of iteration changed",
                    "Maximum allowed number of significant changes in iteration lengths",
                    ConfigValue::Integer(DEFAULT_MAX_ITERATION_CHANGED),
                ),
            ],
        );
        Self {
            anti_pattern,
            queries: LoadedQueries::new(RESOURCE),
        }
    }

    #[must_use]
    pub fn max_days_difference(&self) -> i64 {
        integer_threshold(
            &self.anti_pattern,
            MAX_DAYS_DIFFERENCE,
            DEFAULT_MAX_DAYS_DIFFERENCE,
        )
    }

    #[must_use]
    pub fn max_iteration_changed(&self) -> i64 {
        integer_threshold(
            &self.anti_pattern,
            MAX_ITERATION_CHANGED,
            DEFAULT_MAX_ITERATION_CHANGED,
        )
    }

    fn walk(&self, cursor: &mut dyn RowCursor, label: &str) -> Result<LengthChanges> {
        let max_days_difference = self.max_days_difference();
        let mut changes = LengthChanges::default();
        while cursor.advance()? {
            let length = cursor.current()?.fields(label).integer("iterationLength")?;
            changes.push(length, max_days_difference);
        }
        Ok(changes)
    }

    #[must_use]
    pub fn evaluate(&self, changes: LengthChanges) -> QueryResultItem {
        let max_changed = self.max_iteration_changed();
        let detected = i64::try_from(changes.changed).unwrap_or(i64::MAX) > max_changed;

        let details = vec![
            ResultDetail::new("Maximum iteration length change", max_changed),
            ResultDetail::new("Count of iterations", changes.iterations),
            ResultDetail::new("Iteration length changed", changes.changed),
            ResultDetail::conclusion(if detected {
                "Iteration length changed significantly too often"
            } else {
                "Varying iteration length is all right"
            }),
        ];

        QueryResultItem::new(&self.anti_pattern, detected, details)
    }
}

impl Detector for VaryingSprintLengthDetector {
    fn anti_pattern(&self) -> &AntiPattern {
        &self.anti_pattern
    }

    fn anti_pattern_mut(&mut self) -> &mut AntiPattern {
        &mut self.anti_pattern
    }

    fn query_resource_name(&self) -> &'static str {
        RESOURCE
    }

    /// Only the last query is streamed, so `iteration_lengths` must come last.
    fn set_queries(&mut self, queries: Vec<NamedQuery>) -> Result<()> {
        if let Some(last) = queries.last()
            && last.name != ITERATION_LENGTHS
            && queries.iter().any(|query| query.name == ITERATION_LENGTHS)
        {
            return Err(AntipatternGuardError::InvalidQueryResource {
                resource: RESOURCE.to_string(),
                reason: format!(
                    "'{ITERATION_LENGTHS}' must be the last query, found '{}'",
                    last.name
                ),
            });
        }
        self.queries.set(queries, &[ITERATION_LENGTHS])
    }

    fn analyze(&self, project: &Project, rows: &dyn RowSource) -> Result<QueryResultItem> {
        let queries = self.queries.get()?;
        let label = format!("{RESOURCE}.{ITERATION_LENGTHS}");
        let mut cursor = rows.execute_single(project, queries)?;

        let result = match self.walk(cursor.as_mut(), &label) {
            Ok(changes) => self.evaluate(changes),
            Err(err) => {
                tracing::error!(project = %project.name, error = %err, "cannot read iteration lengths");
                QueryResultItem::new(
                    &self.anti_pattern,
                    true,
                    vec![ResultDetail::new("Problem in reading database", err)],
                )
            }
        };
        log_verdict(&result, project);
        Ok(result)
    }
}

#[cfg(test)]
#[path = "varying_sprint_length_tests.rs"]
mod tests;
