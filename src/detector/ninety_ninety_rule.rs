use crate::error::Result;
use crate::model::{
    AntiPattern, ConfigValue, Configuration, Project, QueryResultItem, ResultDetail,
};
use crate::queries::NamedQuery;
use crate::rows::{LabeledResultSets, RowSource};

use super::{Detector, LoadedQueries, double_threshold, integer_threshold, log_verdict};

const RESOURCE: &str = "ninety_ninety_rule";
const TIME_DIVISIONS: &str = "time_divisions";

const MAX_DIVISION_RANGE: &str = "maxDivisionRange";
const MAX_BAD_DIVISION_LIMIT: &str = "maxBadDivisionLimit";
const DEFAULT_MAX_DIVISION_RANGE: f64 = 1.25;
const DEFAULT_MAX_BAD_DIVISION_LIMIT: i64 = 2;

/// Flags projects where consecutive iterations keep overrunning their estimates.
#[derive(Debug, Clone)]
pub struct NinetyNinetyRuleDetector {
    anti_pattern: AntiPattern,
    queries: LoadedQueries,
}

impl Default for NinetyNinetyRuleDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl NinetyNinetyRuleDetector {
    #[must_use]
    pub fn new() -> Self {
        let anti_pattern = AntiPattern::new(
            7,
            "Ninety Ninety Rule",
            "NinetyNinetyRule",
            "The first 90 percent of the code represents the first 90 percent of development \
             time. The remaining 10 percent of the code represents another 90 percent of \
             development time. Then decide on a long delay of the project compared to the \
             original estimate. The functionality is almost done, some number is already closed \
             and is only waiting for one activity to close, but it has been open for a long time.",
            vec![
                Configuration::new(
                    MAX_DIVISION_RANGE,
                    "Maximum ratio value",
                    "Maximum ratio value of spent and estimated time",
                    ConfigValue::Double(DEFAULT_MAX_DIVISION_RANGE),
                ),
                Configuration::new(
                    MAX_BAD_DIVISION_LIMIT,
                    "Maximum iterations thresholds",
                    "Maximum number of consecutive iterations where the thresholds were exceeded",
                    ConfigValue::Integer(DEFAULT_MAX_BAD_DIVISION_LIMIT),
                ),
            ],
        );
        Self {
            anti_pattern,
            queries: LoadedQueries::new(RESOURCE),
        }
    }

    #[must_use]
    pub fn max_division_range(&self) -> f64 {
        double_threshold(
            &self.anti_pattern,
            MAX_DIVISION_RANGE,
            DEFAULT_MAX_DIVISION_RANGE,
        )
    }

    #[must_use]
    pub fn max_bad_division_limit(&self) -> i64 {
        integer_threshold(
            &self.anti_pattern,
            MAX_BAD_DIVISION_LIMIT,
            DEFAULT_MAX_BAD_DIVISION_LIMIT,
        )
    }

    /// Non-null spent/estimated ratios of every result set, in result set order
    /// and then row order.
    fn decode(sets: &LabeledResultSets) -> Result<Vec<f64>> {
        let mut ratios = Vec::new();
        for (name, rows) in sets.iter() {
            let label = sets.query_label(name);
            for row in rows {
                if let Some(ratio) = row.fields(&label).optional_number("timeDivision")? {
                    ratios.push(ratio);
                }
            }
        }
        Ok(ratios)
    }

    #[must_use]
    pub fn evaluate(&self, ratios: &[f64]) -> QueryResultItem {
        let max_range = self.max_division_range();
        let max_bad = self.max_bad_division_limit();

        if ratios.iter().all(|ratio| *ratio <= max_range) {
            return QueryResultItem::new(
                &self.anti_pattern,
                false,
                vec![ResultDetail::conclusion(
                    "All divisions of estimated and spent time are in range",
                )],
            );
        }

        let mut consecutive: i64 = 0;
        for ratio in ratios {
            if *ratio > max_range {
                consecutive += 1;
            } else {
                consecutive = 0;
            }

            if consecutive > max_bad {
                return QueryResultItem::new(
                    &self.anti_pattern,
                    true,
                    vec![ResultDetail::conclusion(format!(
                        "{max_bad} or more consecutive iterations has a bad trend in estimates"
                    ))],
                );
            }
        }

        QueryResultItem::new(
            &self.anti_pattern,
            false,
            vec![ResultDetail::conclusion(
                "No significant trend was found for estimation and time worked on activities",
            )],
        )
    }
}

impl Detector for NinetyNinetyRuleDetector {
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
        self.queries.set(queries, &[TIME_DIVISIONS])
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
#[path = "ninety_ninety_rule_tests.rs"]
mod tests;
