use chrono::NaiveDate;

use crate::error::Result;
use crate::model::{
    AntiPattern, ConfigValue, Configuration, Project, QueryResultItem, ResultDetail,
};
use crate::queries::NamedQuery;
use crate::rows::{LabeledResultSets, RowSource};

use super::{Detector, LoadedQueries, float_threshold, log_verdict};

const RESOURCE: &str = "long_or_non_existent_feedback_loops";
const TOTAL_ITERATIONS: &str = "total_iterations";
const AVERAGE_ITERATION_LENGTH: &str = "average_iteration_length";
const ITERATIONS_WITH_FEEDBACK: &str = "iterations_with_feedback";
const FEEDBACK_ACTIVITY_DATES: &str = "feedback_activity_dates";
const PROJECT_START: &str = "project_start";
const PROJECT_END: &str = "project_end";
const FEEDBACK_WIKI_DATES: &str = "feedback_wiki_dates";

const REQUIRED_QUERIES: &[&str] = &[
    TOTAL_ITERATIONS,
    AVERAGE_ITERATION_LENGTH,
    ITERATIONS_WITH_FEEDBACK,
    FEEDBACK_ACTIVITY_DATES,
    PROJECT_START,
    PROJECT_END,
    FEEDBACK_WIKI_DATES,
];

const DIVISION_OF_ITERATIONS: &str = "divisionOfIterationsWithFeedbackLoop";
const MAX_GAP_RATE: &str = "maxGapBetweenFeedbackLoopRate";
const DEFAULT_DIVISION_OF_ITERATIONS: f32 = 0.5;
const DEFAULT_MAX_GAP_RATE: f32 = 2.0;

const TOO_LONG_CONCLUSION: &str = "Customer feedback loop is too long";
const SPACING_OK_CONCLUSION: &str =
    "Customer feedback has been detected and there is not too much gap between them";

/// Facts the feedback-loop decision is made on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackFacts {
    pub total_iterations: i64,
    /// Whole days, truncated.
    pub average_iteration_length: i64,
    pub iterations_with_feedback_activity: i64,
    /// Chronological end dates of feedback activities.
    pub activity_end_dates: Vec<NaiveDate>,
    pub project_start: Option<NaiveDate>,
    pub project_end: Option<NaiveDate>,
    /// Chronological dates of wiki edits that record customer meetings.
    pub wiki_dates: Vec<NaiveDate>,
    pub iterations_with_feedback_wiki: i64,
}

impl FeedbackFacts {
    #[allow(clippy::cast_possible_truncation)]
    fn decode(sets: &LabeledResultSets) -> Result<Self> {
        let mut facts = Self::default();

        if let Some(row) = sets.first_row(TOTAL_ITERATIONS)? {
            let label = sets.query_label(TOTAL_ITERATIONS);
            facts.total_iterations = row.fields(&label).integer("numberOfIterations")?.unwrap_or(0);
        }
        if let Some(row) = sets.first_row(AVERAGE_ITERATION_LENGTH)? {
            let label = sets.query_label(AVERAGE_ITERATION_LENGTH);
            facts.average_iteration_length = row
                .fields(&label)
                .number("averageIterationLength")?
                .map_or(0, |average| average.trunc() as i64);
        }
        if let Some(row) = sets.first_row(ITERATIONS_WITH_FEEDBACK)? {
            let label = sets.query_label(ITERATIONS_WITH_FEEDBACK);
            facts.iterations_with_feedback_activity = row
                .fields(&label)
                .integer("totalCountOfIterationsWithFeedbackActivity")?
                .unwrap_or(0);
        }
        facts.activity_end_dates = Self::dates(sets, FEEDBACK_ACTIVITY_DATES, "endDate")?;
        if let Some(row) = sets.first_row(PROJECT_START)? {
            facts.project_start = row.fields(&sets.query_label(PROJECT_START)).date("startDate")?;
        }
        if let Some(row) = sets.first_row(PROJECT_END)? {
            facts.project_end = row.fields(&sets.query_label(PROJECT_END)).date("endDate")?;
        }
        facts.wiki_dates = Self::dates(sets, FEEDBACK_WIKI_DATES, "appointmentDate")?;
        facts.iterations_with_feedback_wiki =
            i64::try_from(sets.rows(FEEDBACK_WIKI_DATES)?.len()).unwrap_or(i64::MAX);

        Ok(facts)
    }

    fn dates(sets: &LabeledResultSets, name: &str, field: &str) -> Result<Vec<NaiveDate>> {
        let label = sets.query_label(name);
        let mut dates = Vec::new();
        for row in sets.rows(name)? {
            if let Some(date) = row.fields(&label).date(field)? {
                dates.push(date);
            }
        }
        Ok(dates)
    }
}

/// First gap, in days, between consecutive feedback points that reaches `max_gap`.
///
/// The walk starts at the project start date. Without one, the first feedback
/// date only seeds the walk.
#[allow(clippy::cast_precision_loss)]
fn first_long_gap(start: Option<NaiveDate>, dates: &[NaiveDate], max_gap: f64) -> Option<i64> {
    let mut previous = start;
    for date in dates {
        if let Some(last) = previous {
            let days = date.signed_duration_since(last).num_days();
            if days as f64 >= max_gap {
                return Some(days);
            }
        }
        previous = Some(*date);
    }
    None
}

/// Flags projects where customer feedback is rare or far apart.
///
/// Calendar activities are the primary evidence. Wiki pages recording customer
/// meetings are consulted only when too few activities were found.
#[derive(Debug, Clone)]
pub struct LongOrNonExistentFeedbackLoopsDetector {
    anti_pattern: AntiPattern,
    queries: LoadedQueries,
}

impl Default for LongOrNonExistentFeedbackLoopsDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LongOrNonExistentFeedbackLoopsDetector {
    #[must_use]
    pub fn new() -> Self {
        let anti_pattern = AntiPattern::new(
            6,
            "Long Or Non Existent Feedback Loops",
            "LongOrNonExistentFeedbackLoops",
            "Long spacings between customer feedback or no feedback. The customer enters the \
             project and sees the final result. In the end, the customer may not get what he \
             really wanted. With long intervals of feedback, some misunderstood functionality \
             can be created and we have to spend a lot of effort and time to redo it.",
            vec![
                Configuration::new(
                    DIVISION_OF_ITERATIONS,
                    "Division of iterations with feedback loop",
                    "Minimum percentage of the total number of iterations with feedback loop (0,1)",
                    ConfigValue::Float(DEFAULT_DIVISION_OF_ITERATIONS),
                ),
                Configuration::new(
                    MAX_GAP_RATE,
                    "Maximum gap between feedback loop rate",
                    "Value that multiplies average iteration length for given project. Result is \
                     maximum threshold value for gap between feedback loops in days.",
                    ConfigValue::Float(DEFAULT_MAX_GAP_RATE),
                ),
            ],
        );
        Self {
            anti_pattern,
            queries: LoadedQueries::new(RESOURCE),
        }
    }

    #[must_use]
    pub fn division_of_iterations_with_feedback_loop(&self) -> f32 {
        float_threshold(
            &self.anti_pattern,
            DIVISION_OF_ITERATIONS,
            DEFAULT_DIVISION_OF_ITERATIONS,
        )
    }

    #[must_use]
    pub fn max_gap_between_feedback_loop_rate(&self) -> f32 {
        float_threshold(&self.anti_pattern, MAX_GAP_RATE, DEFAULT_MAX_GAP_RATE)
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn evaluate(&self, facts: &FeedbackFacts) -> QueryResultItem {
        let required_activities =
            facts.total_iterations as f64 * f64::from(self.division_of_iterations_with_feedback_loop());

        if facts.iterations_with_feedback_activity >= facts.total_iterations {
            return self.every_iteration_has_feedback(
                facts.total_iterations,
                facts.iterations_with_feedback_activity,
                "In each iteration is at least one activity that represents feedback loop",
            );
        }

        if facts.activity_end_dates.len() as f64 > required_activities {
            return self.check_spacing(facts, &facts.activity_end_dates);
        }

        tracing::debug!(
            activities = facts.activity_end_dates.len(),
            "too few feedback activities, falling back to wiki pages"
        );
        if facts.iterations_with_feedback_wiki >= facts.total_iterations {
            return self.every_iteration_has_feedback(
                facts.total_iterations,
                facts.iterations_with_feedback_wiki,
                "In each iteration is created/edited at least one wiki page that represents \
                 feedback loop",
            );
        }

        self.check_spacing(facts, &facts.wiki_dates)
    }

    fn every_iteration_has_feedback(
        &self,
        total_iterations: i64,
        with_feedback: i64,
        conclusion: &str,
    ) -> QueryResultItem {
        QueryResultItem::new(
            &self.anti_pattern,
            false,
            vec![
                ResultDetail::new("Number of iterations", total_iterations),
                ResultDetail::new("Number of iterations with feedback loops", with_feedback),
                ResultDetail::conclusion(conclusion),
            ],
        )
    }

    #[allow(clippy::cast_precision_loss)]
    fn check_spacing(&self, facts: &FeedbackFacts, dates: &[NaiveDate]) -> QueryResultItem {
        let max_gap = f64::from(self.max_gap_between_feedback_loop_rate())
            * facts.average_iteration_length as f64;

        match first_long_gap(facts.project_start, dates, max_gap) {
            Some(days) => QueryResultItem::new(
                &self.anti_pattern,
                true,
                vec![
                    ResultDetail::new("Days between", days),
                    ResultDetail::new("Average iteration length", facts.average_iteration_length),
                    ResultDetail::conclusion(TOO_LONG_CONCLUSION),
                ],
            ),
            None => QueryResultItem::new(
                &self.anti_pattern,
                false,
                vec![
                    ResultDetail::new("Average iteration length", facts.average_iteration_length),
                    ResultDetail::conclusion(SPACING_OK_CONCLUSION),
                ],
            ),
        }
    }
}

impl Detector for LongOrNonExistentFeedbackLoopsDetector {
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
        self.queries.set(queries, REQUIRED_QUERIES)
    }

    fn analyze(&self, project: &Project, rows: &dyn RowSource) -> Result<QueryResultItem> {
        let queries = self.queries.get()?;
        let sets = LabeledResultSets::new(RESOURCE, queries, rows.execute_many(project, queries)?)?;
        let facts = FeedbackFacts::decode(&sets)?;
        tracing::debug!(
            project = %project.name,
            start = ?facts.project_start,
            end = ?facts.project_end,
            "feedback facts decoded"
        );
        let result = self.evaluate(&facts);
        log_verdict(&result, project);
        Ok(result)
    }
}

#[cfg(test)]
#[path = "feedback_loops_tests.rs"]
mod tests;
