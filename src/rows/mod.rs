//! Row source boundary: executing queries for a project and decoding their rows.

mod memory;
mod value;

pub use memory::{MemoryCursor, MemoryRowSource, ProjectSnapshot};
pub use value::{Fields, Row, Value};

use indexmap::IndexMap;

use crate::error::{AntipatternGuardError, Result};
use crate::model::Project;
use crate::queries::NamedQuery;

pub type ResultSet = Vec<Row>;

/// Executes query text against a project.
pub trait RowSource: Send + Sync {
    /// Runs `queries` in order and returns one result set per query, in the same order.
    ///
    /// # Errors
    /// Returns an error if the data for `project` cannot be read.
    fn execute_many(&self, project: &Project, queries: &[NamedQuery]) -> Result<Vec<ResultSet>>;

    /// Runs `queries` and returns a forward-only cursor over the rows of the last one.
    ///
    /// # Errors
    /// Returns an error if the data for `project` cannot be read.
    fn execute_single<'a>(
        &'a self,
        project: &Project,
        queries: &[NamedQuery],
    ) -> Result<Box<dyn RowCursor + 'a>>;
}

/// Forward-only cursor over query rows.
pub trait RowCursor {
    /// Moves to the next row. Returns `false` once the rows are exhausted.
    ///
    /// # Errors
    /// Returns an error if the next row cannot be read.
    fn advance(&mut self) -> Result<bool>;

    /// Row the cursor is positioned on.
    ///
    /// # Errors
    /// Returns an error before the first `advance` or after exhaustion.
    fn current(&self) -> Result<&Row>;
}

/// Result sets paired with the names of the queries that produced them.
#[derive(Debug, Clone)]
pub struct LabeledResultSets {
    resource: String,
    sets: IndexMap<String, ResultSet>,
}

impl LabeledResultSets {
    /// # Errors
    /// Returns `ResultSetCount` when the row source returned a different number of
    /// result sets than queries were issued.
    pub fn new(
        resource: &str,
        queries: &[NamedQuery],
        result_sets: Vec<ResultSet>,
    ) -> Result<Self> {
        if queries.len() != result_sets.len() {
            return Err(AntipatternGuardError::ResultSetCount {
                resource: resource.to_string(),
                expected: queries.len(),
                actual: result_sets.len(),
            });
        }
        let sets = queries
            .iter()
            .map(|query| query.name.clone())
            .zip(result_sets)
            .collect();
        Ok(Self {
            resource: resource.to_string(),
            sets,
        })
    }

    /// # Errors
    /// Returns `MissingQuery` if no query with this name was issued.
    pub fn rows(&self, name: &str) -> Result<&[Row]> {
        self.sets
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| AntipatternGuardError::MissingQuery {
                resource: self.resource.clone(),
                name: name.to_string(),
            })
    }

    /// First row of the named result set, `None` when it is empty.
    ///
    /// # Errors
    /// Returns `MissingQuery` if no query with this name was issued.
    pub fn first_row(&self, name: &str) -> Result<Option<&Row>> {
        self.rows(name).map(<[Row]>::first)
    }

    /// Qualified query name used in decode errors.
    #[must_use]
    pub fn query_label(&self, name: &str) -> String {
        format!("{}.{name}", self.resource)
    }

    /// All result sets in issue order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Row])> {
        self.sets
            .iter()
            .map(|(name, rows)| (name.as_str(), rows.as_slice()))
    }
}

#[cfg(test)]
#[path = "rows_tests.rs"]
mod tests;
