use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{AntipatternGuardError, Result};
use crate::model::Project;
use crate::queries::NamedQuery;

use super::{ResultSet, Row, RowCursor, RowSource};

/// Pre-computed query results for one project, keyed by qualified query name
/// (`resource.name`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub project: Project,
    #[serde(default)]
    pub result_sets: IndexMap<String, ResultSet>,
}

impl ProjectSnapshot {
    #[must_use]
    pub fn new(project: Project) -> Self {
        Self {
            project,
            result_sets: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_result_set(mut self, qualified_name: impl Into<String>, rows: ResultSet) -> Self {
        self.result_sets.insert(qualified_name.into(), rows);
        self
    }

    /// # Errors
    /// Returns an error if `content` is not a valid snapshot document.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|source| AntipatternGuardError::FileAccess {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&content)
    }
}

/// Row source answering queries from in-memory project snapshots.
///
/// Queries are matched by qualified name, not by SQL text. A query without a
/// recorded result set yields an empty one.
#[derive(Debug, Clone, Default)]
pub struct MemoryRowSource {
    snapshots: HashMap<i64, ProjectSnapshot>,
}

impl MemoryRowSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_snapshot(mut self, snapshot: ProjectSnapshot) -> Self {
        self.insert(snapshot);
        self
    }

    pub fn insert(&mut self, snapshot: ProjectSnapshot) {
        self.snapshots.insert(snapshot.project.id, snapshot);
    }

    fn snapshot(&self, project: &Project) -> Result<&ProjectSnapshot> {
        self.snapshots.get(&project.id).ok_or_else(|| {
            AntipatternGuardError::RowSource(format!(
                "no data recorded for project {} ({})",
                project.id, project.name
            ))
        })
    }

    fn result_set(snapshot: &ProjectSnapshot, query: &NamedQuery) -> ResultSet {
        let name = query.qualified_name();
        snapshot.result_sets.get(&name).cloned().unwrap_or_else(|| {
            tracing::debug!(query = %name, "no recorded result set, using empty one");
            Vec::new()
        })
    }
}

impl RowSource for MemoryRowSource {
    fn execute_many(&self, project: &Project, queries: &[NamedQuery]) -> Result<Vec<ResultSet>> {
        let snapshot = self.snapshot(project)?;
        Ok(queries
            .iter()
            .map(|query| Self::result_set(snapshot, query))
            .collect())
    }

    fn execute_single<'a>(
        &'a self,
        project: &Project,
        queries: &[NamedQuery],
    ) -> Result<Box<dyn RowCursor + 'a>> {
        let snapshot = self.snapshot(project)?;
        let rows = queries
            .last()
            .map(|query| Self::result_set(snapshot, query))
            .unwrap_or_default();
        Ok(Box::new(MemoryCursor::new(rows)))
    }
}

/// Cursor over an owned result set.
#[derive(Debug, Clone)]
pub struct MemoryCursor {
    rows: ResultSet,
    position: Option<usize>,
}

impl MemoryCursor {
    #[must_use]
    pub const fn new(rows: ResultSet) -> Self {
        Self {
            rows,
            position: None,
        }
    }
}

impl RowCursor for MemoryCursor {
    fn advance(&mut self) -> Result<bool> {
        let next = self.position.map_or(0, |position| position + 1);
        self.position = Some(next.min(self.rows.len()));
        Ok(next < self.rows.len())
    }

    fn current(&self) -> Result<&Row> {
        self.position
            .and_then(|position| self.rows.get(position))
            .ok_or_else(|| {
                AntipatternGuardError::RowSource("cursor is not positioned on a row".to_string())
            })
    }
}
