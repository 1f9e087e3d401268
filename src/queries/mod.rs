//! SQL resources: named query texts each detector executes through a row source.

mod directory;
mod embedded;

pub use directory::DirectoryQueries;
pub use embedded::EmbeddedQueries;

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AntipatternGuardError, Result};

static NAME_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^--\s*name:\s*([A-Za-z0-9_]+)\s*$").expect("Invalid regex"));

/// One ready-to-execute query of a SQL resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedQuery {
    pub resource: String,
    pub name: String,
    pub sql: String,
}

impl NamedQuery {
    #[must_use]
    pub fn new(
        resource: impl Into<String>,
        name: impl Into<String>,
        sql: impl Into<String>,
    ) -> Self {
        Self {
            resource: resource.into(),
            name: name.into(),
            sql: sql.into(),
        }
    }

    /// `resource.name`, unique across the catalog.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.resource, self.name)
    }
}

/// Resolves a detector's logical resource name to its query texts.
pub trait QueryProvider {
    /// # Errors
    /// Returns an error if the resource is unknown or malformed.
    fn queries(&self, resource: &str) -> Result<Vec<NamedQuery>>;
}

/// Splits resource text into queries introduced by `-- name: <key>` marker lines.
///
/// Only comments and blank lines may precede the first marker. A trailing `;` is
/// stripped from each query.
///
/// # Errors
/// Returns `InvalidQueryResource` for text outside a named query, an empty query,
/// a duplicate name, or a resource without any named query.
pub fn parse_resource(resource: &str, content: &str) -> Result<Vec<NamedQuery>> {
    let invalid = |reason: String| AntipatternGuardError::InvalidQueryResource {
        resource: resource.to_string(),
        reason,
    };

    let mut blocks: Vec<(String, Vec<&str>)> = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if let Some(caps) = NAME_MARKER.captures(trimmed) {
            let name = caps[1].to_string();
            if blocks.iter().any(|(existing, _)| *existing == name) {
                return Err(invalid(format!("duplicate query name '{name}'")));
            }
            blocks.push((name, Vec::new()));
        } else if let Some((_, lines)) = blocks.last_mut() {
            lines.push(line);
        } else if !trimmed.is_empty() && !trimmed.starts_with("--") {
            return Err(invalid(format!(
                "line {} is outside of a named query",
                index + 1
            )));
        }
    }

    if blocks.is_empty() {
        return Err(invalid("no '-- name:' marker found".to_string()));
    }

    blocks
        .into_iter()
        .map(|(name, lines)| {
            let sql = lines.join("\n");
            let sql = sql.trim().trim_end_matches(';').trim_end();
            if sql.is_empty() {
                return Err(invalid(format!("query '{name}' is empty")));
            }
            Ok(NamedQuery::new(resource, name, sql))
        })
        .collect()
}

#[cfg(test)]
#[path = "queries_tests.rs"]
mod tests;
