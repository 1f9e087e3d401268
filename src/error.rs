use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AntipatternGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to access file: {path}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot decode field '{field}' of query '{query}': {reason}")]
    Decode {
        query: String,
        field: String,
        reason: String,
    },

    #[error("Row source error: {0}")]
    RowSource(String),

    #[error("Query resource '{resource}' produced {actual} result sets, expected {expected}")]
    ResultSetCount {
        resource: String,
        expected: usize,
        actual: usize,
    },

    #[error("Query resource '{resource}' has no query named '{name}'")]
    MissingQuery { resource: String, name: String },

    #[error("Queries for resource '{resource}' were never loaded")]
    QueriesNotLoaded { resource: String },

    #[error("Unknown query resource: {0}")]
    UnknownQueryResource(String),

    #[error("Invalid query resource '{resource}': {reason}")]
    InvalidQueryResource { resource: String, reason: String },

    #[error("Unknown anti-pattern: {0}")]
    UnknownAntiPattern(String),

    #[error("Anti-pattern '{anti_pattern}' has no configuration '{key}'")]
    UnknownConfiguration { anti_pattern: String, key: String },

    #[error(
        "Configuration '{key}' of anti-pattern '{anti_pattern}' expects {expected} value, got {actual}"
    )]
    ConfigTypeMismatch {
        anti_pattern: String,
        key: String,
        expected: &'static str,
        actual: String,
    },
}

impl AntipatternGuardError {
    pub(crate) fn decode(
        query: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Decode {
            query: query.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AntipatternGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
