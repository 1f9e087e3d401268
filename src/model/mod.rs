//! Anti-pattern catalog entries, tunable thresholds and detection verdicts.

mod anti_pattern;
mod configuration;
mod result;

pub use anti_pattern::{AntiPattern, AntiPatternRef};
pub use configuration::{ConfigValue, Configuration};
pub use result::{QueryResultItem, ResultDetail};

use serde::{Deserialize, Serialize};

/// Project whose tracking data is analysed. Only passed through to the row source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
}

impl Project {
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
