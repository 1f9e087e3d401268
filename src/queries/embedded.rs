use crate::error::{AntipatternGuardError, Result};

use super::{NamedQuery, QueryProvider, parse_resource};

const RESOURCES: &[(&str, &str)] = &[
    (
        "too_long_sprint",
        include_str!("../../sql/too_long_sprint.sql"),
    ),
    (
        "varying_sprint_length",
        include_str!("../../sql/varying_sprint_length.sql"),
    ),
    (
        "ninety_ninety_rule",
        include_str!("../../sql/ninety_ninety_rule.sql"),
    ),
    (
        "long_or_non_existent_feedback_loops",
        include_str!("../../sql/long_or_non_existent_feedback_loops.sql"),
    ),
];

/// SQL resources compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedQueries;

impl EmbeddedQueries {
    #[must_use]
    pub fn resource_names() -> Vec<&'static str> {
        RESOURCES.iter().map(|(name, _)| *name).collect()
    }
}

impl QueryProvider for EmbeddedQueries {
    fn queries(&self, resource: &str) -> Result<Vec<NamedQuery>> {
        let (_, content) = RESOURCES
            .iter()
            .find(|(name, _)| *name == resource)
            .ok_or_else(|| AntipatternGuardError::UnknownQueryResource(resource.to_string()))?;
        parse_resource(resource, content)
    }
}
