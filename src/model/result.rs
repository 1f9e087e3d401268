use serde::Serialize;

use super::anti_pattern::{AntiPattern, AntiPatternRef};

/// One labelled piece of evidence attached to a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultDetail {
    pub label: String,
    pub value: String,
}

impl ResultDetail {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
        }
    }

    #[must_use]
    pub fn conclusion(value: impl ToString) -> Self {
        Self::new("Conclusion", value)
    }
}

/// Verdict of one detector for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResultItem {
    anti_pattern: AntiPatternRef,
    detected: bool,
    details: Vec<ResultDetail>,
}

impl QueryResultItem {
    #[must_use]
    pub fn new(anti_pattern: &AntiPattern, detected: bool, details: Vec<ResultDetail>) -> Self {
        Self {
            anti_pattern: anti_pattern.reference(),
            detected,
            details,
        }
    }

    #[must_use]
    pub const fn anti_pattern(&self) -> &AntiPatternRef {
        &self.anti_pattern
    }

    #[must_use]
    pub const fn is_detected(&self) -> bool {
        self.detected
    }

    #[must_use]
    pub fn details(&self) -> &[ResultDetail] {
        &self.details
    }

    /// Value of the first detail with the given label.
    #[must_use]
    pub fn detail(&self, label: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|detail| detail.label == label)
            .map(|detail| detail.value.as_str())
    }
}
