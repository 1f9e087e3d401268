use crate::config::Config;
use crate::error::{AntipatternGuardError, Result};
use crate::model::AntiPattern;
use crate::queries::QueryProvider;

use super::{
    Detector, LongOrNonExistentFeedbackLoopsDetector, NinetyNinetyRuleDetector,
    TooLongSprintDetector, VaryingSprintLengthDetector,
};

/// Detectors known to the application, in catalog id order.
pub struct DetectorRegistry {
    detectors: Vec<Box<dyn Detector>>,
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl DetectorRegistry {
    #[must_use]
    pub fn new(detectors: Vec<Box<dyn Detector>>) -> Self {
        let mut detectors = detectors;
        detectors.sort_by_key(|detector| detector.anti_pattern().id());
        Self { detectors }
    }

    #[must_use]
    pub fn with_builtin() -> Self {
        Self::new(vec![
            Box::new(TooLongSprintDetector::new()),
            Box::new(VaryingSprintLengthDetector::new()),
            Box::new(LongOrNonExistentFeedbackLoopsDetector::new()),
            Box::new(NinetyNinetyRuleDetector::new()),
        ])
    }

    /// Resolves and injects the queries of every detector.
    ///
    /// # Errors
    /// Returns the first resource that cannot be resolved or lacks a required query.
    pub fn load_queries(&mut self, provider: &dyn QueryProvider) -> Result<()> {
        for detector in &mut self.detectors {
            let resource = detector.query_resource_name();
            let queries = provider.queries(resource)?;
            tracing::debug!(resource, count = queries.len(), "queries loaded");
            detector.set_queries(queries)?;
        }
        Ok(())
    }

    /// Applies threshold overrides from `config`, keyed by anti-pattern code.
    ///
    /// # Errors
    /// Returns an error for an unknown code, an unknown key, or a value of the
    /// wrong kind.
    pub fn apply_config(&mut self, config: &Config) -> Result<()> {
        for (code, overrides) in &config.anti_patterns {
            let detector = self
                .find_mut(code)
                .ok_or_else(|| AntipatternGuardError::UnknownAntiPattern(code.clone()))?;
            for (key, value) in overrides {
                detector
                    .anti_pattern_mut()
                    .set_configuration(key, (*value).into())?;
                tracing::debug!(anti_pattern = %code, key = %key, value = %value, "threshold overridden");
            }
        }
        Ok(())
    }

    /// Looks a detector up by anti-pattern code (case-insensitive).
    #[must_use]
    pub fn find(&self, code: &str) -> Option<&dyn Detector> {
        self.detectors
            .iter()
            .find(|detector| detector.anti_pattern().name().eq_ignore_ascii_case(code))
            .map(|detector| &**detector)
    }

    fn find_mut(&mut self, code: &str) -> Option<&mut Box<dyn Detector>> {
        self.detectors
            .iter_mut()
            .find(|detector| detector.anti_pattern().name().eq_ignore_ascii_case(code))
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Detector> {
        self.detectors.iter().map(|detector| &**detector)
    }

    pub fn anti_patterns(&self) -> impl Iterator<Item = &AntiPattern> {
        self.iter().map(|detector| detector.anti_pattern())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
