use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{AntipatternGuardError, Result};

use super::configuration::{ConfigValue, Configuration};

/// Catalog entry for one anti-pattern together with its thresholds.
///
/// `id` and `name` never change after construction. Configuration values may be
/// overwritten between analysis runs, never while one is in flight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AntiPattern {
    id: u64,
    print_name: String,
    name: String,
    description: String,
    configurations: IndexMap<String, Configuration>,
}

/// Identity of the anti-pattern a verdict belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AntiPatternRef {
    pub id: u64,
    pub print_name: String,
    pub name: String,
}

impl AntiPattern {
    #[must_use]
    pub fn new(
        id: u64,
        print_name: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        configurations: Vec<Configuration>,
    ) -> Self {
        let configurations = configurations
            .into_iter()
            .map(|configuration| (configuration.key().to_string(), configuration))
            .collect();
        Self {
            id,
            print_name: print_name.into(),
            name: name.into(),
            description: description.into(),
            configurations,
        }
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Human readable name, e.g. "Too Long Sprint".
    #[must_use]
    pub fn print_name(&self) -> &str {
        &self.print_name
    }

    /// Short code, e.g. `TooLongSprint`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn configurations(&self) -> &IndexMap<String, Configuration> {
        &self.configurations
    }

    #[must_use]
    pub fn configuration(&self, key: &str) -> Option<&Configuration> {
        self.configurations.get(key)
    }

    #[must_use]
    pub fn value(&self, key: &str) -> Option<ConfigValue> {
        self.configurations.get(key).map(Configuration::value)
    }

    /// Overwrites one configuration value by key.
    ///
    /// # Errors
    /// Returns `UnknownConfiguration` for a key this anti-pattern does not define,
    /// or `ConfigTypeMismatch` when the value kind does not fit.
    pub fn set_configuration(&mut self, key: &str, value: ConfigValue) -> Result<()> {
        let name = self.name.clone();
        let configuration = self.configurations.get_mut(key).ok_or_else(|| {
            AntipatternGuardError::UnknownConfiguration {
                anti_pattern: name.clone(),
                key: key.to_string(),
            }
        })?;
        configuration.set_value(&name, value)
    }

    pub fn reset_configurations(&mut self) {
        self.configurations.values_mut().for_each(Configuration::reset);
    }

    #[must_use]
    pub fn reference(&self) -> AntiPatternRef {
        AntiPatternRef {
            id: self.id,
            print_name: self.print_name.clone(),
            name: self.name.clone(),
        }
    }
}
