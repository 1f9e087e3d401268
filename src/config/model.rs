use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::ConfigValue;

/// Supported config version.
pub const CONFIG_VERSION: &str = "1";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Config schema version. Only "1" is accepted; missing means current.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Where SQL resources come from.
    #[serde(default, skip_serializing_if = "QueriesConfig::is_default")]
    pub queries: QueriesConfig,

    /// Threshold overrides `[anti_patterns.<Code>] key = value`.
    #[serde(default)]
    pub anti_patterns: IndexMap<String, IndexMap<String, ThresholdValue>>,
}

/// Query resource location [queries].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct QueriesConfig {
    /// Directory holding `<resource>.sql` files. Relative paths are resolved
    /// against the directory of the config file. Built-in queries when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl QueriesConfig {
    fn is_default(&self) -> bool {
        self.directory.is_none()
    }
}

/// Override value as written in TOML.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThresholdValue {
    Integer(i64),
    Float(f64),
}

impl From<ThresholdValue> for ConfigValue {
    fn from(value: ThresholdValue) -> Self {
        match value {
            ThresholdValue::Integer(v) => Self::Integer(v),
            ThresholdValue::Float(v) => Self::Double(v),
        }
    }
}

impl From<ConfigValue> for ThresholdValue {
    fn from(value: ConfigValue) -> Self {
        match value {
            ConfigValue::Integer(v) => Self::Integer(v),
            // Shortest decimal form of the f32, not its widened binary value.
            ConfigValue::Float(v) => Self::Float(v.to_string().parse().unwrap_or(f64::from(v))),
            ConfigValue::Double(v) => Self::Float(v),
        }
    }
}

impl fmt::Display for ThresholdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
