use std::fmt;

use serde::Serialize;

use crate::error::{AntipatternGuardError, Result};

/// Value of a tunable threshold. The kind is fixed when the configuration is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ConfigValue {
    Integer(i64),
    Float(f32),
    Double(f64),
}

impl ConfigValue {
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "an integer",
            Self::Float(_) => "a float",
            Self::Double(_) => "a double",
        }
    }

    #[must_use]
    pub const fn as_integer(self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(v),
            Self::Float(_) | Self::Double(_) => None,
        }
    }

    #[must_use]
    pub const fn as_float(self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(v),
            Self::Integer(_) | Self::Double(_) => None,
        }
    }

    #[must_use]
    pub const fn as_double(self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(v),
            Self::Integer(_) | Self::Float(_) => None,
        }
    }

    /// Converts `other` into the kind of `self`.
    ///
    /// Integers widen into float and double configurations; fractional values
    /// never narrow into integer ones.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn coerce(self, other: Self) -> Option<Self> {
        match (self, other) {
            (Self::Integer(_), Self::Integer(v)) => Some(Self::Integer(v)),
            (Self::Float(_), Self::Integer(v)) => Some(Self::Float(v as f32)),
            (Self::Float(_), Self::Float(v)) => Some(Self::Float(v)),
            (Self::Float(_), Self::Double(v)) => Some(Self::Float(v as f32)),
            (Self::Double(_), Self::Integer(v)) => Some(Self::Double(v as f64)),
            (Self::Double(_), Self::Float(v)) => Some(Self::Double(f64::from(v))),
            (Self::Double(_), Self::Double(v)) => Some(Self::Double(v)),
            (Self::Integer(_), Self::Float(_) | Self::Double(_)) => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
        }
    }
}

/// Named, user-overridable threshold of an anti-pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Configuration {
    key: String,
    print_name: String,
    description: String,
    default: ConfigValue,
    value: ConfigValue,
}

impl Configuration {
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        print_name: impl Into<String>,
        description: impl Into<String>,
        default: ConfigValue,
    ) -> Self {
        Self {
            key: key.into(),
            print_name: print_name.into(),
            description: description.into(),
            default,
            value: default,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn print_name(&self) -> &str {
        &self.print_name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn default_value(&self) -> ConfigValue {
        self.default
    }

    #[must_use]
    pub const fn value(&self) -> ConfigValue {
        self.value
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.value == self.default
    }

    /// Replaces the current value, keeping the configuration's kind.
    ///
    /// # Errors
    /// Returns `ConfigTypeMismatch` when `value` cannot be represented in this kind.
    pub fn set_value(&mut self, anti_pattern: &str, value: ConfigValue) -> Result<()> {
        let coerced =
            self.default
                .coerce(value)
                .ok_or_else(|| AntipatternGuardError::ConfigTypeMismatch {
                    anti_pattern: anti_pattern.to_string(),
                    key: self.key.clone(),
                    expected: self.default.kind_name(),
                    actual: value.to_string(),
                })?;
        self.value = coerced;
        Ok(())
    }

    pub const fn reset(&mut self) {
        self.value = self.default;
    }
}
