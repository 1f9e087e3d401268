use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{AntipatternGuardError, Result};

/// Dynamically typed field value as returned by a row source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Decimal(f64),
    Date(NaiveDate),
    Text(String),
}

impl Value {
    const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "integer",
            Self::Decimal(_) => "decimal",
            Self::Date(_) => "date",
            Self::Text(_) => "text",
        }
    }

    fn as_integer(&self) -> std::result::Result<Option<i64>, String> {
        match self {
            Self::Null => Ok(None),
            Self::Integer(v) => Ok(Some(*v)),
            other => Err(format!("expected integer, got {}", other.kind_name())),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn as_number(&self) -> std::result::Result<Option<f64>, String> {
        match self {
            Self::Null => Ok(None),
            Self::Integer(v) => Ok(Some(*v as f64)),
            Self::Decimal(v) => Ok(Some(*v)),
            other => Err(format!("expected number, got {}", other.kind_name())),
        }
    }

    fn as_date(&self) -> std::result::Result<Option<NaiveDate>, String> {
        match self {
            Self::Null => Ok(None),
            Self::Date(v) => Ok(Some(*v)),
            other => Err(format!("expected date, got {}", other.kind_name())),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// One record of a result set: field name to value, in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(IndexMap<String, Value>);

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Typed view of this row; `query` names the producing query in decode errors.
    #[must_use]
    pub const fn fields<'a>(&'a self, query: &'a str) -> Fields<'a> {
        Fields { query, row: self }
    }
}

/// Decodes fields of a single row into typed values.
///
/// Null always decodes to `None`. The `optional_*` accessors also treat an absent
/// field as `None`; the others report an absent field as a decode error. A value
/// of the wrong kind is always a decode error.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    query: &'a str,
    row: &'a Row,
}

impl Fields<'_> {
    fn decode<T>(
        &self,
        field: &str,
        required: bool,
        convert: impl FnOnce(&Value) -> std::result::Result<Option<T>, String>,
    ) -> Result<Option<T>> {
        match self.row.get(field) {
            Some(value) => {
                convert(value).map_err(|reason| AntipatternGuardError::decode(self.query, field, reason))
            }
            None if required => Err(AntipatternGuardError::decode(
                self.query,
                field,
                "field is missing",
            )),
            None => Ok(None),
        }
    }

    /// # Errors
    /// Returns a decode error if the field is missing or not an integer.
    pub fn integer(&self, field: &str) -> Result<Option<i64>> {
        self.decode(field, true, Value::as_integer)
    }

    /// # Errors
    /// Returns a decode error if the field is present but not an integer.
    pub fn optional_integer(&self, field: &str) -> Result<Option<i64>> {
        self.decode(field, false, Value::as_integer)
    }

    /// Integer or decimal field as `f64`.
    ///
    /// # Errors
    /// Returns a decode error if the field is missing or not numeric.
    pub fn number(&self, field: &str) -> Result<Option<f64>> {
        self.decode(field, true, Value::as_number)
    }

    /// # Errors
    /// Returns a decode error if the field is present but not numeric.
    pub fn optional_number(&self, field: &str) -> Result<Option<f64>> {
        self.decode(field, false, Value::as_number)
    }

    /// # Errors
    /// Returns a decode error if the field is missing or not a date.
    pub fn date(&self, field: &str) -> Result<Option<NaiveDate>> {
        self.decode(field, true, Value::as_date)
    }
}
