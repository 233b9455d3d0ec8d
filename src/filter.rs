//! Filter model: one field/operation/value comparison.
//!
//! Filters are plain values. They can be built in code or parsed from the
//! JSON carried in a `filter` query parameter:
//!
//! ```json
//! [
//!   {"field": "age", "operation": "GREATER_THAN", "value": 30},
//!   {"field": "name", "operation": "LIKE", "value": "an"}
//! ]
//! ```
//!
//! Turning filters into a query condition is the job of
//! [`build_predicate`](crate::predicate::build_predicate).

use std::fmt;

use sea_orm::Value;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::FilterError;

/// Comparison applied by a [`QueryFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    /// Exact match. A `Null` operand matches attributes that are NULL.
    Equal,
    /// Case-insensitive substring match.
    Like,
    /// Strict `>`; needs an ordinal operand.
    GreaterThan,
    /// Strict `<`; needs an ordinal operand.
    LessThan,
}

impl Operation {
    /// Whether the operation compares by ordering rather than by equality.
    #[must_use]
    pub const fn is_ordering(self) -> bool {
        matches!(self, Self::GreaterThan | Self::LessThan)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Equal => "EQUAL",
            Self::Like => "LIKE",
            Self::GreaterThan => "GREATER_THAN",
            Self::LessThan => "LESS_THAN",
        };
        f.write_str(name)
    }
}

/// Literal operand of a filter.
///
/// Deserialization is untagged and every JSON string becomes
/// [`FilterValue::Text`]. Whether text is a UUID depends on the column it is
/// compared with, so the predicate builder converts it once the column is
/// known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Uuid(Uuid),
}

impl FilterValue {
    /// Ordinal values support `GREATER_THAN` / `LESS_THAN`.
    #[must_use]
    pub const fn is_ordinal(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_) | Self::Text(_))
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Uuid(u) => write!(f, "{u}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<FilterValue> for Value {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::Null => Option::<String>::None.into(),
            FilterValue::Bool(b) => b.into(),
            FilterValue::Int(i) => i.into(),
            FilterValue::Float(x) => x.into(),
            FilterValue::Uuid(u) => u.into(),
            FilterValue::Text(s) => s.into(),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Uuid> for FilterValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A single comparison: `field <operation> value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub field: String,
    pub value: FilterValue,
    pub operation: Operation,
}

impl QueryFilter {
    pub fn new(field: impl Into<String>, value: impl Into<FilterValue>, operation: Operation) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            operation,
        }
    }

    pub fn equal(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, value, Operation::Equal)
    }

    pub fn like(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, value, Operation::Like)
    }

    pub fn greater_than(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, value, Operation::GreaterThan)
    }

    pub fn less_than(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, value, Operation::LessThan)
    }
}

/// Parse a JSON array of filters.
///
/// # Errors
///
/// Returns [`FilterError::Malformed`] when the input is not a JSON array of
/// `{field, operation, value}` objects.
pub fn parse_filters(json: &str) -> Result<Vec<QueryFilter>, FilterError> {
    serde_json::from_str(json).map_err(|e| FilterError::Malformed(e.to_string()))
}
