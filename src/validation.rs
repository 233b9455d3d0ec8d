//! Field validation
//!
//! [`is_valid`] is the presence check: a value passes when it is present and
//! contains something other than whitespace. A [`ValidatorRegistry`] binds
//! checks like it to named fields and collects every failure into
//! [`ValidationErrors`].
//!
//! ```rust,ignore
//! let registry = ValidatorRegistry::new().require("name").require("email");
//!
//! let payload = serde_json::json!({"name": "Ann", "email": "  "});
//! let errors = registry.validate(&payload).unwrap_err();
//! assert_eq!(errors.errors()[0].to_string(), "email: Invalid field");
//! ```

use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// Message attached to failures of [`ValidatorRegistry::require`].
pub const INVALID_FIELD: &str = "Invalid field";

/// True when `value` is present and not empty after trimming whitespace.
#[must_use]
pub fn is_valid(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Validation error with field name and message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// `Ok(())` when nothing was collected.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one error was added.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Default for ValidationErrors {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Named field lookup over a payload.
pub trait FieldValues {
    /// Textual value of `name`, or `None` when it is absent or null.
    fn field_value(&self, name: &str) -> Option<Cow<'_, str>>;
}

impl<S: std::hash::BuildHasher> FieldValues for HashMap<String, String, S> {
    fn field_value(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

/// Strings are used as-is, other non-null JSON values in their JSON form.
impl FieldValues for serde_json::Value {
    fn field_value(&self, name: &str) -> Option<Cow<'_, str>> {
        match self.get(name)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }
}

/// A check over an optional field value.
pub type Check = fn(Option<&str>) -> bool;

#[derive(Debug, Clone)]
struct Rule {
    field: String,
    check: Check,
    message: String,
}

/// Explicit list of `(field, check, message)` rules.
#[derive(Debug, Clone, Default)]
pub struct ValidatorRegistry {
    rules: Vec<Rule>,
}

impl ValidatorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn register(
        mut self,
        field: impl Into<String>,
        check: Check,
        message: impl Into<String>,
    ) -> Self {
        self.rules.push(Rule {
            field: field.into(),
            check,
            message: message.into(),
        });
        self
    }

    /// Require `field` to pass [`is_valid`].
    #[must_use]
    pub fn require(self, field: impl Into<String>) -> Self {
        self.register(field, is_valid, INVALID_FIELD)
    }

    /// Fields with at least one rule, in registration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.field.as_str())
    }

    /// Run every rule against `values`.
    ///
    /// # Errors
    ///
    /// Returns all failures, in rule order, when any rule fails.
    pub fn validate(&self, values: &impl FieldValues) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for rule in &self.rules {
            let value = values.field_value(&rule.field);
            if !(rule.check)(value.as_deref()) {
                errors.add(ValidationError::new(&rule.field, &rule.message));
            }
        }

        if !errors.is_empty() {
            tracing::debug!(failures = errors.len(), "Validation failed");
        }
        errors.result()
    }
}
