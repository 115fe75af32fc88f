//! Violation records, the aggregate validation error and configuration errors.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Summary used when no catalog or configuration overrides it.
pub const DEFAULT_SUMMARY: &str = "validation failed";

/// A single recorded constraint failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Display name (alias) of the rule that failed
    pub field: String,
    /// Human-readable failure message
    #[serde(rename = "msg")]
    pub message: String,
}

impl Violation {
    /// Create a new violation.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Aggregate outcome of a failed validation pass.
///
/// Serializes to:
///
/// ```json
/// {
///   "summary": "validation failed",
///   "details": [{"field": "rePassword", "msg": "rePassword must equal password"}]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Generic label, not meant to be parsed
    pub summary: String,
    /// Every violation of the pass, in rule declaration order
    pub details: Vec<Violation>,
}

impl ValidationError {
    /// Create a validation error with the default summary.
    pub fn new(details: Vec<Violation>) -> Self {
        Self::with_summary(details, DEFAULT_SUMMARY)
    }

    /// Create a validation error with a custom summary.
    pub fn with_summary(details: Vec<Violation>, summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            details,
        }
    }

    /// Wrap `details` into an error, or `Ok(())` when there are none.
    pub fn from_details(
        details: Vec<Violation>,
        summary: impl Into<String>,
    ) -> Result<(), ValidationError> {
        if details.is_empty() {
            Ok(())
        } else {
            Err(Self::with_summary(details, summary))
        }
    }

    pub fn details(&self) -> &[Violation] {
        &self.details
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    pub fn len(&self) -> usize {
        self.details.len()
    }

    /// Violations recorded for a display name.
    pub fn get(&self, field: &str) -> Option<&Violation> {
        self.details.iter().find(|v| v.field == field)
    }

    /// Details as `[{"field": .., "msg": ..}]` maps, for generic rendering.
    pub fn details_as_maps(&self) -> Vec<HashMap<String, String>> {
        self.details
            .iter()
            .map(|v| {
                HashMap::from([
                    ("field".to_string(), v.field.clone()),
                    ("msg".to_string(), v.message.clone()),
                ])
            })
            .collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} violation(s)", self.summary, self.details.len())
    }
}

impl std::error::Error for ValidationError {}

/// A rule set that cannot be evaluated against its target.
///
/// These are programming errors in the rules or the call site, never
/// failures of the validated data, and abort the pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("rule for `{field}` names a field that `{container}` does not declare")]
    UnknownField { field: String, container: String },

    #[error("rule for `{field}` references unknown field `{reference}`")]
    UnresolvedReference { field: String, reference: String },

    #[error("`{name}` names both `{first}` and `{second}`")]
    AmbiguousName {
        name: String,
        first: String,
        second: String,
    },

    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("map validation requires an object with string keys, found {found}")]
    NotAMap { found: String },

    #[error("unknown locale `{0}`")]
    UnknownLocale(String),
}

/// Error returned by the validation entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("validator configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// The validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(e) => Some(e),
            Error::Config(_) => None,
        }
    }

    /// The configuration error, if this is one.
    pub fn as_config(&self) -> Option<&ConfigError> {
        match self {
            Error::Config(e) => Some(e),
            Error::Validation(_) => None,
        }
    }

    /// Violations of a validation failure; empty for configuration errors.
    pub fn details(&self) -> &[Violation] {
        match self {
            Error::Validation(e) => e.details(),
            Error::Config(_) => &[],
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
