//! The provider model: one constraint check plus its message policy.

use crate::accessor::Accessor;
use crate::error::ConfigError;
use crate::messages::Messages;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// What a provider found wrong with a value.
///
/// Carries the configured parameters so a catalog can synthesize a
/// default message.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    Pattern(String),
    OneOf(Vec<String>),
    DateFormat(String),
    Ip,
    Url,
    Email,
    EqualField(String),
    /// The value has the wrong underlying type for this provider
    TypeMismatch {
        expected: Expected,
        found: &'static str,
    },
    /// Failure of a caller-defined provider with its own default message
    Custom(String),
}

impl Constraint {
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Constraint::TypeMismatch { .. })
    }
}

/// Type a provider accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    String,
    Number,
    /// Same kind as another value, e.g. the field an equality check reads
    Kind(&'static str),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::String => f.write_str("string"),
            Expected::Number => f.write_str("number"),
            Expected::Kind(kind) => f.write_str(kind),
        }
    }
}

/// Raw outcome of a check function.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    Violated(Constraint),
    Config(ConfigError),
}

impl From<Constraint> for Failure {
    fn from(constraint: Constraint) -> Self {
        Failure::Violated(constraint)
    }
}

impl From<ConfigError> for Failure {
    fn from(error: ConfigError) -> Self {
        Failure::Config(error)
    }
}

/// Failure of a provider or rule after the message policy is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// The value violates a constraint
    Invalid(String),
    /// The rule cannot be evaluated against this container
    Misconfigured(ConfigError),
}

type CheckFn = dyn Fn(&str, &Value, &Accessor<'_>) -> Result<(), Failure> + Send + Sync;

/// A single constraint check with an optional override message.
///
/// Built by the factories in [`crate::providers`] or by [`Provider::new`]
/// for caller-defined checks.
///
/// ```rust,ignore
/// use zvalid::{Constraint, Provider};
///
/// let even = Provider::new("even", |_, value, _| match value.as_f64() {
///     Some(n) if n % 2.0 == 0.0 => Ok(()),
///     _ => Err(Constraint::Custom("must be even".into()).into()),
/// });
/// ```
#[derive(Clone)]
pub struct Provider {
    code: &'static str,
    message: Option<String>,
    reference: Option<String>,
    check: Arc<CheckFn>,
}

impl Provider {
    /// Create a provider from a check function.
    ///
    /// The function receives the display name, the resolved value and the
    /// pass accessor.
    pub fn new<F>(code: &'static str, check: F) -> Self
    where
        F: Fn(&str, &Value, &Accessor<'_>) -> Result<(), Failure> + Send + Sync + 'static,
    {
        Self {
            code,
            message: None,
            reference: None,
            check: Arc::new(check),
        }
    }

    /// Set the override message used instead of the synthesized default.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Record the field this provider reads through the accessor.
    pub fn with_reference(mut self, field: impl Into<String>) -> Self {
        self.reference = Some(field.into());
        self
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Field name this provider looks up, if any.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Run the check and apply the message policy.
    ///
    /// Type mismatches always keep their descriptive text; every other
    /// constraint failure uses the override message when one is set.
    pub fn evaluate(
        &self,
        field: &str,
        value: &Value,
        accessor: &Accessor<'_>,
        messages: &dyn Messages,
    ) -> Result<(), Rejection> {
        match (self.check)(field, value, accessor) {
            Ok(()) => Ok(()),
            Err(Failure::Config(error)) => Err(Rejection::Misconfigured(error)),
            Err(Failure::Violated(constraint)) => {
                let message = match &self.message {
                    Some(custom) if !constraint.is_type_mismatch() => custom.clone(),
                    _ => messages.render(field, &constraint),
                };
                Err(Rejection::Invalid(message))
            }
        }
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("code", &self.code)
            .field("message", &self.message)
            .field("reference", &self.reference)
            .finish_non_exhaustive()
    }
}
