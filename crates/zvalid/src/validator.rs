//! Validation passes: resolve each rule's field, run its chain, collect
//! every violation.

use crate::accessor::{Accessor, FieldMap, Record};
use crate::config::ValidatorConfig;
use crate::error::{ConfigError, Error, ValidationError, Violation};
use crate::messages::{Chinese, English, Locale, Messages};
use crate::provider::Rejection;
use crate::rule::Rule;
use crate::rule_set::RuleSet;
use crate::tracing_macros::{trace_debug, trace_trace, trace_warn};
use crate::value::Value;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Runs rule sets against records, maps and single values.
///
/// A validator only holds configuration; it can be shared across threads
/// and reused for any number of passes.
///
/// ## Example
///
/// ```rust,ignore
/// use zvalid::{RuleSet, Validator, ValidatorConfig, Locale};
///
/// let validator = Validator::new(ValidatorConfig::new().locale(Locale::Chinese));
/// let rules = RuleSet::new().add("name", |r| r.required());
///
/// let form = serde_json::json!({ "name": "" });
/// let err = validator.validate_json(&form, &rules).unwrap_err();
/// assert_eq!(err.details()[0].message, "name 不能为空");
/// ```
#[derive(Clone)]
pub struct Validator {
    messages: Arc<dyn Messages>,
    summary: Option<String>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        let messages: Arc<dyn Messages> = match config.locale {
            Locale::English => Arc::new(English),
            Locale::Chinese => Arc::new(Chinese),
        };
        Self {
            messages,
            summary: config.summary,
        }
    }

    /// Replace the message catalog.
    pub fn with_messages(mut self, messages: impl Messages + 'static) -> Self {
        self.messages = Arc::new(messages);
        self
    }

    pub fn messages(&self) -> &dyn Messages {
        self.messages.as_ref()
    }

    /// Summary attached to every `ValidationError`.
    pub fn summary(&self) -> &str {
        self.summary
            .as_deref()
            .unwrap_or_else(|| self.messages.summary())
    }

    /// Validate a record.
    ///
    /// Every rule's source field and cross-field reference is checked
    /// against the record's declared fields before the pass.
    pub fn validate_record<R: Record>(&self, target: &R, rules: &RuleSet) -> Result<(), Error> {
        if let Err(error) = rules.check_fields(R::record_name(), R::declared_fields()) {
            trace_warn!(error = %error, "rule set does not fit record");
            return Err(error.into());
        }
        self.finish(self.collect(Accessor::record(target), rules)?)
    }

    /// Validate a string-keyed map.
    pub fn validate_map<M: FieldMap>(&self, target: &M, rules: &RuleSet) -> Result<(), Error> {
        self.finish(self.collect(Accessor::map(target), rules)?)
    }

    /// Validate a JSON object as a map.
    ///
    /// Any other JSON value is a configuration error.
    pub fn validate_json(&self, target: &serde_json::Value, rules: &RuleSet) -> Result<(), Error> {
        match target {
            serde_json::Value::Object(map) => self.validate_map(map, rules),
            other => {
                let error = ConfigError::NotAMap {
                    found: json_kind(other).to_string(),
                };
                trace_warn!(error = %error, "json target is not an object");
                Err(error.into())
            }
        }
    }

    /// Validate a single value against one rule, without any container.
    ///
    /// The rule's display name is used for messages and the violation.
    pub fn validate_value(&self, value: impl Into<Value>, rule: &Rule) -> Result<(), Error> {
        if let Some(error) = rule.config_errors().first() {
            return Err(error.clone().into());
        }
        let value = value.into();
        match rule.validate(&value, &Accessor::empty(), self.messages()) {
            Ok(()) => Ok(()),
            Err(Rejection::Invalid(message)) => {
                trace_trace!(field = rule.display_name(), %message, "value rejected");
                self.finish(vec![Violation::new(rule.display_name(), message)])
            }
            Err(Rejection::Misconfigured(error)) => {
                trace_warn!(error = %error, "rule cannot be evaluated on a bare value");
                Err(error.into())
            }
        }
    }

    /// Run every rule against `accessor` and return the violations in
    /// declaration order.
    ///
    /// A configuration error aborts the pass.
    pub fn collect(
        &self,
        accessor: Accessor<'_>,
        rules: &RuleSet,
    ) -> Result<Vec<Violation>, ConfigError> {
        rules.check()?;
        let accessor = accessor.with_rule_names(rules.names());
        if let Err(error) = check_references(&accessor, rules) {
            trace_warn!(error = %error, "validation aborted");
            return Err(error);
        }
        let messages = self.messages();
        trace_debug!(shape = accessor.shape(), rules = rules.len(), "validation pass");

        let mut details = Vec::new();
        for rule in rules {
            let Some(value) = accessor.resolve(rule.field()) else {
                if rule.is_required() {
                    trace_trace!(field = rule.field(), "required field missing");
                    details.push(Violation::new(
                        rule.display_name(),
                        rule.missing_message(messages),
                    ));
                }
                continue;
            };

            match rule.validate(&value, &accessor, messages) {
                Ok(()) => {}
                Err(Rejection::Invalid(message)) => {
                    trace_trace!(field = rule.field(), %message, "rule failed");
                    details.push(Violation::new(rule.display_name(), message));
                }
                Err(Rejection::Misconfigured(error)) => {
                    trace_warn!(field = rule.field(), error = %error, "validation aborted");
                    return Err(error);
                }
            }
        }

        trace_debug!(violations = details.len(), "validation pass finished");
        Ok(details)
    }

    fn finish(&self, details: Vec<Violation>) -> Result<(), Error> {
        ValidationError::from_details(details, self.summary()).map_err(Error::from)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("summary", &self.summary())
            .finish_non_exhaustive()
    }
}

// Every cross-field reference must name a container field or an active rule.
fn check_references(accessor: &Accessor<'_>, rules: &RuleSet) -> Result<(), ConfigError> {
    match rules
        .references()
        .find(|(_, reference)| !accessor.knows(reference))
    {
        Some((field, reference)) => Err(ConfigError::UnresolvedReference {
            field: field.to_string(),
            reference: reference.to_string(),
        }),
        None => Ok(()),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

fn default_validator() -> &'static Validator {
    static DEFAULT: OnceLock<Validator> = OnceLock::new();
    DEFAULT.get_or_init(Validator::default)
}

/// Validate a record with the default configuration.
pub fn validate_record<R: Record>(target: &R, rules: &RuleSet) -> Result<(), Error> {
    default_validator().validate_record(target, rules)
}

/// Validate a string-keyed map with the default configuration.
pub fn validate_map<M: FieldMap>(target: &M, rules: &RuleSet) -> Result<(), Error> {
    default_validator().validate_map(target, rules)
}

/// Validate a JSON object with the default configuration.
pub fn validate_json(target: &serde_json::Value, rules: &RuleSet) -> Result<(), Error> {
    default_validator().validate_json(target, rules)
}

/// Validate a single value with the default configuration.
pub fn validate_value(value: impl Into<Value>, rule: &Rule) -> Result<(), Error> {
    default_validator().validate_value(value, rule)
}
