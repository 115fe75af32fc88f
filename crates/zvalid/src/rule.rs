//! One field's ordered provider chain.

use crate::accessor::Accessor;
use crate::error::ConfigError;
use crate::messages::Messages;
use crate::provider::{Provider, Rejection};
use crate::providers;
use crate::value::Value;

/// Validation rule for a single field.
///
/// Providers run in the order they were attached and the first failure
/// ends the chain. Rules are plain values: nothing is stored on them while
/// validating, so one rule can serve any number of concurrent passes.
///
/// ## Custom messages
///
/// [`Rule::message`] is positional: it overrides the provider attached
/// immediately before it and nothing else. Providers attached later keep
/// their default messages, and calling it again on the same provider
/// replaces the earlier override. A message given before any provider is
/// attached is dropped rather than held for the next one.
///
/// ## Example
///
/// ```rust,ignore
/// use zvalid::Rule;
///
/// let password = Rule::new("password")
///     .alias("pwd")
///     .required()
///     .message("password cannot be empty")
///     .min_length(6)
///     .max_length(16);
/// ```
#[derive(Debug, Clone)]
pub struct Rule {
    field: String,
    alias: Option<String>,
    providers: Vec<Provider>,
    required: bool,
    required_message: Option<String>,
    errors: Vec<ConfigError>,
}

/// Start a rule for `field`.
pub fn rule(field: impl Into<String>) -> Rule {
    Rule::new(field)
}

impl Rule {
    /// Create a rule resolving `field` from the validated container.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            alias: None,
            providers: Vec::new(),
            required: false,
            required_message: None,
            errors: Vec::new(),
        }
    }

    /// Name reported in violations instead of the source field.
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.alias = Some(name.into());
        self
    }

    /// Attach a provider at the end of the chain.
    pub fn provider(mut self, provider: Provider) -> Self {
        self.providers.push(provider);
        self
    }

    /// Override the failure message of the most recently attached provider.
    ///
    /// After `required()` this is also the message reported when the field
    /// is missing. Has no effect on a rule without providers.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        if let Some(last) = self.providers.pop() {
            if last.code() == "required" {
                self.required_message = Some(message.clone());
            }
            self.providers.push(last.with_message(message));
        }
        self
    }

    /// Mark the field as required and reject empty values.
    pub fn required(mut self) -> Self {
        self.required = true;
        self.provider(providers::required())
    }

    pub fn min_length(self, min: usize) -> Self {
        self.provider(providers::min_length(min))
    }

    pub fn max_length(self, max: usize) -> Self {
        self.provider(providers::max_length(max))
    }

    /// Require equality with the current value of another field.
    pub fn equal_field(self, other: impl Into<String>) -> Self {
        self.provider(providers::equal_field(other))
    }

    pub fn email(self) -> Self {
        self.provider(providers::email())
    }

    pub fn min(self, min: f64) -> Self {
        self.provider(providers::min(min))
    }

    pub fn max(self, max: f64) -> Self {
        self.provider(providers::max(max))
    }

    /// Require a regex match.
    ///
    /// An invalid expression is kept on the rule as a configuration error
    /// and reported before any validation pass that uses the rule.
    pub fn pattern(mut self, pattern: &str) -> Self {
        match providers::pattern(pattern) {
            Ok(provider) => self.provider(provider),
            Err(error) => {
                self.errors.push(error.clone());
                self.provider(providers::misconfigured("pattern", error))
            }
        }
    }

    /// Like [`Rule::pattern`] but fails immediately on an invalid expression.
    pub fn try_pattern(self, pattern: &str) -> Result<Self, ConfigError> {
        Ok(self.provider(providers::pattern(pattern)?))
    }

    /// Require one of a fixed set of strings.
    pub fn one_of<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.provider(providers::one_of(values))
    }

    /// Require a string matching a strftime-style layout such as `%Y-%m-%d`.
    pub fn date_format(self, layout: impl Into<String>) -> Self {
        self.provider(providers::date_format(layout))
    }

    pub fn ip(self) -> Self {
        self.provider(providers::ip())
    }

    pub fn url(self) -> Self {
        self.provider(providers::url())
    }

    /// Source field resolved from the container.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Name used in violations: the alias, or the source field.
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.field)
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn required_message(&self) -> Option<&str> {
        self.required_message.as_deref()
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// Fields read by cross-field providers of this rule.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().filter_map(Provider::reference)
    }

    /// Configuration errors recorded while the rule was built.
    pub fn config_errors(&self) -> &[ConfigError] {
        &self.errors
    }

    /// Message reported when a required field cannot be resolved.
    pub fn missing_message(&self, messages: &dyn Messages) -> String {
        self.required_message
            .clone()
            .unwrap_or_else(|| messages.required(self.display_name()))
    }

    /// Run the provider chain against an already resolved value.
    pub fn validate(
        &self,
        value: &Value,
        accessor: &Accessor<'_>,
        messages: &dyn Messages,
    ) -> Result<(), Rejection> {
        let name = self.display_name();
        for provider in &self.providers {
            provider.evaluate(name, value, accessor, messages)?;
        }
        Ok(())
    }
}
