//! Ordered collections of rules.

use crate::accessor::Record;
use crate::error::ConfigError;
use crate::rule::Rule;
use std::collections::HashMap;

/// An ordered set of independent rules validated together.
///
/// Violations are reported in the order rules were added.
///
/// ```rust,ignore
/// use zvalid::{rule, RuleSet};
///
/// let rules = RuleSet::new()
///     .rule(rule("name").required())
///     .add("password", |r| r.required().min_length(6).max_length(16))
///     .add("rePassword", |r| r.required().equal_field("password"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    names: HashMap<String, String>,
    errors: Vec<ConfigError>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.push(rule);
        self
    }

    /// Append a rule for `field`, configured by `build`.
    pub fn add<F>(self, field: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(Rule) -> Rule,
    {
        self.rule(build(Rule::new(field)))
    }

    pub fn push(&mut self, rule: Rule) {
        self.register(rule.field(), rule.field());
        self.register(rule.display_name(), rule.field());
        self.rules.push(rule);
    }

    // A name may only ever point at one source field.
    fn register(&mut self, name: &str, source: &str) {
        match self.names.get(name) {
            Some(existing) if existing != source => {
                let error = ConfigError::AmbiguousName {
                    name: name.to_string(),
                    first: existing.clone(),
                    second: source.to_string(),
                };
                if !self.errors.contains(&error) {
                    self.errors.push(error);
                }
            }
            Some(_) => {}
            None => {
                self.names.insert(name.to_string(), source.to_string());
            }
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every name a rule answers to, source field or alias, mapped to the
    /// source field. Cross-field lookups resolve through it.
    pub fn names(&self) -> &HashMap<String, String> {
        &self.names
    }

    /// Whether some rule in the set answers to `name`.
    pub fn names_field(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Every `(rule display name, referenced field)` pair in the set.
    pub fn references(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules.iter().flat_map(|rule| {
            rule.references()
                .map(move |reference| (rule.display_name(), reference))
        })
    }

    /// First configuration error recorded while building the rules or
    /// adding them to the set.
    pub fn check(&self) -> Result<(), ConfigError> {
        match self
            .rules
            .iter()
            .flat_map(Rule::config_errors)
            .chain(&self.errors)
            .next()
        {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    /// Check every source field and cross-field reference against the
    /// fields a container declares.
    ///
    /// A reference may also name the alias of another rule in the set.
    pub fn check_fields(&self, container: &str, declared: &[&str]) -> Result<(), ConfigError> {
        self.check()?;

        for rule in &self.rules {
            if !declared.contains(&rule.field()) {
                return Err(ConfigError::UnknownField {
                    field: rule.field().to_string(),
                    container: container.to_string(),
                });
            }
        }

        for (field, reference) in self.references() {
            let known = declared.contains(&reference)
                || self
                    .names
                    .get(reference)
                    .is_some_and(|source| declared.contains(&source.as_str()));
            if !known {
                return Err(ConfigError::UnresolvedReference {
                    field: field.to_string(),
                    reference: reference.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Verify the set against record type `R`, returning it unchanged.
    pub fn for_record<R: Record>(self) -> Result<Self, ConfigError> {
        self.check_fields(R::record_name(), R::declared_fields())?;
        Ok(self)
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for rule in iter {
            set.push(rule);
        }
        set
    }
}

impl Extend<Rule> for RuleSet {
    fn extend<I: IntoIterator<Item = Rule>>(&mut self, iter: I) {
        for rule in iter {
            self.push(rule);
        }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        rules.into_iter().collect()
    }
}
