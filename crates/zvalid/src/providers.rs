//! Built-in provider factories.
//!
//! Each factory captures its configuration and returns a [`Provider`].
//! Override messages are attached afterwards with [`Provider::with_message`]
//! or through the rule builder.

use crate::error::ConfigError;
use crate::provider::{Constraint, Expected, Failure, Provider};
use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::net::IpAddr;
use std::sync::OnceLock;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        // RFC 5322 simplified
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
        ).unwrap()
    })
}

fn expect_str(value: &Value) -> Result<&str, Failure> {
    value.as_str().ok_or_else(|| {
        Failure::Violated(Constraint::TypeMismatch {
            expected: Expected::String,
            found: value.kind(),
        })
    })
}

fn expect_number(value: &Value) -> Result<f64, Failure> {
    value.as_f64().ok_or_else(|| {
        Failure::Violated(Constraint::TypeMismatch {
            expected: Expected::Number,
            found: value.kind(),
        })
    })
}

/// Fails on empty values: null, `""`, empty lists and maps, and empty
/// optionals (looked through one level).
pub fn required() -> Provider {
    Provider::new("required", |_, value, _| {
        if value.is_empty() {
            Err(Constraint::Required.into())
        } else {
            Ok(())
        }
    })
}

/// String length (in characters) must be at least `min`.
pub fn min_length(min: usize) -> Provider {
    Provider::new("min_length", move |_, value, _| {
        if expect_str(value)?.chars().count() < min {
            Err(Constraint::MinLength(min).into())
        } else {
            Ok(())
        }
    })
}

/// String length (in characters) must be at most `max`.
pub fn max_length(max: usize) -> Provider {
    Provider::new("max_length", move |_, value, _| {
        if expect_str(value)?.chars().count() > max {
            Err(Constraint::MaxLength(max).into())
        } else {
            Ok(())
        }
    })
}

/// Numeric value must not be less than `min`.
pub fn min(min: f64) -> Provider {
    Provider::new("min", move |_, value, _| {
        if expect_number(value)? < min {
            Err(Constraint::Min(min).into())
        } else {
            Ok(())
        }
    })
}

/// Numeric value must not be greater than `max`.
pub fn max(max: f64) -> Provider {
    Provider::new("max", move |_, value, _| {
        if expect_number(value)? > max {
            Err(Constraint::Max(max).into())
        } else {
            Ok(())
        }
    })
}

/// String must match `pattern` (unanchored, like `Regex::is_match`).
///
/// The expression is compiled here, so an invalid pattern is reported
/// when the rule is built.
pub fn pattern(pattern: &str) -> Result<Provider, ConfigError> {
    let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;
    let source = pattern.to_string();
    Ok(Provider::new("pattern", move |_, value, _| {
        if regex.is_match(expect_str(value)?) {
            Ok(())
        } else {
            Err(Constraint::Pattern(source.clone()).into())
        }
    }))
}

/// Provider standing in for a check that could not be built.
///
/// Reports `error` on every evaluation.
pub(crate) fn misconfigured(code: &'static str, error: ConfigError) -> Provider {
    Provider::new(code, move |_, _, _| Err(error.clone().into()))
}

/// String must be exactly one of `values`.
pub fn one_of<I, S>(values: I) -> Provider
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let allowed: Vec<String> = values.into_iter().map(Into::into).collect();
    Provider::new("one_of", move |_, value, _| {
        let s = expect_str(value)?;
        if allowed.iter().any(|candidate| candidate == s) {
            Ok(())
        } else {
            Err(Constraint::OneOf(allowed.clone()).into())
        }
    })
}

fn matches_layout(s: &str, layout: &str) -> bool {
    DateTime::parse_from_str(s, layout).is_ok()
        || NaiveDateTime::parse_from_str(s, layout).is_ok()
        || NaiveDate::parse_from_str(s, layout).is_ok()
        || NaiveTime::parse_from_str(s, layout).is_ok()
}

/// String must parse under the strftime-style `layout`, e.g. `%Y-%m-%d`.
///
/// The layout has to describe a complete date, time, date-time or zoned
/// date-time.
pub fn date_format(layout: impl Into<String>) -> Provider {
    let layout = layout.into();
    Provider::new("date_format", move |_, value, _| {
        if matches_layout(expect_str(value)?, &layout) {
            Ok(())
        } else {
            Err(Constraint::DateFormat(layout.clone()).into())
        }
    })
}

/// String must be an IPv4 or IPv6 address.
pub fn ip() -> Provider {
    Provider::new("ip", |_, value, _| {
        if expect_str(value)?.parse::<IpAddr>().is_ok() {
            Ok(())
        } else {
            Err(Constraint::Ip.into())
        }
    })
}

fn is_request_uri(s: &str) -> bool {
    if s.starts_with('/') {
        return !s.contains(char::is_whitespace)
            && url::Url::parse("http://localhost/")
                .and_then(|base| base.join(s))
                .is_ok();
    }
    url::Url::parse(s).is_ok()
}

/// String must be an absolute URL or an absolute path.
pub fn url() -> Provider {
    Provider::new("url", |_, value, _| {
        if is_request_uri(expect_str(value)?) {
            Ok(())
        } else {
            Err(Constraint::Url.into())
        }
    })
}

/// String must look like an email address.
pub fn email() -> Provider {
    Provider::new("email", |_, value, _| {
        if email_regex().is_match(expect_str(value)?) {
            Ok(())
        } else {
            Err(Constraint::Email.into())
        }
    })
}

/// Same-type equality; `None` when the kinds cannot be compared.
fn same_value(a: &Value, b: &Value) -> Option<bool> {
    match (a, b) {
        (Value::String(x), Value::String(y)) => Some(x == y),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => Some(x == y),
            _ if a.kind() == b.kind() => Some(a == b),
            _ => None,
        },
    }
}

/// Value must equal the current value of `other`.
///
/// `other` is looked up through the pass accessor, by container field name
/// or by the alias of another rule. A name the container does not declare
/// is a configuration error; a declared but absent field never matches.
pub fn equal_field(other: impl Into<String>) -> Provider {
    let other = other.into();
    let reference = other.clone();
    Provider::new("equal_field", move |field, value, accessor| {
        let resolved =
            accessor
                .lookup(&other)
                .ok_or_else(|| ConfigError::UnresolvedReference {
                    field: field.to_string(),
                    reference: other.clone(),
                })?;
        let Some(other_value) = resolved else {
            return Err(Constraint::EqualField(other.clone()).into());
        };
        match same_value(value, &other_value) {
            Some(true) => Ok(()),
            Some(false) => Err(Constraint::EqualField(other.clone()).into()),
            None => Err(Constraint::TypeMismatch {
                expected: Expected::Kind(other_value.kind()),
                found: value.kind(),
            }
            .into()),
        }
    })
    .with_reference(reference)
}
