//! # zvalid
//!
//! Declarative, rule-based validation for records and string-keyed maps.
//! A rule set is an ordered list of rules, each binding one field to a
//! chain of constraint providers. A pass evaluates every rule and collects
//! every violation instead of stopping at the first one.
//!
//! ## Example
//!
//! ```rust,ignore
//! use zvalid::prelude::*;
//!
//! #[derive(Record)]
//! struct Signup {
//!     name: String,
//!     password: String,
//!     #[zvalid(rename = "rePassword")]
//!     re_password: Option<String>,
//! }
//!
//! let rules = RuleSet::new()
//!     .add("name", |r| r.required())
//!     .add("password", |r| r.required().min_length(6).max_length(16))
//!     .add("rePassword", |r| r.required().equal_field("password"));
//!
//! let signup = Signup {
//!     name: "zrcoder".into(),
//!     password: "123456789".into(),
//!     re_password: Some("12345678".into()),
//! };
//!
//! let err = validate_record(&signup, &rules).unwrap_err();
//! assert_eq!(err.details()[0].message, "rePassword must equal password");
//! ```
//!
//! ## Providers
//!
//! - `required` - Rejects absent and empty values
//! - `min_length(n)` / `max_length(n)` - String length in characters
//! - `min(n)` / `max(n)` - Numeric bounds
//! - `pattern(re)` - Regex match
//! - `one_of([..])` - Membership in a fixed set of strings
//! - `date_format(layout)` - strftime-style date or time layout
//! - `email`, `ip`, `url` - Format checks
//! - `equal_field(other)` - Equality with another field of the same container
//!
//! Custom providers are closures wrapped in [`Provider::new`].
//!
//! ## Error Format
//!
//! [`ValidationError`] serializes as:
//!
//! ```json
//! {
//!   "summary": "validation failed",
//!   "details": [
//!     {"field": "rePassword", "msg": "rePassword must equal password"}
//!   ]
//! }
//! ```

extern crate self as zvalid;

mod accessor;
mod config;
mod error;
mod messages;
mod provider;
pub mod providers;
mod rule;
mod rule_set;
mod tracing_macros;
mod validator;
mod value;


pub use accessor::{Accessor, FieldMap, Record};
pub use config::{ValidatorConfig, LOCALE_VAR, SUMMARY_VAR};
pub use error::{ConfigError, Error, Result, ValidationError, Violation, DEFAULT_SUMMARY};
pub use messages::{Chinese, English, Locale, Messages};
pub use provider::{Constraint, Expected, Failure, Provider, Rejection};
pub use rule::{rule, Rule};
pub use rule_set::RuleSet;
pub use validator::{validate_json, validate_map, validate_record, validate_value, Validator};
pub use value::Value;

/// Derive [`Record`] for a struct with named fields.
///
/// Field attributes: `#[zvalid(rename = "name")]`, `#[zvalid(skip)]`.
/// Container attribute: `#[zvalid(rename_all = "camelCase")]`.
pub use zvalid_macros::Record;

/// Prelude module for validation
pub mod prelude {
    pub use crate::accessor::{FieldMap, Record};
    pub use crate::config::ValidatorConfig;
    pub use crate::error::{ConfigError, Error, ValidationError, Violation};
    pub use crate::messages::Locale;
    pub use crate::rule::{rule, Rule};
    pub use crate::rule_set::RuleSet;
    pub use crate::validator::{
        validate_json, validate_map, validate_record, validate_value, Validator,
    };
    pub use crate::value::Value;
    pub use zvalid_macros::Record;
}
