//! Validator configuration.
//!
//! Settings can be built in code or read from the environment:
//!
//! - `ZVALID_LOCALE`: message catalog, `en` (default) or `zh`
//! - `ZVALID_SUMMARY`: summary text for every `ValidationError`
//!
//! # Example
//!
//! ```ignore
//! use zvalid::{Locale, Validator, ValidatorConfig};
//!
//! let config = ValidatorConfig::from_env()?;
//! let validator = Validator::new(config);
//!
//! let config = ValidatorConfig::new().locale(Locale::Chinese).summary("参数校验错误");
//! ```

use crate::error::ConfigError;
use crate::messages::Locale;

/// Environment variable selecting the message catalog.
pub const LOCALE_VAR: &str = "ZVALID_LOCALE";

/// Environment variable overriding the summary message.
pub const SUMMARY_VAR: &str = "ZVALID_SUMMARY";

/// Settings shared by every pass of a [`crate::Validator`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Catalog used for default messages
    pub locale: Locale,
    /// Summary override; the catalog's summary is used when unset
    pub summary: Option<String>,
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Load settings from `ZVALID_LOCALE` and `ZVALID_SUMMARY`.
    ///
    /// Unset variables keep their defaults; an unknown locale is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(locale) = lookup(LOCALE_VAR).filter(|v| !v.trim().is_empty()) {
            config.locale = locale.parse()?;
        }
        if let Some(summary) = lookup(SUMMARY_VAR).filter(|v| !v.is_empty()) {
            config.summary = Some(summary);
        }
        Ok(config)
    }
}
