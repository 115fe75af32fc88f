//! Default message synthesis.
//!
//! A catalog turns a failed [`Constraint`] into the text reported for a
//! field when the provider carries no override message.

use crate::error::{ConfigError, DEFAULT_SUMMARY};
use crate::provider::{Constraint, Expected};
use std::str::FromStr;

/// Message catalog used to synthesize default failure messages.
pub trait Messages: Send + Sync {
    /// Render the default message for `constraint` on the field displayed as `field`.
    fn render(&self, field: &str, constraint: &Constraint) -> String;

    /// Message for a required field that could not be resolved.
    fn required(&self, field: &str) -> String {
        self.render(field, &Constraint::Required)
    }

    /// Summary carried by every `ValidationError`.
    fn summary(&self) -> &str;
}

/// English catalog, the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl Messages for English {
    fn render(&self, field: &str, constraint: &Constraint) -> String {
        match constraint {
            Constraint::Required => format!("{field} is required"),
            Constraint::MinLength(n) => format!("{field} must be at least {n} characters long"),
            Constraint::MaxLength(n) => format!("{field} must be at most {n} characters long"),
            Constraint::Min(n) => format!("{field} must not be less than {n}"),
            Constraint::Max(n) => format!("{field} must not be greater than {n}"),
            Constraint::Pattern(_) => format!("{field} does not match the required format"),
            Constraint::OneOf(values) => {
                format!("{field} must be one of: [{}]", values.join(", "))
            }
            Constraint::DateFormat(layout) => {
                format!("{field} does not match the date format {layout}")
            }
            Constraint::Ip => format!("{field} is not a valid IP address"),
            Constraint::Url => format!("{field} is not a valid URL"),
            Constraint::Email => format!("{field} must be a valid email address"),
            Constraint::EqualField(other) => format!("{field} must equal {other}"),
            Constraint::TypeMismatch { expected, found } => {
                format!("{field} must be of type {expected}, found {found}")
            }
            Constraint::Custom(message) => message.clone(),
        }
    }

    fn summary(&self) -> &str {
        DEFAULT_SUMMARY
    }
}

/// Chinese catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chinese;

impl Messages for Chinese {
    fn render(&self, field: &str, constraint: &Constraint) -> String {
        match constraint {
            Constraint::Required => format!("{field} 不能为空"),
            Constraint::MinLength(n) => format!("{field} 最小长度为 {n}"),
            Constraint::MaxLength(n) => format!("{field} 最大长度为 {n}"),
            Constraint::Min(n) => format!("{field} 不能小于 {n}"),
            Constraint::Max(n) => format!("{field} 不能大于 {n}"),
            Constraint::Pattern(_) => format!("{field} 格式不符合要求"),
            Constraint::OneOf(values) => {
                format!("{field} 必须是以下值之一: [{}]", values.join(" "))
            }
            Constraint::DateFormat(layout) => {
                format!("{field} 格式不符合要求，正确格式应为: {layout}")
            }
            Constraint::Ip => format!("{field} 不是有效的IP地址"),
            Constraint::Url => format!("{field} 不是有效的URL地址"),
            Constraint::Email => format!("{field} 必须是一个有效的邮箱地址"),
            Constraint::EqualField(other) => format!("{field} 必须等于 {other}"),
            Constraint::TypeMismatch { expected, .. } => {
                let kind = match *expected {
                    Expected::String => "字符串",
                    Expected::Number => "数值",
                    Expected::Kind(kind) => kind,
                };
                format!("{field} 必须是{kind}类型")
            }
            Constraint::Custom(message) => message.clone(),
        }
    }

    fn summary(&self) -> &str {
        "参数校验错误"
    }
}

/// Built-in catalogs selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    Chinese,
}

impl Locale {
    /// The catalog for this locale.
    pub fn catalog(self) -> &'static dyn Messages {
        match self {
            Locale::English => &English,
            Locale::Chinese => &Chinese,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Chinese => "zh",
        }
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" | "en-gb" | "english" => Ok(Locale::English),
            "zh" | "zh-cn" | "zh-hans" | "chinese" => Ok(Locale::Chinese),
            _ => Err(ConfigError::UnknownLocale(s.to_string())),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
