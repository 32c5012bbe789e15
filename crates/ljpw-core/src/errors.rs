use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`LjpwError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (field names, sizes, offending values).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the LJPW engine.
///
/// Every family signals a caller contract violation; none of them is
/// transient and none is retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum LjpwError {
    /// A coordinate axis lies outside `[0, 1]`.
    #[error("range error: {0}")]
    Range(ErrorInfo),
    /// A raw metric is missing or outside its declared range.
    #[error("calibration error: {0}")]
    Calibration(ErrorInfo),
    /// Malformed coupling matrix, weights or profile.
    #[error("configuration error: {0}")]
    Configuration(ErrorInfo),
    /// Too few (or unusable) paired observations for a regression fit.
    #[error("insufficient data: {0}")]
    InsufficientData(ErrorInfo),
    /// Too few domains for cross-domain or Bayesian analysis.
    #[error("insufficient domains: {0}")]
    InsufficientDomains(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl LjpwError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            LjpwError::Range(info)
            | LjpwError::Calibration(info)
            | LjpwError::Configuration(info)
            | LjpwError::InsufficientData(info)
            | LjpwError::InsufficientDomains(info)
            | LjpwError::Serde(info) => info,
        }
    }

    /// Shorthand for a [`LjpwError::Configuration`] error.
    pub fn configuration(code: &str, message: impl Into<String>) -> Self {
        LjpwError::Configuration(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`LjpwError::InsufficientData`] error.
    pub fn insufficient_data(code: &str, message: impl Into<String>) -> Self {
        LjpwError::InsufficientData(ErrorInfo::new(code, message))
    }
}
