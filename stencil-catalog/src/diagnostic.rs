//! Findings reported by [`Template::lint`](crate::Template::lint).
//!
//! Lints never stop a template from loading. `stencil check` turns
//! error-level findings into a failing exit code; everything else is advice
//! for template authors.

use std::fmt;

use serde::Serialize;

/// How much a lint finding matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Rendering this template will fail (e.g. a block is never closed).
    Error,
    /// The template renders, but an example preset or the metadata is off.
    Warning,
    /// Housekeeping, such as a variable nothing reads.
    Info,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        *self == Severity::Error
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One lint finding about a template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Name of the lint that fired, e.g. `unused-variable`
    pub check: String,
    pub message: String,
    /// Dotted position inside the template, e.g. `types.examples.merchant`
    /// or `react-component.source@120` for a byte offset into the source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Diagnostic {
    fn new(severity: Severity, check: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            check: check.into(),
            message: message.into(),
            location: None,
        }
    }

    pub fn error(check: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, check, message)
    }

    pub fn warning(check: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, check, message)
    }

    pub fn info(check: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, check, message)
    }

    /// Attach the template location the finding refers to.
    pub fn at(self, location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..self
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.check, self.message)?;
        match &self.location {
            Some(location) => write!(f, " at {}", location),
            None => Ok(()),
        }
    }
}
