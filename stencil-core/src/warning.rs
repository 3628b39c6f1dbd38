//! Non-fatal problems reported alongside rendered output.

use std::fmt;

use serde::Serialize;

/// A warning produced while preparing or rendering a template.
///
/// Warnings never abort generation: the affected spot renders as an
/// empty string (or the field falls back to its default) and the
/// warning is returned so the caller can surface it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// `{{path}}` did not resolve against the context.
    MissingVariable { path: String },
    /// `{{#each path}}` named a value that does not exist.
    MissingCollection { path: String },
    /// `{{#each path}}` named a value that is not a list.
    NotACollection { path: String, found: String },
    /// An invalid field value was replaced by the schema default.
    FieldDefaulted { field: String, reason: String },
}

impl Warning {
    /// Short machine-readable code, e.g. `missing_variable`.
    pub fn code(&self) -> &'static str {
        match self {
            Warning::MissingVariable { .. } => "missing_variable",
            Warning::MissingCollection { .. } => "missing_collection",
            Warning::NotACollection { .. } => "not_a_collection",
            Warning::FieldDefaulted { .. } => "field_defaulted",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MissingVariable { path } => {
                write!(f, "variable '{}' is not defined", path)
            }
            Warning::MissingCollection { path } => {
                write!(f, "collection '{}' is not defined", path)
            }
            Warning::NotACollection { path, found } => {
                write!(f, "'{}' is a {}, not a list", path, found)
            }
            Warning::FieldDefaulted { field, reason } => {
                write!(f, "field '{}' reset to its default: {}", field, reason)
            }
        }
    }
}
