//! Validation of caller-supplied values against a template schema.

use std::fmt;

use miette::Diagnostic;
use stencil_core::{Context, Value, Warning};
use thiserror::Error;

use crate::template::{VariableDef, VariableType};

/// How validation failures are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Any invalid field blocks rendering.
    #[default]
    Strict,
    /// Invalid fields fall back to their default and produce a warning.
    Lenient,
}

/// Why a field was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldErrorKind {
    /// No value supplied for a schema variable
    Missing,
    /// A `boolean` variable got something other than a boolean
    ExpectedBoolean { found: &'static str },
    /// A `text` or `select` variable got something other than a string
    ExpectedText { found: &'static str },
    /// A `select` value outside the allowed options
    NotInOptions { value: String, options: Vec<String> },
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldErrorKind::Missing => write!(f, "missing value"),
            FieldErrorKind::ExpectedBoolean { found } => {
                write!(f, "expected true or false, found {}", found)
            }
            FieldErrorKind::ExpectedText { found } => {
                write!(f, "expected a string, found {}", found)
            }
            FieldErrorKind::NotInOptions { value, options } => write!(
                f,
                "'{}' is not one of the allowed options: {}",
                value,
                options.join(", ")
            ),
        }
    }
}

/// A schema violation for a single field.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
#[error("{field}: {kind}")]
#[diagnostic(code(stencil::invalid_field))]
pub struct ValidationError {
    pub field: String,
    pub kind: FieldErrorKind,
}

/// Values that passed validation, with any lenient-mode fallbacks applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    pub values: Context,
    pub warnings: Vec<Warning>,
}

/// Check values against a schema.
///
/// Keys in `values` that the schema does not declare are ignored.
/// All failing fields are reported, in schema order.
pub fn validate(
    schema: &[VariableDef],
    values: &Context,
) -> std::result::Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = schema
        .iter()
        .filter_map(|def| check_field(def, values.get(&def.name)))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate and apply the failure policy for `mode`.
///
/// In strict mode the result is the input unchanged or every error. In
/// lenient mode validation always succeeds: each invalid field is replaced
/// by its schema default and reported as [`Warning::FieldDefaulted`].
pub fn validate_with_mode(
    schema: &[VariableDef],
    values: &Context,
    mode: Mode,
) -> std::result::Result<Validated, Vec<ValidationError>> {
    let errors = match validate(schema, values) {
        Ok(()) => {
            return Ok(Validated {
                values: values.clone(),
                warnings: Vec::new(),
            });
        }
        Err(errors) => errors,
    };

    if mode == Mode::Strict {
        return Err(errors);
    }

    let mut fallbacks = Context::new();
    let mut warnings = Vec::with_capacity(errors.len());
    for error in errors {
        if let Some(def) = schema.iter().find(|d| d.name == error.field) {
            fallbacks.insert(def.name.clone(), def.default_value.clone());
        }
        tracing::debug!(field = %error.field, reason = %error.kind, "falling back to default");
        warnings.push(Warning::FieldDefaulted {
            field: error.field,
            reason: error.kind.to_string(),
        });
    }

    Ok(Validated {
        values: values.merged(&fallbacks),
        warnings,
    })
}

fn check_field(def: &VariableDef, value: Option<&Value>) -> Option<ValidationError> {
    let kind = match (def.ty, value) {
        (_, None) => FieldErrorKind::Missing,
        (VariableType::Boolean, Some(Value::Bool(_))) => return None,
        (VariableType::Boolean, Some(other)) => FieldErrorKind::ExpectedBoolean {
            found: other.type_name(),
        },
        (VariableType::Text, Some(Value::String(_))) => return None,
        (VariableType::Select, Some(Value::String(s))) if def.options.contains(s) => return None,
        (VariableType::Select, Some(Value::String(s))) => FieldErrorKind::NotInOptions {
            value: s.clone(),
            options: def.options.clone(),
        },
        (VariableType::Text | VariableType::Select, Some(other)) => FieldErrorKind::ExpectedText {
            found: other.type_name(),
        },
    };

    Some(ValidationError {
        field: def.name.clone(),
        kind,
    })
}
