//! Template and schema types.

use std::fmt;

use serde::{Deserialize, Serialize};
use stencil_core::{Context, Value};

/// A named unit of template source plus the schema of its variables.
///
/// Templates are immutable once registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Unique id used to look the template up (e.g. "react-component")
    pub id: String,
    /// Display name
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Grouping used by listings (e.g. "components", "hooks")
    #[serde(default)]
    pub category: String,
    /// Optional file name template, rendered with the same context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Packages the generated code imports
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Template source text
    pub source: String,
    #[serde(default)]
    pub variables: Vec<VariableDef>,
    #[serde(default)]
    pub examples: Vec<Example>,
}

impl Template {
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: String::new(),
            category: String::new(),
            file_name: None,
            dependencies: Vec::new(),
            source: source.into(),
            variables: Vec::new(),
            examples: Vec::new(),
        }
    }

    pub fn with_variable(mut self, variable: VariableDef) -> Self {
        self.variables.push(variable);
        self
    }

    pub fn with_example(mut self, example: Example) -> Self {
        self.examples.push(example);
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Find a variable definition by name.
    pub fn variable(&self, name: &str) -> Option<&VariableDef> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Find an example preset by name.
    pub fn example(&self, name: &str) -> Option<&Example> {
        self.examples.iter().find(|e| e.name == name)
    }

    /// Names of all example presets.
    pub fn example_names(&self) -> Vec<String> {
        self.examples.iter().map(|e| e.name.clone()).collect()
    }

    /// A context holding every variable's default value.
    pub fn defaults(&self) -> Context {
        self.variables
            .iter()
            .map(|v| (v.name.clone(), v.default_value.clone()))
            .collect()
    }
}

/// Kind of form control a variable is collected with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    /// Free-form string
    Text,
    /// One of a fixed list of options
    Select,
    /// Strict boolean
    Boolean,
}

impl VariableType {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableType::Text => "text",
            VariableType::Select => "select",
            VariableType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Declared shape of one context entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDef {
    pub name: String,
    /// Form label; defaults to the variable name
    pub label: String,
    #[serde(rename = "type")]
    pub ty: VariableType,
    /// Allowed values for `select` variables
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(rename = "default")]
    pub default_value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VariableDef {
    fn new(name: impl Into<String>, ty: VariableType, default_value: Value) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            ty,
            options: Vec::new(),
            default_value,
            description: None,
        }
    }

    /// A `text` variable.
    pub fn text(name: impl Into<String>, default_value: impl Into<String>) -> Self {
        Self::new(name, VariableType::Text, Value::String(default_value.into()))
    }

    /// A `boolean` variable.
    pub fn boolean(name: impl Into<String>, default_value: bool) -> Self {
        Self::new(name, VariableType::Boolean, Value::Bool(default_value))
    }

    /// A `select` variable.
    pub fn select<I, S>(name: impl Into<String>, options: I, default_value: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut def = Self::new(name, VariableType::Select, Value::String(default_value.into()));
        def.options = options.into_iter().map(Into::into).collect();
        def
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Convert raw command-line text into a value of this variable's type.
    ///
    /// Booleans accept `true`/`false` (and `yes`/`no`, `1`/`0`); anything
    /// else is kept as a string so validation can report it.
    pub fn parse_value(&self, raw: &str) -> Value {
        match self.ty {
            VariableType::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Value::Bool(true),
                "false" | "no" | "0" => Value::Bool(false),
                _ => Value::String(raw.to_string()),
            },
            VariableType::Text | VariableType::Select => Value::String(raw.to_string()),
        }
    }
}

/// A named preset of variable values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub name: String,
    #[serde(default)]
    pub values: Context,
}

impl Example {
    pub fn new(name: impl Into<String>, values: Context) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}
