//! Template parsing from TOML files and strings.

use std::{
    collections::HashMap,
    ops::Range,
    path::{Path, PathBuf},
    str::FromStr,
};

use miette::SourceSpan;
use serde::Deserialize;
use stencil_core::Value;
use toml::Spanned;

use crate::{
    Error, Result,
    error::SourceContext,
    template::{Example, Template, VariableDef, VariableType},
};

/// On-disk shape of a template definition.
#[derive(Debug, Deserialize)]
struct TemplateDocument {
    template: RawHeader,
    #[serde(default)]
    variables: Vec<RawVariable>,
    #[serde(default)]
    examples: Vec<Example>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHeader {
    id: Spanned<String>,
    name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: String,
    file_name: Option<String>,
    #[serde(default)]
    dependencies: Vec<String>,
    source: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawVariable {
    name: Spanned<String>,
    label: Option<String>,
    #[serde(rename = "type")]
    ty: VariableType,
    #[serde(default)]
    options: Vec<String>,
    default: Option<Spanned<toml::Value>>,
    description: Option<String>,
}

impl FromStr for Template {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_template(s, "template.toml")
    }
}

impl Template {
    /// Parse a template definition file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = read(path)?;
        parse_template(&content, &path.display().to_string())
    }

    /// Parse a template definition with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_template(content, filename)
    }
}

/// Load every `*.toml` template in a directory, ordered by file name.
pub fn load_dir(dir: impl AsRef<Path>) -> Result<Vec<Template>> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir).map_err(|e| io_error(dir, e))?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| io_error(dir, e))?.path();
        if path.extension().is_some_and(|ext| ext == "toml") && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut seen: HashMap<String, PathBuf> = HashMap::new();
    let mut templates = Vec::with_capacity(paths.len());
    for path in paths {
        let template = Template::from_file(&path)?;
        if let Some(first) = seen.get(&template.id) {
            return Err(Box::new(Error::DuplicateTemplate {
                id: template.id,
                first: first.display().to_string(),
                second: path.display().to_string(),
            }));
        }
        seen.insert(template.id.clone(), path);
        templates.push(template);
    }

    tracing::debug!(dir = %dir.display(), count = templates.len(), "loaded template directory");
    Ok(templates)
}

/// Parse a template from content with the given filename for error reporting.
fn parse_template(content: &str, filename: &str) -> Result<Template> {
    let ctx = SourceContext::new(content, filename);
    let doc: TemplateDocument = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;

    let header = doc.template;
    validate_id(&ctx, &header.id)?;

    let mut seen: HashMap<String, Range<usize>> = HashMap::new();
    let mut variables = Vec::with_capacity(doc.variables.len());
    for raw in doc.variables {
        let span = raw.name.span();
        let name = raw.name.get_ref();
        if let Some(reason) = validate_identifier(name) {
            return Err(ctx.invalid_identifier_error(name, reason, to_span(&span)));
        }
        if let Some(first) = seen.get(name) {
            return Err(ctx.duplicate_variable_error(name, to_span(first), to_span(&span)));
        }
        seen.insert(name.clone(), span);
        variables.push(build_variable(&ctx, raw)?);
    }

    let id = header.id.into_inner();
    Ok(Template {
        name: header.name.unwrap_or_else(|| id.clone()),
        id,
        description: header.description,
        category: header.category,
        file_name: header.file_name,
        dependencies: header.dependencies,
        source: header.source,
        variables,
        examples: doc.examples,
    })
}

fn build_variable(ctx: &SourceContext, raw: RawVariable) -> Result<VariableDef> {
    let name_span = to_span(&raw.name.span());
    let name = raw.name.into_inner();

    if raw.ty == VariableType::Select && raw.options.is_empty() {
        return Err(ctx.validation_error(
            format!("select variable '{}' has no options", name),
            Some(name_span),
        ));
    }
    if raw.ty != VariableType::Select && !raw.options.is_empty() {
        return Err(ctx.validation_error(
            format!("only select variables take options, '{}' is {}", name, raw.ty),
            Some(name_span),
        ));
    }

    let default_value = match raw.default {
        Some(spanned) => {
            let span = to_span(&spanned.span());
            let value = Value::from(spanned.into_inner());
            if let Some(message) = check_default(raw.ty, &raw.options, &value) {
                return Err(ctx.invalid_default_error(&name, message, span));
            }
            value
        }
        None => match raw.ty {
            VariableType::Text => Value::String(String::new()),
            VariableType::Boolean => Value::Bool(false),
            VariableType::Select => Value::String(raw.options[0].clone()),
        },
    };

    Ok(VariableDef {
        label: raw.label.unwrap_or_else(|| name.clone()),
        name,
        ty: raw.ty,
        options: raw.options,
        default_value,
        description: raw.description,
    })
}

/// Returns a message if `value` is not a valid default for the type.
fn check_default(ty: VariableType, options: &[String], value: &Value) -> Option<String> {
    match (ty, value) {
        (VariableType::Text, Value::String(_)) => None,
        (VariableType::Boolean, Value::Bool(_)) => None,
        (VariableType::Select, Value::String(s)) if options.contains(s) => None,
        (VariableType::Select, Value::String(s)) => Some(format!(
            "'{}' is not one of: {}",
            s,
            options.join(", ")
        )),
        (ty, value) => Some(format!(
            "expected a {} default, found {}",
            ty,
            value.type_name()
        )),
    }
}

fn validate_id(ctx: &SourceContext, id: &Spanned<String>) -> Result<()> {
    let span = Some(to_span(&id.span()));
    let value = id.get_ref();
    if value.is_empty() {
        return Err(ctx.validation_error("template id cannot be empty", span));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ctx.validation_error(
            "template id may only contain letters, numbers, '-' and '_'",
            span,
        ));
    }
    Ok(())
}

/// Validate that a name is usable as a template variable.
/// Returns None if valid, Some(reason) if invalid.
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    // First character must be a letter or underscore
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if name == "this" || name == "else" {
        return Some("name is reserved by the template syntax");
    }

    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        None
    } else {
        Some("name must contain only letters, numbers, and underscores")
    }
}

fn to_span(range: &Range<usize>) -> SourceSpan {
    SourceSpan::from(range.start..range.end)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, source: std::io::Error) -> Box<Error> {
    Box::new(Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
