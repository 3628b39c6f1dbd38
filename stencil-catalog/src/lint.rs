//! Non-fatal checks over template definitions.

use std::collections::HashSet;

use stencil_core::{DERIVED_KEYS, ENTITY_NAME};
use stencil_engine::Node;

use crate::{Diagnostic, Template, validate::validate};

/// A check that inspects a template for issues.
pub trait Lint: Send + Sync {
    /// The name of this lint.
    fn name(&self) -> &'static str;

    /// Check the template and add any diagnostics.
    fn check(&self, template: &Template, diagnostics: &mut Vec<Diagnostic>);
}

/// The lints run by [`Template::lint`].
pub fn default_lints() -> Vec<Box<dyn Lint>> {
    vec![
        Box::new(SyntaxLint),
        Box::new(EmptyDescriptionLint),
        Box::new(NoVariablesLint),
        Box::new(ExampleValuesLint),
        Box::new(UnusedVariableLint),
    ]
}

impl Template {
    /// Run every default lint over this template.
    pub fn lint(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for lint in default_lints() {
            lint.check(self, &mut diagnostics);
        }
        diagnostics
    }
}

/// Template source and file name must compile.
pub struct SyntaxLint;

impl Lint for SyntaxLint {
    fn name(&self) -> &'static str {
        "template-syntax"
    }

    fn check(&self, template: &Template, diagnostics: &mut Vec<Diagnostic>) {
        if let Err(err) = stencil_engine::compile(&template.source) {
            diagnostics.push(
                Diagnostic::error(self.name(), err.to_string())
                    .at(format!("{}.source@{}", template.id, err.offset())),
            );
        }
        if let Some(file_name) = &template.file_name {
            if let Err(err) = stencil_engine::compile(file_name) {
                diagnostics.push(
                    Diagnostic::error(self.name(), err.to_string())
                        .at(format!("{}.file_name", template.id)),
                );
            }
        }
    }
}

/// Templates should say what they generate.
pub struct EmptyDescriptionLint;

impl Lint for EmptyDescriptionLint {
    fn name(&self) -> &'static str {
        "empty-description"
    }

    fn check(&self, template: &Template, diagnostics: &mut Vec<Diagnostic>) {
        if template.description.trim().is_empty() {
            diagnostics.push(
                Diagnostic::warning(
                    self.name(),
                    format!("template '{}' has no description", template.id),
                )
                .at(template.id.as_str()),
            );
        }
    }
}

/// A template with no variables always renders the same text.
pub struct NoVariablesLint;

impl Lint for NoVariablesLint {
    fn name(&self) -> &'static str {
        "no-variables"
    }

    fn check(&self, template: &Template, diagnostics: &mut Vec<Diagnostic>) {
        if template.variables.is_empty() {
            diagnostics.push(
                Diagnostic::info(
                    self.name(),
                    format!("template '{}' declares no variables", template.id),
                )
                .at(template.id.as_str()),
            );
        }
    }
}

/// Example presets must satisfy the schema.
pub struct ExampleValuesLint;

impl Lint for ExampleValuesLint {
    fn name(&self) -> &'static str {
        "example-values"
    }

    fn check(&self, template: &Template, diagnostics: &mut Vec<Diagnostic>) {
        let defaults = template.defaults();
        // Presets may carry extra data (lists for `each`) the schema cannot
        // describe, as long as the template reads it.
        let referenced = referenced_names(template).unwrap_or_default();

        for example in &template.examples {
            let location = format!("{}.examples.{}", template.id, example.name);

            for (key, _) in example.values.iter() {
                let known = template.variable(key).is_some()
                    || DERIVED_KEYS.contains(&key.as_str())
                    || referenced.contains(key);
                if !known {
                    diagnostics.push(
                        Diagnostic::warning(
                            self.name(),
                            format!(
                                "example '{}' sets '{}', which is not a template variable",
                                example.name, key
                            ),
                        )
                        .at(location.as_str()),
                    );
                }
            }

            let values = defaults.merged(&example.values);
            if let Err(errors) = validate(&template.variables, &values) {
                for error in errors {
                    diagnostics.push(
                        Diagnostic::warning(
                            self.name(),
                            format!("example '{}' is invalid: {}", example.name, error),
                        )
                        .at(location.as_str()),
                    );
                }
            }
        }
    }
}

/// Declared variables that the template never references.
pub struct UnusedVariableLint;

impl Lint for UnusedVariableLint {
    fn name(&self) -> &'static str {
        "unused-variable"
    }

    fn check(&self, template: &Template, diagnostics: &mut Vec<Diagnostic>) {
        // Syntax problems are reported by SyntaxLint.
        let Some(used) = referenced_names(template) else {
            return;
        };

        let derived_used = DERIVED_KEYS.iter().any(|k| used.contains(*k));
        for variable in &template.variables {
            let name = variable.name.as_str();
            if used.contains(name) || (name == ENTITY_NAME && derived_used) {
                continue;
            }
            diagnostics.push(
                Diagnostic::info(
                    self.name(),
                    format!("variable '{}' is never used", name),
                )
                .at(format!("{}.variables.{}", template.id, name)),
            );
        }
    }
}

/// Top-level names read by the source and file name, or `None` if either
/// fails to compile.
fn referenced_names(template: &Template) -> Option<HashSet<String>> {
    let mut sources = vec![template.source.as_str()];
    sources.extend(template.file_name.as_deref());

    let mut used = HashSet::new();
    for source in sources {
        let nodes = stencil_engine::compile(source).ok()?;
        collect_heads(&nodes, &mut used);
    }
    Some(used)
}

fn collect_heads(nodes: &[Node], used: &mut HashSet<String>) {
    for node in nodes {
        for path in node.paths() {
            used.insert(path.head().to_string());
        }
    }
}
