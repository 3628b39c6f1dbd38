//! The generation pipeline: values in, source code out.
//!
//! A [`Generator`] turns a [`Request`] into [`Generated`] output by
//! layering the template's defaults, an optional example preset and the
//! caller's values, validating the result, adding derived entity names
//! and rendering the cached node tree.

use serde::Serialize;
use stencil_core::{Context, Value, Warning};

use crate::{
    Error, Registry, Result,
    error::join_or_none,
    validate::{Mode, validate_with_mode},
};

/// What to generate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    pub template_id: String,
    /// Name of an example preset to start from
    pub example: Option<String>,
    /// Caller-supplied values; these win over defaults and the preset
    pub values: Context,
}

impl Request {
    pub fn new(template_id: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            ..Default::default()
        }
    }

    pub fn example(mut self, name: impl Into<String>) -> Self {
        self.example = Some(name.into());
        self
    }

    pub fn values(mut self, values: Context) -> Self {
        self.values = values;
        self
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name, value);
        self
    }
}

/// Result of a successful generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generated {
    pub template_id: String,
    pub output: String,
    /// Rendered file name, when the template declares one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub warnings: Vec<Warning>,
}

impl Generated {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Renders registered templates.
#[derive(Debug, Clone, Copy)]
pub struct Generator<'a> {
    registry: &'a Registry,
    mode: Mode,
}

impl<'a> Generator<'a> {
    /// Create a strict-mode generator over a registry.
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            mode: Mode::Strict,
        }
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Run the pipeline for one request.
    pub fn generate(&self, request: &Request) -> Result<Generated> {
        let id = request.template_id.as_str();
        let template = self.registry.get(id)?;

        let mut values = template.defaults();
        if let Some(name) = &request.example {
            let example = template.example(name).ok_or_else(|| {
                Box::new(Error::ExampleNotFound {
                    template: id.to_string(),
                    example: name.clone(),
                    available: join_or_none(&template.example_names()),
                })
            })?;
            tracing::debug!(template = %id, example = %name, "applying example preset");
            values = values.merged(&example.values);
        }
        values = values.merged(&request.values);

        let validated =
            validate_with_mode(&template.variables, &values, self.mode).map_err(|errors| {
                tracing::debug!(template = %id, errors = errors.len(), "validation failed");
                Box::new(Error::InvalidValues {
                    template: id.to_string(),
                    errors,
                })
            })?;

        let ctx = stencil_core::augment(&validated.values);
        let nodes = self.registry.get_parsed(id)?;
        let rendered = stencil_engine::render(&nodes, &ctx);

        let mut warnings = validated.warnings;
        push_unique(&mut warnings, rendered.warnings);

        let file_name = match self.registry.get_parsed_file_name(id)? {
            Some(nodes) => {
                let rendered = stencil_engine::render(&nodes, &ctx);
                push_unique(&mut warnings, rendered.warnings);
                Some(rendered.output)
            }
            None => None,
        };

        tracing::debug!(
            template = %id,
            bytes = rendered.output.len(),
            warnings = warnings.len(),
            "generated"
        );

        Ok(Generated {
            template_id: id.to_string(),
            output: rendered.output,
            file_name,
            warnings,
        })
    }
}

fn push_unique(warnings: &mut Vec<Warning>, more: Vec<Warning>) {
    for warning in more {
        if !warnings.contains(&warning) {
            warnings.push(warning);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{Example, Template, VariableDef};

    fn registry() -> Registry {
        let registry = Registry::new();
        registry.register(
            Template::new(
                "card",
                "export function {{entityNamePascal}}Card() {}{{#if withStyles}} // styled{{/if}}",
            )
            .with_file_name("{{entityNamePascal}}Card.tsx")
            .with_variable(VariableDef::text("entityName", "User"))
            .with_variable(VariableDef::boolean("withStyles", false))
            .with_example(Example::new(
                "styled",
                Context::new().with("entityName", "merchant").with("withStyles", true),
            )),
        );
        registry
    }

    #[test]
    fn test_defaults_only() {
        let registry = registry();
        let generated = Generator::new(&registry)
            .generate(&Request::new("card"))
            .unwrap();
        assert_eq!(generated.output, "export function UserCard() {}");
        assert_eq!(generated.file_name.as_deref(), Some("UserCard.tsx"));
        assert!(!generated.has_warnings());
    }

    #[test]
    fn test_file_name_parsed_once() {
        let registry = registry();
        let generator = Generator::new(&registry);

        generator.generate(&Request::new("card")).unwrap();
        let cached = registry.get_parsed_file_name("card").unwrap().unwrap();
        let generated = generator
            .generate(&Request::new("card").set("entityName", "Order"))
            .unwrap();
        let again = registry.get_parsed_file_name("card").unwrap().unwrap();

        assert!(Arc::ptr_eq(&cached, &again));
        assert_eq!(generated.file_name.as_deref(), Some("OrderCard.tsx"));
    }

    #[test]
    fn test_example_then_values() {
        let registry = registry();
        let request = Request::new("card")
            .example("styled")
            .set("entityName", "PaymentLink");
        let generated = Generator::new(&registry).generate(&request).unwrap();
        assert_eq!(
            generated.output,
            "export function PaymentLinkCard() {} // styled"
        );
    }

    #[test]
    fn test_unknown_example() {
        let registry = registry();
        let err = Generator::new(&registry)
            .generate(&Request::new("card").example("plain"))
            .unwrap_err();
        match *err {
            Error::ExampleNotFound { available, .. } => assert_eq!(available, "styled"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_strict_and_lenient() {
        let registry = registry();
        let request = Request::new("card").set("withStyles", "yes please");

        let err = Generator::new(&registry).generate(&request).unwrap_err();
        assert_eq!(err.validation_errors().len(), 1);
        assert_eq!(err.validation_errors()[0].field, "withStyles");

        let generated = Generator::new(&registry)
            .mode(Mode::Lenient)
            .generate(&request)
            .unwrap();
        assert_eq!(generated.output, "export function UserCard() {}");
        assert!(matches!(
            generated.warnings.as_slice(),
            [Warning::FieldDefaulted { field, .. }] if field == "withStyles"
        ));
    }
}
