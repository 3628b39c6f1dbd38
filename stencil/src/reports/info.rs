//! Info command report data structures.

use super::output::{Output, Report};

/// Report data for a single template.
#[derive(Debug)]
pub struct InfoReport {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Unrendered file name pattern.
    pub file_name: Option<String>,
    pub dependencies: Vec<String>,
    pub variables: Vec<VariableInfo>,
    /// Example preset names.
    pub examples: Vec<String>,
}

/// A schema variable, formatted for display.
#[derive(Debug)]
pub struct VariableInfo {
    pub name: String,
    pub label: String,
    pub ty: String,
    pub default: String,
    pub options: Vec<String>,
    pub description: Option<String>,
}

impl Report for InfoReport {
    fn render(&self, out: &mut dyn Output) {
        out.newline();

        // Header
        out.preformatted(&format!("  {}", self.name));
        out.preformatted(&format!("  {}", "─".repeat(self.name.chars().count())));
        if !self.description.is_empty() {
            out.preformatted(&format!("  {}", self.description));
        }
        out.newline();

        out.key_value_indented("Id", &self.id);
        if !self.category.is_empty() {
            out.key_value_indented("Category", &self.category);
        }
        if let Some(file_name) = &self.file_name {
            out.key_value_indented("File", file_name);
        }
        if !self.dependencies.is_empty() {
            out.key_value_indented("Depends on", &self.dependencies.join(", "));
        }
        out.newline();

        if !self.variables.is_empty() {
            out.section("Variables");
            for var in &self.variables {
                out.list_item(&format!(
                    "{} ({}, default {}) {}",
                    var.name, var.ty, var.default, var.label
                ));
                if !var.options.is_empty() {
                    out.preformatted(&format!("      options: {}", var.options.join(" | ")));
                }
                if let Some(desc) = &var.description {
                    out.preformatted(&format!("      {}", desc));
                }
            }
            out.newline();
        }

        if !self.examples.is_empty() {
            out.section("Examples");
            for example in &self.examples {
                out.list_item(&format!("{}  (stencil render {} --example {})", example, self.id, example));
            }
        }
    }
}
