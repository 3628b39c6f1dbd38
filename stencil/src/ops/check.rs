//! Check operation - catalog linting.

use stencil_catalog::{Registry, Severity};

use crate::reports::{CheckReport, TemplateCheck};

/// Lint every registered template.
pub fn check(registry: &Registry) -> CheckReport {
    let mut templates = Vec::new();

    for template in registry.templates() {
        let mut checked = TemplateCheck {
            id: template.id.clone(),
            ..Default::default()
        };

        for diag in template.lint() {
            let msg = if let Some(loc) = &diag.location {
                format!("{} [{}]\n  --> {}", diag.message, diag.check, loc)
            } else {
                format!("{} [{}]", diag.message, diag.check)
            };

            match diag.severity {
                Severity::Error => checked.errors.push(msg),
                Severity::Warning => checked.warnings.push(msg),
                Severity::Info => checked.infos.push(msg),
            }
        }

        templates.push(checked);
    }

    CheckReport { templates }
}
