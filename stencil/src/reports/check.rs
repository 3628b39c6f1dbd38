//! Check command report data structures.

use super::output::{Output, Report};

/// Lint results for the whole catalog.
#[derive(Debug)]
pub struct CheckReport {
    pub templates: Vec<TemplateCheck>,
}

/// Lint results for one template.
#[derive(Debug, Default)]
pub struct TemplateCheck {
    pub id: String,
    /// Error messages.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Info messages.
    pub infos: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors in any template).
    pub fn is_valid(&self) -> bool {
        self.templates.iter().all(|t| t.errors.is_empty())
    }

    fn count(&self, f: impl Fn(&TemplateCheck) -> usize) -> usize {
        self.templates.iter().map(f).sum()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for template in &self.templates {
            for error in &template.errors {
                out.warning(&format!("error: {}: {}", template.id, error));
            }
            for warning in &template.warnings {
                out.warning(&format!("warning: {}: {}", template.id, warning));
            }
            for info in &template.infos {
                out.preformatted(&format!("info: {}: {}", template.id, info));
            }
        }

        let errors = self.count(|t| t.errors.len());
        let warnings = self.count(|t| t.warnings.len());
        if errors > 0 || warnings > 0 {
            out.newline();
        }

        let total = self.templates.len();
        let noun = if total == 1 { "template" } else { "templates" };
        if self.is_valid() {
            out.preformatted(&format!("✓ {} {} checked, {} warnings", total, noun, warnings));
        } else {
            out.warning(&format!(
                "✗ {} {} checked, {} errors, {} warnings",
                total, noun, errors, warnings
            ));
        }
    }
}
