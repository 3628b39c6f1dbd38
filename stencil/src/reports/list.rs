//! List command report data structures.

use super::output::{Output, Report};

/// Templates grouped by category, in category order.
#[derive(Debug)]
pub struct ListReport {
    pub groups: Vec<(String, Vec<ListEntry>)>,
}

/// One template in a listing.
#[derive(Debug)]
pub struct ListEntry {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        if self.groups.is_empty() {
            out.preformatted("No templates available");
            return;
        }

        for (i, (category, entries)) in self.groups.iter().enumerate() {
            if i > 0 {
                out.newline();
            }
            let heading = if category.is_empty() {
                "uncategorized"
            } else {
                category
            };
            out.section(heading);
            for entry in entries {
                let summary = if entry.description.is_empty() {
                    entry.name.clone()
                } else {
                    format!("{} - {}", entry.name, entry.description)
                };
                out.key_value_indented(&entry.id, &summary);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render_groups() {
        let report = ListReport {
            groups: vec![
                (
                    "hooks".into(),
                    vec![ListEntry {
                        id: "custom-hook".into(),
                        name: "Custom Hook".into(),
                        description: "Fetches data".into(),
                    }],
                ),
                (
                    String::new(),
                    vec![ListEntry {
                        id: "misc".into(),
                        name: "Misc".into(),
                        description: String::new(),
                    }],
                ),
            ],
        };

        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            [
                "hooks:",
                "  custom-hook Custom Hook - Fetches data",
                "",
                "uncategorized:",
                "  misc        Misc",
            ]
        );
    }
}
