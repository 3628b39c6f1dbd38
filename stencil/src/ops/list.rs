//! List operation - templates grouped by category.

use stencil_catalog::Registry;

use crate::reports::{ListEntry, ListReport};

/// Collect every registered template, grouped by category.
pub fn list(registry: &Registry) -> ListReport {
    let groups = registry
        .by_category()
        .into_iter()
        .map(|(category, templates)| {
            let entries = templates
                .iter()
                .map(|t| ListEntry {
                    id: t.id.clone(),
                    name: t.name.clone(),
                    description: t.description.clone(),
                })
                .collect();
            (category, entries)
        })
        .collect();

    ListReport { groups }
}
