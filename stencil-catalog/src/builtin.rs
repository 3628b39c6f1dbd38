//! Templates shipped with Stencil.

use crate::{Result, Template};

/// Embedded template definitions as `(file name, TOML source)`.
pub const SOURCES: &[(&str, &str)] = &[
    ("api-service.toml", include_str!("../templates/api-service.toml")),
    ("custom-hook.toml", include_str!("../templates/custom-hook.toml")),
    ("react-component.toml", include_str!("../templates/react-component.toml")),
    ("types.toml", include_str!("../templates/types.toml")),
];

/// Parse every built-in template.
pub fn templates() -> Result<Vec<Template>> {
    SOURCES
        .iter()
        .map(|(file_name, source)| Template::from_str_with_filename(source, file_name))
        .collect()
}
