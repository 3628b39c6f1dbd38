//! Loading the template catalog shared by every command.

use std::path::PathBuf;

use clap::Args;
use stencil_catalog::{Registry, Result};

#[derive(Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// Directory of extra *.toml templates; these replace built-ins with the same id
    #[arg(long, value_name = "DIR")]
    pub catalog: Option<PathBuf>,
}

impl CatalogArgs {
    /// Build a registry from the built-ins plus the `--catalog` directory.
    pub fn load(&self) -> Result<Registry> {
        let registry = Registry::with_builtins()?;
        if let Some(dir) = &self.catalog {
            for template in stencil_catalog::load_dir(dir)? {
                if let Some(previous) = registry.register(template) {
                    tracing::debug!(id = %previous.id, dir = %dir.display(), "replaced built-in template");
                }
            }
        }
        Ok(registry)
    }
}
