use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    catalog::CatalogArgs,
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct InfoCommand {
    /// Template id (see `stencil list`)
    pub template: String,

    #[command(flatten)]
    pub catalog: CatalogArgs,
}

impl InfoCommand {
    pub fn run(&self) -> Result<()> {
        let registry = self.catalog.load().unwrap_or_exit();
        let template = registry.get(&self.template).unwrap_or_exit();

        let report = ops::info(&template);
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
