use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    catalog::CatalogArgs,
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub catalog: CatalogArgs,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let registry = self.catalog.load().unwrap_or_exit();

        let report = ops::list(&registry);
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
