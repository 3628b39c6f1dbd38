use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    catalog::CatalogArgs,
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub catalog: CatalogArgs,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let registry = self.catalog.load().unwrap_or_exit();

        let report = ops::check(&registry);
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }

        Ok(())
    }
}
