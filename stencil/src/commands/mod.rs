mod check;
mod completions;
mod info;
mod list;
mod render;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use info::InfoCommand;
use list::ListCommand;
use render::RenderCommand;

/// Extension trait for exiting on catalog errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for stencil_catalog::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "stencil")]
#[command(version)]
#[command(about = "Generate source files from parameterized templates")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::List(cmd) => cmd.run(),
            Commands::Info(cmd) => cmd.run(),
            Commands::Render(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List available templates by category
    List(ListCommand),

    /// Show a template's variables, examples and dependencies
    Info(InfoCommand),

    /// Render a template to stdout or a file
    Render(RenderCommand),

    /// Parse and lint every template in the catalog
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
