//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod info;
mod list;
mod output;

pub use check::{CheckReport, TemplateCheck};
pub use info::{InfoReport, VariableInfo};
pub use list::{ListEntry, ListReport};
pub use output::{Report, TerminalOutput};
