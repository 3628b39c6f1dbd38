//! Core operations.
//!
//! This module contains the logic behind the read-only stencil commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod info;
pub mod list;

pub use check::check;
pub use info::info;
pub use list::list;
