//! Core types and utilities for the Stencil template generator.
//!
//! This crate provides the value model shared by the engine and the
//! catalog, the case conversions used to derive identifier variants,
//! and the non-fatal warning type returned alongside rendered output.

mod case;
mod derive;
mod value;
mod warning;

// String utilities
pub use case::{to_camel_case, to_kebab_case, to_lower_case, to_pascal_case, to_snake_case};
// Derived variables
pub use derive::{DERIVED_KEYS, ENTITY_NAME, augment, derive};
// Fundamental types
pub use value::{Context, Value};
pub use warning::Warning;
