//! Template catalog and generation pipeline for Stencil.
//!
//! A [`Template`] pairs template source with a schema of [`VariableDef`]s.
//! Templates are authored as TOML documents, collected in a [`Registry`]
//! and rendered through a [`Generator`]:
//!
//! ```ignore
//! let registry = Registry::with_builtins()?;
//! let generated = Generator::new(&registry)
//!     .mode(Mode::Lenient)
//!     .generate(&Request::new("react-component").set("entityName", "MerchantCard"))?;
//! println!("{}", generated.output);
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod builtin;
mod diagnostic;
mod error;
mod generate;
mod lint;
mod parse;
mod registry;
mod template;
mod validate;

pub use diagnostic::{Diagnostic, Severity};
pub use error::{Error, Result, SourceContext};
pub use generate::{Generated, Generator, Request};
pub use lint::{Lint, default_lints};
pub use parse::load_dir;
pub use registry::Registry;
pub use template::{Example, Template, VariableDef, VariableType};
pub use validate::{FieldErrorKind, Mode, Validated, ValidationError, validate, validate_with_mode};
