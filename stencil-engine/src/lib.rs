//! Template engine for the Stencil code generator.
//!
//! Templates are plain source text with `{{...}}` tags:
//!
//! - `{{name}}`, `{{this.field}}`, `{{@index}}` interpolate values
//! - `{{#if name}}...{{/if}}` and `{{#unless name}}...{{/unless}}` test truthiness
//! - `{{#if_eq name 'literal'}}...{{/if_eq}}` compares a value to a literal
//! - `{{#each list}}...{{/each}}` repeats its body for each item
//! - `{{else}}` splits any block into a body and an alternative
//! - `{{! comment }}` is dropped and `\{{` emits a literal `{{`
//!
//! Source goes through [`tokenize`], then [`parse`] into an immutable
//! [`Node`] tree, which [`render`] evaluates against a [`Context`].
//! A parsed tree holds no render state, so one tree can be shared and
//! rendered from several threads at once.
//!
//! # Example
//!
//! ```ignore
//! let nodes = stencil_engine::compile("Hello {{name}}!")?;
//! let ctx = Context::new().with("name", "World");
//! assert_eq!(stencil_engine::render(&nodes, &ctx).output, "Hello World!");
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod lexer;
mod node;
mod parser;
mod render;
mod scope;
mod token;

pub use error::{Error, Result};
pub use lexer::tokenize;
pub use node::{Node, VarPath};
pub use parser::{DEFAULT_MAX_DEPTH, Parser, parse};
pub use render::{Rendered, render};
pub use stencil_core::{Context, Value, Warning};
pub use token::{BlockKind, Span, SpannedToken, Token};

/// Tokenize and parse a template in one step.
pub fn compile(source: &str) -> Result<Vec<Node>> {
    let tokens = tokenize(source)?;
    parse(&tokens)
}

/// Compile and render a template in one step.
pub fn render_str(source: &str, ctx: &Context) -> Result<Rendered> {
    let nodes = compile(source)?;
    Ok(render(&nodes, ctx))
}
