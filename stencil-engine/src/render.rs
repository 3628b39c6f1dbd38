//! Evaluates a node tree against a context.

use stencil_core::{Context, Value, Warning};

use crate::{
    node::{Node, VarPath},
    scope::{Frame, Scope},
};

/// Rendered text plus the non-fatal problems met along the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rendered {
    pub output: String,
    pub warnings: Vec<Warning>,
}

impl Rendered {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Render nodes against a context.
///
/// Unresolved variables and collections render as empty strings and are
/// reported once each in [`Rendered::warnings`]. Neither the tree nor the
/// context is modified.
pub fn render(nodes: &[Node], ctx: &Context) -> Rendered {
    let mut renderer = Renderer::default();
    renderer.nodes(nodes, &Scope::new(ctx));
    tracing::trace!(
        bytes = renderer.out.output.len(),
        warnings = renderer.out.warnings.len(),
        "rendered template"
    );
    renderer.out
}

#[derive(Default)]
struct Renderer {
    out: Rendered,
}

impl Renderer {
    fn nodes(&mut self, nodes: &[Node], scope: &Scope<'_>) {
        for node in nodes {
            self.node(node, scope);
        }
    }

    fn node(&mut self, node: &Node, scope: &Scope<'_>) {
        match node {
            Node::Text(text) => self.out.output.push_str(text),
            Node::Var(path) => match scope.resolve(path) {
                Some(value) => self.write_value(&value),
                None => self.warn(Warning::MissingVariable {
                    path: path.to_string(),
                }),
            },
            Node::If {
                cond,
                body,
                otherwise,
            } => {
                let truthy = is_truthy(scope, cond);
                self.branch(truthy, body, otherwise, scope);
            }
            Node::Unless {
                cond,
                body,
                otherwise,
            } => {
                let truthy = is_truthy(scope, cond);
                self.branch(!truthy, body, otherwise, scope);
            }
            Node::IfEq {
                name,
                literal,
                body,
                otherwise,
            } => {
                let matched = scope
                    .resolve(name)
                    .map(|value| value.to_string() == *literal)
                    .unwrap_or(literal.is_empty());
                self.branch(matched, body, otherwise, scope);
            }
            Node::Each {
                collection,
                body,
                otherwise,
            } => self.each(collection, body, otherwise, scope),
        }
    }

    fn branch(&mut self, take_body: bool, body: &[Node], otherwise: &[Node], scope: &Scope<'_>) {
        if take_body {
            self.nodes(body, scope);
        } else {
            self.nodes(otherwise, scope);
        }
    }

    fn each(
        &mut self,
        collection: &VarPath,
        body: &[Node],
        otherwise: &[Node],
        scope: &Scope<'_>,
    ) {
        let Some(value) = scope.resolve(collection) else {
            self.warn(Warning::MissingCollection {
                path: collection.to_string(),
            });
            self.nodes(otherwise, scope);
            return;
        };

        let Some(items) = value.as_list() else {
            self.warn(Warning::NotACollection {
                path: collection.to_string(),
                found: value.type_name().to_string(),
            });
            self.nodes(otherwise, scope);
            return;
        };

        if items.is_empty() {
            self.nodes(otherwise, scope);
            return;
        }

        for (index, item) in items.iter().enumerate() {
            let frame = Frame {
                item,
                index,
                len: items.len(),
                parent: scope.frame,
            };
            let child = Scope {
                root: scope.root,
                frame: Some(&frame),
            };
            self.nodes(body, &child);
        }
    }

    fn write_value(&mut self, value: &Value) {
        use std::fmt::Write;
        // Writing into a String cannot fail.
        let _ = write!(self.out.output, "{}", value);
    }

    fn warn(&mut self, warning: Warning) {
        if !self.out.warnings.contains(&warning) {
            self.out.warnings.push(warning);
        }
    }
}

fn is_truthy(scope: &Scope<'_>, path: &VarPath) -> bool {
    scope.resolve(path).is_some_and(|value| value.is_truthy())
}
