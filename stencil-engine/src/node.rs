//! The parsed template tree.

use std::fmt;

/// A dotted variable reference such as `name`, `this.email` or `@index`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VarPath {
    raw: String,
    segments: Vec<String>,
}

impl VarPath {
    /// Build a path from already-validated text.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let segments = raw.split('.').map(str::to_string).collect();
        Self { raw, segments }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The first segment, which selects the scope the path resolves in.
    pub fn head(&self) -> &str {
        self.segments.first().map(String::as_str).unwrap_or_default()
    }
}

impl fmt::Display for VarPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A node in the template tree.
///
/// Block nodes own their children; `otherwise` holds the nodes after an
/// `{{else}}` and is empty when the block has none.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    Var(VarPath),
    If {
        cond: VarPath,
        body: Vec<Node>,
        otherwise: Vec<Node>,
    },
    Unless {
        cond: VarPath,
        body: Vec<Node>,
        otherwise: Vec<Node>,
    },
    IfEq {
        name: VarPath,
        literal: String,
        body: Vec<Node>,
        otherwise: Vec<Node>,
    },
    Each {
        collection: VarPath,
        body: Vec<Node>,
        otherwise: Vec<Node>,
    },
}

impl Node {
    /// Every variable path referenced by this node and its children,
    /// in source order.
    pub fn paths(&self) -> Vec<&VarPath> {
        let mut paths = Vec::new();
        self.collect_paths(&mut paths);
        paths
    }

    fn collect_paths<'a>(&'a self, out: &mut Vec<&'a VarPath>) {
        let (head, children): (Option<&VarPath>, [&[Node]; 2]) = match self {
            Node::Text(_) => return,
            Node::Var(path) => {
                out.push(path);
                return;
            }
            Node::If {
                cond,
                body,
                otherwise,
            }
            | Node::Unless {
                cond,
                body,
                otherwise,
            } => (Some(cond), [body.as_slice(), otherwise.as_slice()]),
            Node::IfEq {
                name,
                body,
                otherwise,
                ..
            } => (Some(name), [body.as_slice(), otherwise.as_slice()]),
            Node::Each {
                collection,
                body,
                otherwise,
            } => (Some(collection), [body.as_slice(), otherwise.as_slice()]),
        };
        out.extend(head);
        for child in children.into_iter().flatten() {
            child.collect_paths(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_path_segments() {
        let path = VarPath::new("this.user.name");
        assert_eq!(path.head(), "this");
        assert_eq!(path.segments().len(), 3);
        assert_eq!(path.to_string(), "this.user.name");
    }

    #[test]
    fn test_paths_in_source_order() {
        let node = Node::Each {
            collection: VarPath::new("users"),
            body: vec![
                Node::Var(VarPath::new("this.name")),
                Node::If {
                    cond: VarPath::new("this.admin"),
                    body: vec![Node::Text("!".into())],
                    otherwise: vec![],
                },
            ],
            otherwise: vec![Node::Var(VarPath::new("emptyLabel"))],
        };
        let paths: Vec<_> = node.paths().into_iter().map(VarPath::as_str).collect();
        assert_eq!(paths, vec!["users", "this.name", "this.admin", "emptyLabel"]);
    }
}
