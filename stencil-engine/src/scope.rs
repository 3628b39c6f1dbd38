//! Variable resolution across nested `each` scopes.

use std::borrow::Cow;

use stencil_core::{Context, Value};

use crate::node::VarPath;

/// One iteration of an `each` block.
pub(crate) struct Frame<'a> {
    pub item: &'a Value,
    pub index: usize,
    pub len: usize,
    pub parent: Option<&'a Frame<'a>>,
}

/// The names visible at a point in the template.
///
/// The root context is shared by reference; each `each` iteration adds a
/// stack-allocated [`Frame`] pointing at its parent, so nothing is copied
/// or mutated while descending.
pub(crate) struct Scope<'a> {
    pub root: &'a Context,
    pub frame: Option<&'a Frame<'a>>,
}

impl<'a> Scope<'a> {
    pub fn new(root: &'a Context) -> Self {
        Self { root, frame: None }
    }

    /// Resolve a path.
    ///
    /// - `this` is the innermost item (the root context outside any loop)
    /// - `@index`, `@first` and `@last` describe the innermost iteration
    /// - any other head is looked up in the items' fields from the innermost
    ///   loop outwards, then in the root context
    ///
    /// Remaining segments descend into objects and lists.
    pub fn resolve(&self, path: &VarPath) -> Option<Cow<'a, Value>> {
        let mut segments = path.segments().iter().map(String::as_str);
        let head = segments.next()?;

        let base: Cow<'a, Value> = match head {
            "this" => match self.frame {
                Some(frame) => Cow::Borrowed(frame.item),
                None => {
                    let name = segments.next()?;
                    Cow::Borrowed(self.root.get(name)?)
                }
            },
            "@index" => Cow::Owned(Value::from(self.frame?.index as f64)),
            "@first" => Cow::Owned(Value::Bool(self.frame?.index == 0)),
            "@last" => {
                let frame = self.frame?;
                Cow::Owned(Value::Bool(frame.index + 1 == frame.len))
            }
            name => Cow::Borrowed(self.lookup(name)?),
        };

        segments.try_fold(base, |value, segment| match value {
            Cow::Borrowed(v) => v.get(segment).map(Cow::Borrowed),
            Cow::Owned(v) => v.get(segment).cloned().map(Cow::Owned),
        })
    }

    fn lookup(&self, name: &str) -> Option<&'a Value> {
        let mut frame = self.frame;
        while let Some(f) = frame {
            if let Some(value) = f.item.as_object().and_then(|fields| fields.get(name)) {
                return Some(value);
            }
            frame = f.parent;
        }
        self.root.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Context {
        Context::from_json(serde_json::json!({
            "name": "root",
            "project": { "title": "Portal" },
            "users": [{ "name": "A" }, { "email": "b@x" }],
        }))
        .unwrap()
    }

    #[test]
    fn test_root_lookup() {
        let ctx = ctx();
        let scope = Scope::new(&ctx);
        assert_eq!(
            scope.resolve(&VarPath::new("project.title")).as_deref(),
            Some(&Value::from("Portal"))
        );
        assert_eq!(
            scope.resolve(&VarPath::new("this.name")).as_deref(),
            Some(&Value::from("root"))
        );
        assert!(scope.resolve(&VarPath::new("missing")).is_none());
        assert!(scope.resolve(&VarPath::new("@index")).is_none());
    }

    #[test]
    fn test_item_shadows_parent() {
        let ctx = ctx();
        let users = ctx.get("users").and_then(Value::as_list).unwrap();
        let first = Frame {
            item: &users[0],
            index: 0,
            len: 2,
            parent: None,
        };
        let scope = Scope {
            root: &ctx,
            frame: Some(&first),
        };
        assert_eq!(
            scope.resolve(&VarPath::new("name")).as_deref(),
            Some(&Value::from("A"))
        );
        assert_eq!(
            scope.resolve(&VarPath::new("@first")).as_deref(),
            Some(&Value::Bool(true))
        );

        let second = Frame {
            item: &users[1],
            index: 1,
            len: 2,
            parent: None,
        };
        let scope = Scope {
            root: &ctx,
            frame: Some(&second),
        };
        // not shadowed by the item, so the root value shows through
        assert_eq!(
            scope.resolve(&VarPath::new("name")).as_deref(),
            Some(&Value::from("root"))
        );
        assert!(scope.resolve(&VarPath::new("this.name")).is_none());
        assert_eq!(
            scope.resolve(&VarPath::new("@last")).as_deref(),
            Some(&Value::Bool(true))
        );
    }
}
