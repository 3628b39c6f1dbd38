//! Named templates with a parse-once cache.
//!
//! Templates are registered up front and looked up by id for every render
//! request. Each entry parses its source lazily on first use and keeps the
//! resulting node tree, so repeated renders skip lexing and parsing.
//!
//! # Example
//!
//! ```ignore
//! let registry = Registry::new();
//! registry.register(Template::new("greeting", "Hello {{name}}!"));
//!
//! let nodes = registry.get_parsed("greeting")?; // parses
//! let again = registry.get_parsed("greeting")?; // cached
//! ```

use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, OnceLock, PoisonError, RwLock},
};

use stencil_engine::Node;

use crate::{Error, Result, Template};

/// A registered template and its lazily parsed trees.
#[derive(Debug)]
struct Entry {
    template: Arc<Template>,
    parsed: OnceLock<Arc<[Node]>>,
    file_name: OnceLock<Arc<[Node]>>,
}

impl Entry {
    fn new(template: Template) -> Self {
        Self {
            template: Arc::new(template),
            parsed: OnceLock::new(),
            file_name: OnceLock::new(),
        }
    }
}

/// Return the tree in `slot`, compiling `source` into it on first use.
fn parse_once(
    slot: &OnceLock<Arc<[Node]>>,
    label: &str,
    source: &str,
) -> Result<Arc<[Node]>> {
    if let Some(nodes) = slot.get() {
        return Ok(Arc::clone(nodes));
    }

    let nodes: Arc<[Node]> = stencil_engine::compile(source)
        .map_err(|e| Error::syntax(label, source, *e))?
        .into();
    tracing::debug!(template = %label, nodes = nodes.len(), "parsed template");

    // Another thread may have filled the slot first; either tree is fine.
    Ok(Arc::clone(slot.get_or_init(|| nodes)))
}

/// Registry of templates keyed by id.
///
/// Safe to share between threads; lookups only take a read lock.
#[derive(Debug, Default)]
pub struct Registry {
    entries: RwLock<HashMap<String, Arc<Entry>>>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in templates.
    pub fn with_builtins() -> Result<Self> {
        let registry = Self::new();
        registry.register_all(crate::builtin::templates()?);
        Ok(registry)
    }

    /// Register a template.
    ///
    /// A template with the same id is replaced, and its cached tree is
    /// dropped with it. Returns the replaced template, if any.
    pub fn register(&self, template: Template) -> Option<Arc<Template>> {
        let id = template.id.clone();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let previous = entries.insert(id.clone(), Arc::new(Entry::new(template)));
        tracing::debug!(id = %id, replaced = previous.is_some(), "registered template");
        previous.map(|entry| Arc::clone(&entry.template))
    }

    /// Register multiple templates.
    pub fn register_all(&self, templates: impl IntoIterator<Item = Template>) {
        for template in templates {
            self.register(template);
        }
    }

    /// Look up a template by id.
    pub fn get(&self, id: &str) -> Result<Arc<Template>> {
        self.entry(id).map(|entry| Arc::clone(&entry.template))
    }

    /// Get the parsed node tree for a template.
    ///
    /// The source is parsed at most once per registration. Syntax errors
    /// are returned every time and never cached.
    pub fn get_parsed(&self, id: &str) -> Result<Arc<[Node]>> {
        let entry = self.entry(id)?;
        let template = &entry.template;
        parse_once(&entry.parsed, &template.id, &template.source)
    }

    /// Get the parsed file name pattern for a template, if it declares one.
    ///
    /// Cached the same way as [`Registry::get_parsed`].
    pub fn get_parsed_file_name(&self, id: &str) -> Result<Option<Arc<[Node]>>> {
        let entry = self.entry(id)?;
        let template = &entry.template;
        match &template.file_name {
            Some(pattern) => {
                let label = format!("{}.file_name", template.id);
                parse_once(&entry.file_name, &label, pattern).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// All templates, sorted by category then id.
    pub fn templates(&self) -> Vec<Arc<Template>> {
        let mut templates: Vec<Arc<Template>> = self
            .read()
            .values()
            .map(|entry| Arc::clone(&entry.template))
            .collect();
        templates.sort_by(|a, b| (&a.category, &a.id).cmp(&(&b.category, &b.id)));
        templates
    }

    /// Templates grouped by category.
    pub fn by_category(&self) -> BTreeMap<String, Vec<Arc<Template>>> {
        let mut groups: BTreeMap<String, Vec<Arc<Template>>> = BTreeMap::new();
        for template in self.templates() {
            groups
                .entry(template.category.clone())
                .or_default()
                .push(template);
        }
        groups
    }

    /// Get the number of registered templates.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn entry(&self, id: &str) -> Result<Arc<Entry>> {
        let entries = self.read();
        match entries.get(id) {
            Some(entry) => Ok(Arc::clone(entry)),
            None => {
                let mut available: Vec<String> = entries.keys().cloned().collect();
                available.sort();
                Err(Error::template_not_found(id, &available))
            }
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<Entry>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    fn greeting() -> Template {
        let mut template = Template::new("greeting", "Hello {{name}}!");
        template.category = "basics".into();
        template
    }

    #[test]
    fn test_get_and_not_found() {
        let registry = Registry::new();
        registry.register(greeting());

        assert_eq!(registry.get("greeting").unwrap().source, "Hello {{name}}!");

        let err = registry.get("missing").unwrap_err();
        match *err {
            Error::TemplateNotFound { id, available } => {
                assert_eq!(id, "missing");
                assert_eq!(available, "greeting");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_is_cached() {
        let registry = Registry::new();
        registry.register(greeting());

        let first = registry.get_parsed("greeting").unwrap();
        let second = registry.get_parsed("greeting").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_file_name_is_cached() {
        let registry = Registry::new();
        registry.register(greeting().with_file_name("{{name}}.txt"));

        let first = registry.get_parsed_file_name("greeting").unwrap().unwrap();
        let second = registry.get_parsed_file_name("greeting").unwrap().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 2);

        registry.register(Template::new("plain", "x"));
        assert!(registry.get_parsed_file_name("plain").unwrap().is_none());
    }

    #[test]
    fn test_file_name_syntax_error() {
        let registry = Registry::new();
        registry.register(greeting().with_file_name("{{#if a}}.txt"));
        let err = registry.get_parsed_file_name("greeting").unwrap_err();
        match *err {
            Error::Syntax { template, .. } => assert_eq!(template, "greeting.file_name"),
            other => panic!("unexpected error: {other:?}"),
        }
        // the body is unaffected
        assert!(registry.get_parsed("greeting").is_ok());
    }

    #[test]
    fn test_reregister_resets_cache() {
        let registry = Registry::new();
        registry.register(greeting());
        let before = registry.get_parsed("greeting").unwrap();

        let replaced = registry.register(Template::new("greeting", "Hi {{name}}"));
        assert!(replaced.is_some());

        let after = registry.get_parsed("greeting").unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn test_syntax_error_not_cached() {
        let registry = Registry::new();
        registry.register(Template::new("broken", "{{#each items}}"));
        for _ in 0..2 {
            let err = registry.get_parsed("broken").unwrap_err();
            assert!(matches!(*err, Error::Syntax { .. }));
        }
    }

    #[test]
    fn test_listing() {
        let registry = Registry::new();
        let mut hook = Template::new("use-data", "");
        hook.category = "hooks".into();
        registry.register(hook);
        registry.register(greeting());

        assert_eq!(registry.ids(), vec!["greeting", "use-data"]);
        assert_eq!(registry.len(), 2);
        let groups = registry.by_category();
        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["basics", "hooks"]);
    }

    #[test]
    fn test_concurrent_get_parsed() {
        let registry = Registry::new();
        registry.register(greeting());

        let trees: Vec<Arc<[Node]>> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| registry.get_parsed("greeting").unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let cached = registry.get_parsed("greeting").unwrap();
        assert!(trees.iter().all(|t| **t == *cached));
    }
}
