//! Generation pipeline tests against the built-in catalog.
//!
//! Run `cargo insta review` to update inline snapshots when making
//! intentional changes.

use std::{fs, sync::Arc, thread};

use stencil_catalog::{
    Error, FieldErrorKind, Generator, Mode, Registry, Request, Template, VariableDef,
};
use stencil_core::{Context, Warning};

fn builtins() -> Registry {
    Registry::with_builtins().unwrap()
}

#[test]
fn test_every_builtin_renders_with_defaults() {
    let registry = builtins();
    let generator = Generator::new(&registry);
    for id in registry.ids() {
        let generated = generator.generate(&Request::new(id.as_str())).unwrap();
        assert!(!generated.output.contains("{{#"), "{id} left a block tag");
        assert!(generated.file_name.is_some(), "{id} has no file name");
    }
}

#[test]
fn test_types_example() {
    let registry = builtins();
    let generated = Generator::new(&registry)
        .generate(&Request::new("types").example("merchant"))
        .unwrap();

    assert!(generated.warnings.is_empty());
    assert_eq!(generated.file_name.as_deref(), Some("merchant.ts"));
    insta::assert_snapshot!(generated.output.trim_end(), @r"
export interface Merchant {
  id: string;
  name: string;
  email?: string;
  active: boolean;
  createdAt: string;
  updatedAt: string;
}

export type CreateMerchantRequest = Omit<Merchant, 'id' | 'createdAt' | 'updatedAt'>;

export interface MerchantListResponse {
  items: Merchant[];
  total: number;
}
");
}

#[test]
fn test_types_without_fields_warns() {
    let registry = builtins();
    let generated = Generator::new(&registry)
        .generate(&Request::new("types").set("withTimestamps", false))
        .unwrap();

    assert!(generated.output.contains("Omit<Merchant, 'id'>;"));
    assert_eq!(
        generated.warnings,
        vec![Warning::MissingCollection {
            path: "fields".into()
        }]
    );
}

#[test]
fn test_api_service_fetch_client() {
    let registry = builtins();
    let generated = Generator::new(&registry)
        .generate(&Request::new("api-service").example("payment-links"))
        .unwrap();

    assert_eq!(generated.file_name.as_deref(), Some("paymentLinkService.ts"));
    assert!(generated.output.starts_with("import type { PaymentLink } from '../types/payment-link';"));
    assert!(generated.output.contains("const BASE_URL = '/api/v2/payment-link';"));
    assert!(generated.output.contains("export const paymentLinkService = {"));
    assert!(!generated.output.contains("axios"));
    assert!(generated.output.contains("method: 'DELETE'"));
}

#[test]
fn test_react_component_jsx_braces() {
    let registry = builtins();
    let generated = Generator::new(&registry)
        .generate(&Request::new("react-component").set("entityName", "QRISForm"))
        .unwrap();

    assert_eq!(generated.file_name.as_deref(), Some("QRISForm.tsx"));
    assert!(generated.output.contains(r#"<Box className="qrisform" sx={{ p: 2 }}>"#));
    assert!(!generated.output.contains("CircularProgress"));
}

#[test]
fn test_derived_key_override() {
    let registry = builtins();
    let generated = Generator::new(&registry)
        .generate(
            &Request::new("react-component")
                .set("entityName", "QRISForm")
                .set("entityNameKebab", "qris-form"),
        )
        .unwrap();
    assert!(generated.output.contains(r#"className="qris-form""#));
}

#[test]
fn test_select_outside_options() {
    let registry = Registry::new();
    registry.register(
        Template::new("choice", "picked {{choice}}")
            .with_variable(VariableDef::select("choice", ["a", "b"], "a")),
    );
    let request = Request::new("choice").set("choice", "c");

    let err = Generator::new(&registry).generate(&request).unwrap_err();
    let errors = err.validation_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "choice");
    assert_eq!(
        errors[0].kind,
        FieldErrorKind::NotInOptions {
            value: "c".into(),
            options: vec!["a".into(), "b".into()],
        }
    );
    assert_eq!(
        errors[0].to_string(),
        "choice: 'c' is not one of the allowed options: a, b"
    );

    let generated = Generator::new(&registry)
        .mode(Mode::Lenient)
        .generate(&request)
        .unwrap();
    assert_eq!(generated.output, "picked a");
    assert_eq!(generated.warnings.len(), 1);
    assert_eq!(generated.warnings[0].code(), "field_defaulted");
}

#[test]
fn test_template_not_found() {
    let registry = builtins();
    let err = Generator::new(&registry)
        .generate(&Request::new("vue-component"))
        .unwrap_err();
    match *err {
        Error::TemplateNotFound { id, available } => {
            assert_eq!(id, "vue-component");
            assert_eq!(available, "api-service, custom-hook, react-component, types");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_deterministic_and_isolated_across_threads() {
    let registry = builtins();
    let names = ["Merchant", "Transaction", "PaymentLink", "Settlement"];

    let outputs: Vec<(String, String)> = thread::scope(|s| {
        let handles: Vec<_> = names
            .iter()
            .map(|name| {
                let registry = &registry;
                s.spawn(move || {
                    let request = Request::new("custom-hook").set("entityName", *name);
                    let generated = Generator::new(registry).generate(&request).unwrap();
                    (name.to_string(), generated.output)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (name, output) in outputs {
        assert!(output.contains(&format!("export function use{name}()")));
        for other in names.iter().filter(|n| **n != name) {
            assert!(!output.contains(&format!("use{other}(")));
        }
        let again = Generator::new(&registry)
            .generate(&Request::new("custom-hook").set("entityName", name.as_str()))
            .unwrap();
        assert_eq!(output, again.output);
    }

    let first = registry.get_parsed("custom-hook").unwrap();
    let second = registry.get_parsed("custom-hook").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_catalog_dir_overrides_builtin() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("types.toml"),
        r#"
[template]
id = "types"
name = "Slim types"
description = "Only the entity interface"
category = "types"
source = "export interface {{entityNamePascal}} {}"

[[variables]]
name = "entityName"
type = "text"
default = "order"
"#,
    )
    .unwrap();
    fs::write(dir.path().join("notes.txt"), "not a template").unwrap();

    let registry = builtins();
    let loaded = stencil_catalog::load_dir(dir.path()).unwrap();
    assert_eq!(loaded.len(), 1);
    for template in loaded {
        assert!(registry.register(template).is_some());
    }

    let generated = Generator::new(&registry)
        .generate(&Request::new("types"))
        .unwrap();
    assert_eq!(generated.output, "export interface Order {}");
    assert_eq!(generated.file_name, None);
    assert_eq!(registry.len(), 4);
}

#[test]
fn test_values_from_json() {
    let registry = builtins();
    let values = Context::from_json(serde_json::json!({
        "entityName": "Settlement",
        "fetchOnMount": false,
        "withTypes": false,
    }))
    .unwrap();

    let generated = Generator::new(&registry)
        .generate(&Request::new("custom-hook").values(values))
        .unwrap();
    assert!(generated.output.contains("const [data, setData] = useState([]);"));
    assert!(!generated.output.contains("useEffect(() =>"));
    assert!(generated.output.contains("fetch('/api/merchants')"));
}
