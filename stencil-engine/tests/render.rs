//! End-to-end rendering tests.
//!
//! Run `cargo insta review` to update inline snapshots when making
//! intentional changes.

use std::{sync::Arc, thread};

use stencil_engine::{Context, Error, Node, Warning, compile, render, render_str};

fn json_ctx(value: serde_json::Value) -> Context {
    Context::from_json(value).expect("context must be an object")
}

const SERVICE_TEMPLATE: &str = r#"import { api } from '@/lib/api';
{{#if withTypes}}import type { {{entityName}} } from '@/types/{{entityNameKebab}}';
{{/if}}
export const {{entityNameCamel}}Service = {
{{#each endpoints}}  {{this.name}}: () => api.{{this.method}}('/{{entityNameKebab}}{{this.path}}'),
{{/each}}};
{{#if_eq cache 'swr'}}export const cacheStrategy = 'swr';{{else}}export const cacheStrategy = 'none';{{/if_eq}}"#;

#[test]
fn test_service_template() {
    let ctx = json_ctx(serde_json::json!({
        "entityName": "Merchant",
        "entityNameCamel": "merchant",
        "entityNameKebab": "merchant",
        "withTypes": true,
        "cache": "swr",
        "endpoints": [
            { "name": "list", "method": "get", "path": "" },
            { "name": "create", "method": "post", "path": "/new" }
        ]
    }));

    let rendered = render_str(SERVICE_TEMPLATE, &ctx).unwrap();
    assert!(rendered.warnings.is_empty());
    insta::assert_snapshot!(rendered.output, @r#"
import { api } from '@/lib/api';
import type { Merchant } from '@/types/merchant';

export const merchantService = {
  list: () => api.get('/merchant'),
  create: () => api.post('/merchant/new'),
};
export const cacheStrategy = 'swr';
"#);
}

#[test]
fn test_service_template_without_optional_parts() {
    let ctx = json_ctx(serde_json::json!({
        "entityName": "Order",
        "entityNameCamel": "order",
        "entityNameKebab": "order",
        "withTypes": false,
        "cache": "none",
        "endpoints": []
    }));

    let rendered = render_str(SERVICE_TEMPLATE, &ctx).unwrap();
    insta::assert_snapshot!(rendered.output, @r#"
import { api } from '@/lib/api';

export const orderService = {
};
export const cacheStrategy = 'none';
"#);
}

#[test]
fn test_partial_output_with_warnings() {
    let rendered = render_str(
        "{{greeting}}, {{name}}! {{#each tags}}#{{this}}{{/each}}",
        &Context::new().with("name", "Ada"),
    )
    .unwrap();

    assert_eq!(rendered.output, ", Ada! ");
    assert_eq!(
        rendered.warnings,
        vec![
            Warning::MissingVariable {
                path: "greeting".into()
            },
            Warning::MissingCollection {
                path: "tags".into()
            },
        ]
    );
}

#[test]
fn test_escaped_braces_survive_rendering() {
    let rendered = render_str(r"<div style=\{{ color: '{{color}}' }}>", &Context::new().with("color", "red"))
        .unwrap();
    assert_eq!(rendered.output, "<div style={{ color: 'red' }}>");
}

#[test]
fn test_syntax_errors_do_not_panic() {
    for source in [
        "{{#if cond}}text",
        "{{#if a}}x{{/each}}",
        "{{name",
        "{{/if}}",
        "{{#each}}{{/each}}",
        "{{#if_eq a b}}{{/if_eq}}",
    ] {
        let err = compile(source).unwrap_err();
        assert!(err.is_syntax(), "{source}: {err}");
    }
}

#[test]
fn test_mismatch_reports_both_kinds() {
    let err = compile("{{#if a}}x{{/each}}").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("'/if'"), "{message}");
    assert!(message.contains("'/each'"), "{message}");
    assert!(matches!(*err, Error::MismatchedClose { .. }));
}

#[test]
fn test_error_renders_with_source() {
    let source = "line one\n{{#if open}}never closed";
    let err = compile(source).unwrap_err();
    let report = miette::Report::new(*err).with_source_code(source.to_string());
    let debug = format!("{report:?}");
    assert!(debug.contains("never closed"));
}

#[test]
fn test_concurrent_renders_share_one_tree() {
    let nodes: Arc<Vec<Node>> = Arc::new(
        compile("{{#each users}}{{this.name}}@{{team}};{{/each}}").unwrap(),
    );

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let nodes = Arc::clone(&nodes);
            thread::spawn(move || {
                let ctx = json_ctx(serde_json::json!({
                    "team": format!("t{i}"),
                    "users": [{ "name": format!("u{i}") }, { "name": "x" }]
                }));
                let mut outputs = Vec::new();
                for _ in 0..100 {
                    outputs.push(render(&nodes, &ctx).output);
                }
                (i, outputs)
            })
        })
        .collect();

    for handle in handles {
        let (i, outputs) = handle.join().unwrap();
        let expected = format!("u{i}@t{i};x@t{i};");
        assert!(outputs.iter().all(|o| *o == expected));
    }
}
