//! Derived identifier variables.
//!
//! Templates refer to one canonical entity name in several casings
//! (`merchantManagement`, `merchant-management`, ...). Those variants are
//! computed from the `entityName` entry rather than collected from the user.

use indexmap::IndexMap;

use crate::{Context, Value, case};

/// Context key holding the canonical entity name.
pub const ENTITY_NAME: &str = "entityName";

/// Keys produced by [`derive`], in insertion order.
pub const DERIVED_KEYS: &[&str] = &[
    "entityNameLower",
    "entityNameCamel",
    "entityNameKebab",
    "entityNamePascal",
    "entityNameSnake",
];

/// Compute the case variants of an entity name.
pub fn derive(entity_name: &str) -> IndexMap<String, String> {
    let values = [
        case::to_lower_case(entity_name),
        case::to_camel_case(entity_name),
        case::to_kebab_case(entity_name),
        case::to_pascal_case(entity_name),
        case::to_snake_case(entity_name),
    ];
    DERIVED_KEYS
        .iter()
        .map(|k| k.to_string())
        .zip(values)
        .collect()
}

/// Return a new context with derived entries merged in.
///
/// Entries the caller already supplied are kept, so a template user can
/// pin a specific spelling (e.g. `entityNameKebab = "qris-form"`).
/// Nothing is derived unless `entityName` is a string.
pub fn augment(ctx: &Context) -> Context {
    let Some(entity_name) = ctx.get(ENTITY_NAME).and_then(Value::as_str) else {
        return ctx.clone();
    };

    let derived: Context = derive(entity_name)
        .into_iter()
        .filter(|(k, _)| !ctx.contains_key(k))
        .collect();
    ctx.merged(&derived)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_merchant_management() {
        let derived = derive("MerchantManagement");
        assert_eq!(derived["entityNameLower"], "merchantmanagement");
        assert_eq!(derived["entityNameCamel"], "merchantManagement");
        assert_eq!(derived["entityNameKebab"], "merchant-management");
        assert_eq!(derived["entityNamePascal"], "MerchantManagement");
        assert_eq!(derived["entityNameSnake"], "merchant_management");
    }

    #[test]
    fn test_derive_acronym() {
        let derived = derive("QRISForm");
        assert_eq!(derived["entityNameKebab"], "qrisform");
        assert_eq!(derived["entityNameCamel"], "qRISForm");
    }

    #[test]
    fn test_derive_keeps_separators() {
        let derived = derive("merchant_list");
        assert_eq!(derived["entityNameLower"], "merchant_list");
        assert_eq!(derived["entityNameCamel"], "merchant_list");
        assert_eq!(derived["entityNameKebab"], "merchant_list");
        assert_eq!(derived["entityNamePascal"], "Merchant_list");
        assert_eq!(derived["entityNameSnake"], "merchant_list");
    }

    #[test]
    fn test_augment_adds_derived_keys() {
        let ctx = Context::new().with(ENTITY_NAME, "UserProfile");
        let augmented = augment(&ctx);
        assert_eq!(
            augmented.get("entityNameKebab"),
            Some(&Value::from("user-profile"))
        );
        assert_eq!(augmented.len(), 1 + DERIVED_KEYS.len());
        // the input context is left alone
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn test_augment_keeps_supplied_values() {
        let ctx = Context::new()
            .with(ENTITY_NAME, "QRISForm")
            .with("entityNameKebab", "qris-form");
        let augmented = augment(&ctx);
        assert_eq!(
            augmented.get("entityNameKebab"),
            Some(&Value::from("qris-form"))
        );
        assert_eq!(
            augmented.get("entityNameLower"),
            Some(&Value::from("qrisform"))
        );
    }

    #[test]
    fn test_augment_without_entity_name() {
        let ctx = Context::new().with("other", "x");
        assert_eq!(augment(&ctx), ctx);

        let ctx = Context::new().with(ENTITY_NAME, true);
        assert_eq!(augment(&ctx), ctx);
    }
}
