//! Case conversions for generated identifiers.
//!
//! Word boundaries are only detected at a lowercase-or-digit to uppercase
//! transition. Runs of consecutive uppercase letters (acronyms such as
//! `QRIS` in `QRISForm`) are never split.

/// Uppercase the first character, leaving the rest unchanged
/// (e.g., "merchantList" -> "MerchantList", "merchant_list" -> "Merchant_list")
pub fn to_pascal_case(s: &str) -> String {
    map_first(s, char::to_uppercase)
}

/// Lowercase the first character, leaving the rest unchanged
/// (e.g., "MerchantList" -> "merchantList")
pub fn to_camel_case(s: &str) -> String {
    map_first(s, char::to_lowercase)
}

/// Convert a string to kebab-case (e.g., "MerchantList" -> "merchant-list")
///
/// Existing separators are kept as they are.
pub fn to_kebab_case(s: &str) -> String {
    split_words(s, '-')
}

/// Convert a string to snake_case (e.g., "MerchantList" -> "merchant_list")
pub fn to_snake_case(s: &str) -> String {
    split_words(s, '_')
}

/// Lowercase the whole identifier (e.g., "MerchantList" -> "merchantlist")
pub fn to_lower_case(s: &str) -> String {
    s.to_lowercase()
}

fn map_first<I>(s: &str, f: impl FnOnce(char) -> I) -> String
where
    I: Iterator<Item = char>,
{
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => f(c).chain(chars).collect(),
    }
}

fn split_words(s: &str, separator: char) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;
    for c in s.chars() {
        if c.is_uppercase()
            && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit())
        {
            result.push(separator);
        }
        result.extend(c.to_lowercase());
        prev = Some(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("hello"), "Hello");
        assert_eq!(to_pascal_case("merchantManagement"), "MerchantManagement");
        assert_eq!(to_pascal_case("MerchantManagement"), "MerchantManagement");
        assert_eq!(to_pascal_case("merchant_list"), "Merchant_list");
        assert_eq!(to_pascal_case("payment-link"), "Payment-link");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("MerchantManagement"), "merchantManagement");
        assert_eq!(to_camel_case("QRISForm"), "qRISForm");
        assert_eq!(to_camel_case("user_profile"), "user_profile");
        assert_eq!(to_camel_case("Ünicode"), "ünicode");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_to_kebab_case() {
        assert_eq!(to_kebab_case("MerchantManagement"), "merchant-management");
        assert_eq!(to_kebab_case("userId"), "user-id");
        assert_eq!(to_kebab_case("Page2Form"), "page2-form");
        assert_eq!(to_kebab_case("snake_case_name"), "snake_case_name");
        assert_eq!(to_kebab_case("Single"), "single");
        assert_eq!(to_kebab_case(""), "");
    }

    #[test]
    fn test_kebab_keeps_acronyms_together() {
        assert_eq!(to_kebab_case("QRISForm"), "qrisform");
        assert_eq!(to_kebab_case("HTTPClient"), "httpclient");
        assert_eq!(to_kebab_case("parseURL"), "parse-url");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("Hello"), "hello");
        assert_eq!(to_snake_case("HelloWorld"), "hello_world");
        assert_eq!(to_snake_case("FooBarBaz"), "foo_bar_baz");
        assert_eq!(to_snake_case("hello-world"), "hello-world");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn test_to_lower_case() {
        assert_eq!(to_lower_case("MerchantManagement"), "merchantmanagement");
    }
}
