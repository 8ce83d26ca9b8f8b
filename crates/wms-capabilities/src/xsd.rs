//! Lexical decoders for the XSD built-in types used by capabilities documents.
//!
//! Every decoder is total: absent input and malformed text both yield `None`,
//! never a zero or `false` placeholder.

use crate::xml::{Element, XLINK_NAMESPACE};

/// Trimmed string value. Present-but-empty input stays `Some("")`.
pub fn read_string(text: Option<&str>) -> Option<String> {
    text.map(|t| t.trim().to_string())
}

/// `xsd:decimal` / `xsd:double` without the special INF/NaN values.
pub fn read_decimal(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty()
        || !trimmed
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// `xsd:boolean`, accepting only `true`, `false`, `1` and `0`.
pub fn read_boolean(text: &str) -> Option<bool> {
    match text.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// `xsd:nonNegativeInteger` written as plain digits.
pub fn read_non_negative_integer(text: &str) -> Option<u64> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<u64>().ok()
}

/// The `xlink:href` of a locator element.
///
/// Servers that forget to declare the xlink namespace still get their link
/// read through the literal `xlink:` prefix.
pub fn read_href(node: &Element) -> Option<String> {
    node.attribute_ns(XLINK_NAMESPACE, "href")
        .or_else(|| node.unbound_attribute("xlink", "href"))
        .map(|href| href.trim().to_string())
}

/// Decimal attribute of `node`.
pub fn decimal_attribute(node: &Element, name: &str) -> Option<f64> {
    node.attribute(name).and_then(read_decimal)
}

/// Boolean attribute of `node`.
pub fn boolean_attribute(node: &Element, name: &str) -> Option<bool> {
    node.attribute(name).and_then(read_boolean)
}

/// Non-negative integer attribute of `node`.
pub fn non_negative_integer_attribute(node: &Element, name: &str) -> Option<u64> {
    node.attribute(name).and_then(read_non_negative_integer)
}

/// String attribute of `node`, untrimmed.
pub fn string_attribute(node: &Element, name: &str) -> Option<String> {
    node.attribute(name).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_string() {
        assert_eq!(read_string(Some("  Title \n")), Some("Title".to_string()));
        assert_eq!(read_string(Some("   ")), Some(String::new()));
        assert_eq!(read_string(None), None);
    }

    #[test]
    fn test_read_decimal() {
        assert_eq!(read_decimal("-180"), Some(-180.0));
        assert_eq!(read_decimal(" 24.75 "), Some(24.75));
        assert_eq!(read_decimal("1e-6"), Some(1e-6));
        assert_eq!(read_decimal("+.5"), Some(0.5));
        assert_eq!(read_decimal(""), None);
        assert_eq!(read_decimal("abc"), None);
        assert_eq!(read_decimal("NaN"), None);
        assert_eq!(read_decimal("inf"), None);
        assert_eq!(read_decimal("1,5"), None);
        assert_eq!(read_decimal("1e999"), None);
    }

    #[test]
    fn test_read_boolean() {
        assert_eq!(read_boolean("1"), Some(true));
        assert_eq!(read_boolean(" true "), Some(true));
        assert_eq!(read_boolean("0"), Some(false));
        assert_eq!(read_boolean("false"), Some(false));
        assert_eq!(read_boolean("TRUE"), None);
        assert_eq!(read_boolean("yes"), None);
        assert_eq!(read_boolean(""), None);
    }

    #[test]
    fn test_read_non_negative_integer() {
        assert_eq!(read_non_negative_integer("256"), Some(256));
        assert_eq!(read_non_negative_integer(" 0 "), Some(0));
        assert_eq!(read_non_negative_integer("-1"), None);
        assert_eq!(read_non_negative_integer("1.5"), None);
        assert_eq!(read_non_negative_integer(""), None);
    }

    #[test]
    fn test_read_href() {
        let namespaced =
            Element::new("OnlineResource").attr_ns(XLINK_NAMESPACE, "href", " http://a/wms ");
        assert_eq!(read_href(&namespaced), Some("http://a/wms".to_string()));

        let plain = Element::new("OnlineResource").attr("href", "http://a/wms");
        assert_eq!(read_href(&plain), None);
    }

    #[test]
    fn test_attribute_helpers() {
        let node = Element::new("Layer")
            .attr("queryable", "1")
            .attr("cascaded", "2")
            .attr("minx", "oops");
        assert_eq!(boolean_attribute(&node, "queryable"), Some(true));
        assert_eq!(non_negative_integer_attribute(&node, "cascaded"), Some(2));
        assert_eq!(decimal_attribute(&node, "minx"), None);
        assert_eq!(decimal_attribute(&node, "maxx"), None);
    }
}
