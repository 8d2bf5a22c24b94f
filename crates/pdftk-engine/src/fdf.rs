//! FDF generation for `fill_form`
//!
//! pdftk takes fill data as an FDF document. Only the subset pdftk actually
//! reads is emitted: a flat `/Fields` array of `/T`/`/V` entries.

use serde_json::{Map, Value};

/// Serialize a field→value object into an FDF document.
pub fn write_fdf(data: &Map<String, Value>) -> Vec<u8> {
    let mut out = String::new();
    out.push_str("%FDF-1.2\n");
    out.push_str("1 0 obj\n");
    out.push_str("<< /FDF << /Fields [\n");
    for (name, value) in data {
        out.push_str("<< /T (");
        out.push_str(&escape_literal(name));
        out.push_str(") /V (");
        out.push_str(&escape_literal(&field_text(value)));
        out.push_str(") >>\n");
    }
    out.push_str("] >> >>\n");
    out.push_str("endobj\n");
    out.push_str("trailer\n");
    out.push_str("<< /Root 1 0 R >>\n");
    out.push_str("%%EOF\n");
    out.into_bytes()
}

/// Render a JSON value the way the toolkit expects it in `/V`.
///
/// Booleans map to the AcroForm checkbox states; anything non-scalar is
/// passed through as its compact JSON text.
fn field_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "Off".to_string(),
        Value::Null => String::new(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

/// Escape a PDF literal string: backslash, parentheses, line breaks.
fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '(' => escaped.push_str("\\("),
            ')' => escaped.push_str("\\)"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    fn fdf_text(data: &Map<String, Value>) -> String {
        String::from_utf8(write_fdf(data)).unwrap()
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn empty_data_is_still_a_valid_document() {
        let text = fdf_text(&Map::new());
        assert!(text.starts_with("%FDF-1.2\n"));
        assert!(text.contains("/Fields [\n] >>"));
        assert!(text.ends_with("%%EOF\n"));
    }

    #[test]
    fn scalar_values_render_in_form_text() {
        let data = object(json!({
            "name": "Jane Doe",
            "age": 42,
            "agreed": true,
            "declined": false,
            "note": null
        }));
        let text = fdf_text(&data);

        assert!(text.contains("<< /T (name) /V (Jane Doe) >>"));
        assert!(text.contains("<< /T (age) /V (42) >>"));
        assert!(text.contains("<< /T (agreed) /V (Yes) >>"));
        assert!(text.contains("<< /T (declined) /V (Off) >>"));
        assert!(text.contains("<< /T (note) /V () >>"));
    }

    #[test]
    fn delimiters_are_escaped() {
        let data = object(json!({"weird (key)": "back\\slash)"}));
        let text = fdf_text(&data);
        assert!(text.contains("<< /T (weird \\(key\\)) /V (back\\\\slash\\)) >>"));
    }

    #[test]
    fn line_breaks_are_escaped() {
        let data = object(json!({"address": "1 Main St\nMiami\r\nFL"}));
        let text = fdf_text(&data);
        assert!(text.contains("/V (1 Main St\\nMiami\\r\\nFL)"));
    }

    /// Inverse of `escape_literal`, for the round-trip property below.
    fn unescape_literal(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars();
        while let Some(ch) = chars.next() {
            if ch != '\\' {
                out.push(ch);
                continue;
            }
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        }
        out
    }

    proptest! {
        #[test]
        fn escaping_round_trips(text in ".*") {
            prop_assert_eq!(unescape_literal(&escape_literal(&text)), text);
        }

        #[test]
        fn escaped_output_has_no_bare_delimiters(text in ".*") {
            let escaped = escape_literal(&text);
            let mut chars = escaped.chars();
            while let Some(ch) = chars.next() {
                match ch {
                    '\\' => { chars.next(); }
                    '(' | ')' | '\n' | '\r' => prop_assert!(false, "bare delimiter in {:?}", escaped),
                    _ => {}
                }
            }
        }
    }
}
