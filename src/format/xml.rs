use super::ResponseFormat;
use serde_json::Value;

/// XML response format.
///
/// Renders a body value as nested elements: object keys become element
/// names, array items become `<item>` elements, scalars become text nodes.
/// A non-object body is wrapped in a single `<response>` root.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlFormat;

impl ResponseFormat for XmlFormat {
    fn extension(&self) -> &str {
        "xml"
    }

    fn content_type(&self) -> &str {
        "application/xml"
    }

    fn encode(&self, body: &Value) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
        match body {
            Value::Object(map) => {
                for (key, value) in map {
                    write_element(&mut out, key, value);
                }
            }
            other => write_element(&mut out, "response", other),
        }
        out
    }
}

fn write_element(out: &mut String, name: &str, value: &Value) {
    out.push('<');
    out.push_str(name);
    out.push('>');
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                write_element(out, key, child);
            }
        }
        Value::Array(items) => {
            for item in items {
                write_element(out, "item", item);
            }
        }
        Value::String(s) => push_escaped(out, s),
        Value::Null => {}
        scalar => push_escaped(out, &scalar.to_string()),
    }
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}
