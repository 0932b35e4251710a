use super::ResponseFormat;
use serde_json::Value;

/// The JSON baseline format. Seeded into every [`super::FormatRegistry`] as
/// the irrevocable default; output is minimal (no pretty-printing) and
/// round-trips through `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl ResponseFormat for JsonFormat {
    fn extension(&self) -> &str {
        "json"
    }

    fn content_type(&self) -> &str {
        "application/json"
    }

    fn encode(&self, body: &Value) -> String {
        // Serializing a Value cannot fail in practice; fall back to a null
        // body rather than panicking inside the dispatch pipeline.
        serde_json::to_string(body).unwrap_or_else(|_| "null".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encodes_minimal_json() {
        let body = json!({"success": {"message": "Hello World!!"}});
        assert_eq!(
            JsonFormat.encode(&body),
            r#"{"success":{"message":"Hello World!!"}}"#
        );
    }
}
