//! Dot-separated property paths into JSON documents

use serde_json::Value;

/// Resolve a dot-separated path such as `"variant.color.name"`
///
/// Returns `None` as soon as a segment is missing, including when an
/// intermediate value is not an object. Numeric segments index into arrays
/// (`"variants.0.sku"`).
pub fn resolve_path<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = doc;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Like [`resolve_path`], treating an explicit `null` as missing
pub fn resolve_present<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    resolve_path(doc, path).filter(|v| !v.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_top_level() {
        let doc = json!({"name": "Red Watch"});
        assert_eq!(resolve_path(&doc, "name"), Some(&json!("Red Watch")));
    }

    #[test]
    fn test_resolve_nested() {
        let doc = json!({"variant": {"color": {"name": "red"}}});
        assert_eq!(resolve_path(&doc, "variant.color.name"), Some(&json!("red")));
        assert_eq!(
            resolve_path(&doc, "variant.color"),
            Some(&json!({"name": "red"}))
        );
    }

    #[test]
    fn test_missing_intermediate_short_circuits() {
        let doc = json!({"variant": null, "size": 40});
        assert_eq!(resolve_path(&doc, "variant.color.name"), None);
        assert_eq!(resolve_path(&doc, "size.value"), None);
        assert_eq!(resolve_path(&doc, "nothing.at.all"), None);
    }

    #[test]
    fn test_array_index_segment() {
        let doc = json!({"variants": [{"sku": "A1"}, {"sku": "B2"}]});
        assert_eq!(resolve_path(&doc, "variants.1.sku"), Some(&json!("B2")));
        assert_eq!(resolve_path(&doc, "variants.9.sku"), None);
        assert_eq!(resolve_path(&doc, "variants.first"), None);
    }

    #[test]
    fn test_resolve_present_skips_null() {
        let doc = json!({"deleted_at": null});
        assert_eq!(resolve_path(&doc, "deleted_at"), Some(&Value::Null));
        assert_eq!(resolve_present(&doc, "deleted_at"), None);
    }
}
