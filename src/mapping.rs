use serde_json::{Map, Value};

use crate::types::ContentRecord;

const ID_KEYS: &[&str] = &["id", "_id"];
const TITLE_KEYS: &[&str] = &["title"];
const CONTENT_KEYS: &[&str] = &["content", "description", "text"];
const URL_KEYS: &[&str] = &["url", "link"];
const TYPE_KEYS: &[&str] = &["type", "category"];
const DATE_KEYS: &[&str] = &["date", "publishedAt", "created"];

/// Map an arbitrary source record into the canonical shape. Never fails.
pub fn normalize(raw: &Value) -> ContentRecord {
    let Some(obj) = raw.as_object() else { return ContentRecord::default(); };
    ContentRecord {
        id: first_present(obj, ID_KEYS),
        title: first_present(obj, TITLE_KEYS),
        content: first_present(obj, CONTENT_KEYS),
        url: first_present(obj, URL_KEYS),
        kind: first_present(obj, TYPE_KEYS),
        date: first_present(obj, DATE_KEYS),
    }
}

pub fn normalize_all(items: &[Value]) -> Vec<ContentRecord> {
    items.iter().map(normalize).collect()
}

fn first_present(obj: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find_map(scalar_text)
        .unwrap_or_default()
}

// Loose truthiness: null, false, "", 0 and containers count as absent.
fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_default_to_empty() {
        let r = normalize(&json!({}));
        assert_eq!(r, ContentRecord::default());
    }

    #[test]
    fn first_candidate_wins() {
        let r = normalize(&json!({
            "id": "a", "_id": "b",
            "content": "body", "description": "desc",
            "url": "/u", "link": "/l",
            "type": "post", "category": "cat",
            "date": "2025-01-01", "publishedAt": "2024-01-01",
        }));
        assert_eq!(r.id, "a");
        assert_eq!(r.content, "body");
        assert_eq!(r.url, "/u");
        assert_eq!(r.kind, "post");
        assert_eq!(r.date, "2025-01-01");
    }

    #[test]
    fn falls_back_through_candidates() {
        let r = normalize(&json!({ "_id": "x", "text": "t", "link": "/l", "category": "c", "created": "2020" }));
        assert_eq!(r.id, "x");
        assert_eq!(r.content, "t");
        assert_eq!(r.url, "/l");
        assert_eq!(r.kind, "c");
        assert_eq!(r.date, "2020");
    }

    #[test]
    fn empty_and_null_values_are_skipped() {
        let r = normalize(&json!({ "id": "", "_id": "fallback", "content": null, "description": "d" }));
        assert_eq!(r.id, "fallback");
        assert_eq!(r.content, "d");
    }

    #[test]
    fn numeric_ids_are_stringified() {
        assert_eq!(normalize(&json!({ "id": 42 })).id, "42");
        assert_eq!(normalize(&json!({ "id": 0, "_id": 7 })).id, "7");
    }

    #[test]
    fn containers_and_non_objects_are_absent() {
        assert_eq!(normalize(&json!({ "title": ["a"] })).title, "");
        assert_eq!(normalize(&json!("just a string")), ContentRecord::default());
    }
}
