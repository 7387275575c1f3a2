//! JSON path resolution.
//!
//! Paths are dotted keys with optional bracketed indices: `page`,
//! `support.url`, `data[0].id`. A key applied to an array projects over its
//! elements, so `data.id` against `{"data":[{"id":1},{"id":2}]}` resolves to
//! `[1, 2]`. Elements lacking the key project to `null`.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

/// Resolve `path` against `root`. Returns `None` when the path leads nowhere.
///
/// An empty path (or `$`) resolves to the whole document.
pub fn resolve(root: &Value, path: &str) -> Option<Value> {
    let mut current = root.clone();
    for segment in parse(path)? {
        current = step(current, &segment)?;
    }
    Some(current)
}

fn step(current: Value, segment: &Segment) -> Option<Value> {
    match (current, segment) {
        (Value::Object(mut map), Segment::Key(key)) => map.remove(key),
        (Value::Array(items), Segment::Key(key)) => Some(Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(mut map) => map.remove(key).unwrap_or(Value::Null),
                    nested @ Value::Array(_) => step(nested, segment).unwrap_or(Value::Null),
                    _ => Value::Null,
                })
                .collect(),
        )),
        (Value::Array(mut items), Segment::Index(idx)) => {
            if *idx < items.len() {
                Some(items.swap_remove(*idx))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Split a path into segments. Returns `None` for malformed brackets.
fn parse(path: &str) -> Option<Vec<Segment>> {
    let path = path.trim();
    let path = path.strip_prefix('$').unwrap_or(path);
    let mut segments = Vec::new();
    let mut key = String::new();
    let mut chars = path.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => flush(&mut key, &mut segments),
            '[' => {
                flush(&mut key, &mut segments);
                let mut index = String::new();
                loop {
                    match chars.next()? {
                        ']' => break,
                        c => index.push(c),
                    }
                }
                segments.push(Segment::Index(index.trim().parse().ok()?));
            }
            ']' => return None,
            _ => key.push(ch),
        }
    }
    flush(&mut key, &mut segments);
    Some(segments)
}

fn flush(key: &mut String, segments: &mut Vec<Segment>) {
    if !key.is_empty() {
        segments.push(Segment::Key(std::mem::take(key)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body() -> Value {
        json!({
            "page": 2,
            "data": [
                {"id": 7, "email": "michael.lawson@reqres.in"},
                {"id": 8, "email": "lindsay.ferguson@reqres.in"},
                {"id": 9}
            ],
            "support": {"url": "https://reqres.in/#support-heading"}
        })
    }

    #[test]
    fn resolves_top_level_key() {
        assert_eq!(resolve(&body(), "page"), Some(json!(2)));
    }

    #[test]
    fn resolves_nested_key() {
        assert_eq!(
            resolve(&body(), "support.url"),
            Some(json!("https://reqres.in/#support-heading"))
        );
    }

    #[test]
    fn projects_key_over_array() {
        assert_eq!(resolve(&body(), "data.id"), Some(json!([7, 8, 9])));
    }

    #[test]
    fn projection_fills_missing_keys_with_null() {
        assert_eq!(
            resolve(&body(), "data.email"),
            Some(json!([
                "michael.lawson@reqres.in",
                "lindsay.ferguson@reqres.in",
                null
            ]))
        );
    }

    #[test]
    fn indexes_into_array() {
        assert_eq!(resolve(&body(), "data[1].id"), Some(json!(8)));
        assert_eq!(resolve(&body(), "$.data[0].id"), Some(json!(7)));
    }

    #[test]
    fn missing_paths_resolve_to_none() {
        assert_eq!(resolve(&body(), "total"), None);
        assert_eq!(resolve(&body(), "data[10]"), None);
        assert_eq!(resolve(&body(), "page.value"), None);
    }

    #[test]
    fn empty_path_is_whole_document() {
        assert_eq!(resolve(&body(), ""), Some(body()));
        assert_eq!(resolve(&body(), "$"), Some(body()));
    }

    #[test]
    fn malformed_brackets_do_not_resolve() {
        assert_eq!(resolve(&body(), "data[x].id"), None);
        assert_eq!(resolve(&body(), "data[0"), None);
        assert_eq!(resolve(&body(), "data]"), None);
    }

    #[test]
    fn resolution_is_deterministic() {
        let doc = body();
        assert_eq!(resolve(&doc, "data.id"), resolve(&doc, "data.id"));
    }
}
