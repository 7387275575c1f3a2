//! Value matchers applied to resolved JSON paths.

use std::fmt;

use serde_json::Value;

/// A predicate over a resolved JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    /// Deep equality; numbers compare numerically.
    EqualTo(Value),
    /// The value is an array containing every listed item, in any order.
    HasItems(Vec<Value>),
}

/// Shorthand for `Matcher::EqualTo`.
pub fn equal_to(expected: impl Into<Value>) -> Matcher {
    Matcher::EqualTo(expected.into())
}

/// Shorthand for `Matcher::HasItems`.
pub fn has_items<I, T>(items: I) -> Matcher
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    Matcher::HasItems(items.into_iter().map(Into::into).collect())
}

impl Matcher {
    pub fn matches(&self, actual: &Value) -> bool {
        match self {
            Matcher::EqualTo(expected) => json_eq(actual, expected),
            Matcher::HasItems(expected) => match actual {
                Value::Array(items) => expected
                    .iter()
                    .all(|want| items.iter().any(|got| json_eq(got, want))),
                _ => false,
            },
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::EqualTo(expected) => write!(f, "{expected}"),
            Matcher::HasItems(items) => {
                write!(f, "a collection containing {}", Value::Array(items.clone()))
            }
        }
    }
}

/// Structural equality where `2`, `2.0` and `2u64` are the same number.
pub fn json_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x == y
            } else {
                match (x.as_f64(), y.as_f64()) {
                    (Some(x), Some(y)) => x == y,
                    _ => false,
                }
            }
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_eq(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| json_eq(x, y)))
        }
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn equal_to_compares_numbers_numerically() {
        assert!(equal_to(2).matches(&json!(2.0)));
        assert!(equal_to(12u64).matches(&json!(12)));
        assert!(!equal_to(2).matches(&json!(3)));
    }

    #[test]
    fn equal_to_compares_strings_exactly() {
        assert!(equal_to("Janet").matches(&json!("Janet")));
        assert!(!equal_to("Janet").matches(&json!("janet")));
        assert!(!equal_to("2").matches(&json!(2)));
    }

    #[test]
    fn equal_to_is_deep() {
        let expected = json!({"id": 2, "tags": [1, 2.0]});
        assert!(equal_to(expected).matches(&json!({"tags": [1.0, 2], "id": 2})));
        assert!(!equal_to(json!([1, 2])).matches(&json!([2, 1])));
    }

    #[test]
    fn has_items_ignores_order_and_extras() {
        let actual = json!([6, 5, 4, 3, 2, 1]);
        assert!(has_items([1, 2, 3]).matches(&actual));
        assert!(has_items([6]).matches(&actual));
        assert!(!has_items([1, 7]).matches(&actual));
    }

    #[test]
    fn has_items_rejects_non_arrays() {
        assert!(!has_items([1]).matches(&json!(1)));
        assert!(!has_items([1]).matches(&json!({"1": 1})));
    }

    #[test]
    fn has_items_is_monotone_over_subsets() {
        let actual = json!([2000, 2001, 2002, 2003]);
        let full = [2000, 2001, 2002];
        assert!(has_items(full).matches(&actual));
        for len in 0..full.len() {
            assert!(has_items(full[..len].to_vec()).matches(&actual));
        }
    }

    #[test]
    fn display_describes_expectation() {
        assert_eq!(equal_to("leader").to_string(), "\"leader\"");
        assert_eq!(
            has_items([1, 2]).to_string(),
            "a collection containing [1,2]"
        );
    }
}
