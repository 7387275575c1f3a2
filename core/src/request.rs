//! Fluent request builder.

use serde::Serialize;

use crate::error::HarnessError;
use crate::http::{HttpMethod, HttpRequest};

/// Builds an `HttpRequest` through chained calls.
///
/// `json` serializes eagerly; a serialization failure is held until `build`
/// so the chain stays uninterrupted.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: HttpMethod,
    url: String,
    headers: Vec<(String, String)>,
    body: Option<String>,
    error: Option<HarnessError>,
}

impl RequestBuilder {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            error: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Attach `body` serialized as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        match serde_json::to_string(body) {
            Ok(text) => self.body = Some(text),
            Err(e) => self.error = Some(HarnessError::Serialization(e.to_string())),
        }
        self
    }

    pub fn build(self) -> Result<HttpRequest, HarnessError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let mut headers = self.headers;
        let has_content_type = headers
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case("content-type"));
        if self.body.is_some() && !has_content_type {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        Ok(HttpRequest {
            method: self.method,
            url: self.url,
            headers,
            body: self.body,
        })
    }
}

/// Join `path` onto `base_url` with exactly one slash between them.
/// Absolute `http(s)://` paths are returned unchanged.
pub fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::collections::BTreeMap;

    #[test]
    fn bare_request_has_no_body_or_headers() {
        let req = RequestBuilder::new(HttpMethod::Get, "https://reqres.in/api/users/2")
            .build()
            .unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://reqres.in/api/users/2");
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn json_body_sets_content_type() {
        let req = RequestBuilder::new(HttpMethod::Post, "https://reqres.in/api/users")
            .json(&json!({"name": "morpheus", "job": "leader"}))
            .build()
            .unwrap();
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "morpheus");
        assert_eq!(body["job"], "leader");
    }

    #[test]
    fn explicit_content_type_is_not_duplicated() {
        let req = RequestBuilder::new(HttpMethod::Put, "https://reqres.in/api/users/2")
            .header("Content-Type", "application/json")
            .json(&json!({"job": "zion resident"}))
            .build()
            .unwrap();
        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.header("content-type"), Some("application/json"));
    }

    #[test]
    fn serialized_body_round_trips() {
        let inputs = [
            json!({"email": "sydney@fife"}),
            json!({"name": "morpheus", "job": "zion resident", "tags": [1, 2.5, null]}),
            json!({"nested": {"deep": {"flag": true}}}),
        ];
        for input in inputs {
            let req = RequestBuilder::new(HttpMethod::Post, "http://x/api")
                .json(&input)
                .build()
                .unwrap();
            let back: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(back, input);
        }
    }

    #[test]
    fn unserializable_body_fails_at_build() {
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], "non-string keys are not JSON");
        let err = RequestBuilder::new(HttpMethod::Post, "http://x/api")
            .json(&map)
            .build()
            .unwrap_err();
        assert!(matches!(err, HarnessError::Serialization(_)));
    }

    #[test]
    fn join_url_normalizes_slashes() {
        assert_eq!(join_url("https://reqres.in/", "api/users"), "https://reqres.in/api/users");
        assert_eq!(join_url("https://reqres.in", "/api/users"), "https://reqres.in/api/users");
        assert_eq!(
            join_url("https://reqres.in/", "api/users?page=2"),
            "https://reqres.in/api/users?page=2"
        );
        assert_eq!(join_url("https://reqres.in/", ""), "https://reqres.in");
        assert_eq!(
            join_url("https://reqres.in/", "http://127.0.0.1:3000/api"),
            "http://127.0.0.1:3000/api"
        );
    }
}
