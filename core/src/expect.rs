//! Expectations checked against a response.
//!
//! # Design
//! An `Expectation` is an ordered list of checks built with chained calls,
//! mirroring the `then().statusCode(..).body(..)` style of fluent HTTP test
//! DSLs. `verify` stops at the first failing check and reports it as a
//! `HarnessError::Assertion`. The body is parsed once, and only when a path
//! check is present, so empty 204/404 bodies never trip the JSON parser.

use crate::error::HarnessError;
use crate::http::HttpResponse;
use crate::matcher::Matcher;
use crate::path;

const MISSING: &str = "<missing>";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expectation {
    status: Option<u16>,
    empty_body: bool,
    body: Vec<(String, Matcher)>,
}

impl Expectation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect exactly this status code.
    pub fn status(mut self, code: u16) -> Self {
        self.status = Some(code);
        self
    }

    /// Expect no body at all.
    pub fn empty_body(mut self) -> Self {
        self.empty_body = true;
        self
    }

    /// Expect the value at `path` to satisfy `matcher`.
    pub fn body(mut self, path: impl Into<String>, matcher: Matcher) -> Self {
        self.body.push((path.into(), matcher));
        self
    }

    pub fn expected_status(&self) -> Option<u16> {
        self.status
    }

    pub fn checks(&self) -> &[(String, Matcher)] {
        &self.body
    }

    pub fn verify(&self, response: &HttpResponse) -> Result<(), HarnessError> {
        if let Some(expected) = self.status {
            if response.status != expected {
                return Err(HarnessError::assertion(
                    "<status>",
                    expected.to_string(),
                    response.status.to_string(),
                ));
            }
        }

        if self.empty_body && !response.is_empty_body() {
            return Err(HarnessError::assertion(
                "<body>",
                "an empty body",
                response.body.clone(),
            ));
        }

        if self.body.is_empty() {
            return Ok(());
        }

        let json = response.json()?;
        for (path, matcher) in &self.body {
            match path::resolve(&json, path) {
                Some(actual) if matcher.matches(&actual) => {}
                Some(actual) => {
                    return Err(HarnessError::assertion(
                        path.as_str(),
                        matcher.to_string(),
                        actual.to_string(),
                    ))
                }
                None => {
                    return Err(HarnessError::assertion(
                        path.as_str(),
                        matcher.to_string(),
                        MISSING,
                    ))
                }
            }
        }
        Ok(())
    }
}
