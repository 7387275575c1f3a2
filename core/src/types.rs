//! Request payloads sent by the reqres suite.
//!
//! # Design
//! These mirror the JSON the public service accepts but are defined
//! independently of the mock-server crate. Integration tests against the mock
//! catch any drift between the two.

use serde::{Deserialize, Serialize};

/// Body for creating or updating a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInput {
    pub name: String,
    pub job: String,
}

impl UserInput {
    pub fn new(name: &str, job: &str) -> Self {
        Self {
            name: name.to_string(),
            job: job.to_string(),
        }
    }
}

/// Body for `register` and `login`. Omitted fields are left out of the JSON
/// entirely, which is how the validation-error scenarios are provoked.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    pub fn email_only(email: &str) -> Self {
        Self {
            email: Some(email.to_string()),
            password: None,
        }
    }
}
