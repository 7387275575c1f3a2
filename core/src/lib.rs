//! Declarative HTTP assertion harness for the reqres user-management API.
//!
//! # Overview
//! A test builds a request, sends it synchronously, and checks the status
//! code and JSON body against an `Expectation`. The same pieces drive the
//! full reqres suite through `Runner`, which reports every case on its own.
//!
//! # Design
//! - `Harness` holds configuration and a `Transport`; no global state, so
//!   tests can run in parallel against different base URLs.
//! - Requests and responses are plain data (`HttpRequest` / `HttpResponse`),
//!   keeping the matcher testable without a network.
//! - Path resolution projects keys across arrays (`data.id` over a list of
//!   users yields every id), which is what `has_items` is checked against.

pub mod config;
pub mod error;
pub mod expect;
pub mod harness;
pub mod http;
pub mod matcher;
pub mod path;
pub mod request;
pub mod runner;
pub mod suite;
pub mod transport;
pub mod types;

pub use config::HarnessConfig;
pub use error::HarnessError;
pub use expect::Expectation;
pub use harness::Harness;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use matcher::{equal_to, has_items, Matcher};
pub use request::RequestBuilder;
pub use runner::{Case, Outcome, Report, Runner};
pub use transport::{Transport, UreqTransport};
pub use types::{Credentials, UserInput};
