//! Runs named cases and reports per-case outcomes.
//!
//! # Design
//! A case owns its request builder and expectation, so a failure while
//! building, sending, or checking one case is captured in that case's
//! `Outcome` and never reaches its siblings. A panic inside a case (from a
//! custom `Transport`, say) is caught and recorded as `HarnessError::Panic`.
//! Cases run on scoped threads by default, at most
//! `available_parallelism()` at a time; the harness is shared by reference.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use crate::error::HarnessError;
use crate::expect::Expectation;
use crate::harness::Harness;
use crate::request::RequestBuilder;

/// One named request plus what its response must look like.
#[derive(Debug, Clone)]
pub struct Case {
    pub name: String,
    pub request: RequestBuilder,
    pub expectation: Expectation,
}

impl Case {
    pub fn new(name: impl Into<String>, request: RequestBuilder, expectation: Expectation) -> Self {
        Self {
            name: name.into(),
            request,
            expectation,
        }
    }

    pub fn run(&self, harness: &Harness) -> Outcome {
        let start = Instant::now();
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.request
                .clone()
                .build()
                .and_then(|request| harness.check(&request, &self.expectation))
                .map(|_| ())
        }))
        .unwrap_or_else(|payload| Err(panic_error(payload.as_ref())));
        let outcome = Outcome {
            name: self.name.clone(),
            duration: start.elapsed(),
            result,
        };
        match &outcome.result {
            Ok(()) => tracing::info!(case = %outcome.name, elapsed = ?outcome.duration, "passed"),
            Err(err) => tracing::warn!(case = %outcome.name, %err, "failed"),
        }
        outcome
    }
}

fn panic_error(payload: &(dyn Any + Send)) -> HarnessError {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());
    HarnessError::Panic(message)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub name: String,
    pub duration: Duration,
    pub result: Result<(), HarnessError>,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes in the order the cases were given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub outcomes: Vec<Outcome>,
}

impl Report {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(Outcome::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    pub fn get(&self, name: &str) -> Option<&Outcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            match &outcome.result {
                Ok(()) => writeln!(f, "PASS {}", outcome.name)?,
                Err(err) => writeln!(f, "FAIL {}: {err}", outcome.name)?,
            }
        }
        write!(
            f,
            "{} passed, {} failed, {} total",
            self.passed(),
            self.failed(),
            self.outcomes.len()
        )
    }
}

#[derive(Debug, Clone)]
pub struct Runner {
    parallel: bool,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner {
    pub fn new() -> Self {
        Self { parallel: true }
    }

    /// Run cases one after another on the calling thread.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn run(&self, harness: &Harness, cases: &[Case]) -> Report {
        let outcomes = if self.parallel {
            let width = std::thread::available_parallelism().map_or(1, |n| n.get());
            cases
                .chunks(width)
                .flat_map(|chunk| run_chunk(harness, chunk))
                .collect()
        } else {
            cases.iter().map(|case| case.run(harness)).collect()
        };
        let report = Report { outcomes };
        tracing::info!(
            passed = report.passed(),
            failed = report.failed(),
            "run finished"
        );
        report
    }
}

/// Run one batch of cases on scoped threads, returning outcomes in order.
fn run_chunk(harness: &Harness, chunk: &[Case]) -> Vec<Outcome> {
    std::thread::scope(|scope| {
        let handles: Vec<_> = chunk
            .iter()
            .map(|case| (case, scope.spawn(move || case.run(harness))))
            .collect();
        handles
            .into_iter()
            .map(|(case, handle)| {
                handle.join().unwrap_or_else(|payload| Outcome {
                    name: case.name.clone(),
                    duration: Duration::ZERO,
                    result: Err(panic_error(payload.as_ref())),
                })
            })
            .collect()
    })
}
