//! Per-record outcomes and the run summary.

use serde::Serialize;
use serde_json::Value;

/// Result of submitting one record. Exactly one of payload or message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum Outcome {
    /// The API accepted the site and returned this representation.
    Created(Value),
    /// The submission failed; human-readable reason.
    Failed(String),
}

impl Outcome {
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Created(_) => None,
            Self::Failed(message) => Some(message),
        }
    }
}

/// A failed record as listed in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub name: String,
    pub message: String,
}

/// Aggregate counts and failures for one run, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    attempted: usize,
    succeeded: usize,
    failures: Vec<Failure>,
}

impl RunSummary {
    /// Fold one record's outcome into the summary.
    pub fn record(&mut self, name: &str, outcome: &Outcome) {
        self.attempted += 1;
        match outcome {
            Outcome::Created(_) => self.succeeded += 1,
            Outcome::Failed(message) => self.failures.push(Failure {
                name: name.to_owned(),
                message: message.clone(),
            }),
        }
    }

    pub fn attempted(&self) -> usize {
        self.attempted
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// `true` when every attempted record was created.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
