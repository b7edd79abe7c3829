// ── Core error types ──
//
// Fatal, run-level errors. Per-record failures never surface here: they are
// captured as `Outcome::Failed` by the importer and the run carries on.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input file ───────────────────────────────────────────────────
    #[error("Cannot read sites file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Sites file {} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Sites file {} must contain a JSON array, found {found}", path.display())]
    NotAnArray { path: PathBuf, found: &'static str },

    // ── Setup ────────────────────────────────────────────────────────
    #[error("Failed to initialise API client: {0}")]
    Client(#[from] siteimport_api::Error),
}
