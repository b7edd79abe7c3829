//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text. Only run-level failures end up here; a site the
//! API rejects is part of the summary, not an error.

use miette::Diagnostic;
use thiserror::Error;

use siteimport_config::ConfigError;
use siteimport_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const INPUT: i32 = 4;
    pub const CONFIG: i32 = 5;
    pub const INCOMPLETE: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Credentials ──────────────────────────────────────────────────
    #[error("Admin key is required")]
    #[diagnostic(
        code(siteimport::no_admin_key),
        help(
            "Pass the key as the first argument, set SITEIMPORT_ADMIN_KEY,\n\
             or enter it when prompted."
        )
    )]
    MissingAdminKey,

    #[error("Could not read admin key: {reason}")]
    #[diagnostic(code(siteimport::prompt))]
    Prompt { reason: String },

    // ── Input file ───────────────────────────────────────────────────
    #[error("Cannot read sites file {path}")]
    #[diagnostic(
        code(siteimport::sites_file),
        help("Point at the input with --file, or set defaults.sites_file in the config.")
    )]
    SitesFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid sites file {path}: {reason}")]
    #[diagnostic(
        code(siteimport::invalid_sites_file),
        help("The file must hold a JSON array of site objects.")
    )]
    InvalidSitesFile { path: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(siteimport::profile_not_found),
        help("Available profiles: {available}\nConfig file: {config_path}")
    )]
    ProfileNotFound {
        name: String,
        available: String,
        config_path: String,
    },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(siteimport::validation))]
    Validation { field: String, reason: String },

    #[error("Failed to load configuration: {message}")]
    #[diagnostic(
        code(siteimport::config),
        help("Check the TOML syntax at {config_path}")
    )]
    Config {
        message: String,
        config_path: String,
    },

    #[error("Could not set up the API client: {message}")]
    #[diagnostic(code(siteimport::client))]
    Client { message: String },

    // ── Run result ───────────────────────────────────────────────────
    #[error("{failed} of {attempted} sites failed to import")]
    #[diagnostic(
        code(siteimport::incomplete),
        help("Reported because --fail-on-error is set. See the failure list above.")
    )]
    ImportIncomplete { failed: usize, attempted: usize },

    // ── Serialization ─────────────────────────────────────────────────
    #[error("Failed to render JSON output: {0}")]
    #[diagnostic(code(siteimport::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingAdminKey | Self::Prompt { .. } => exit_code::AUTH,
            Self::SitesFile { .. } | Self::InvalidSitesFile { .. } => exit_code::INPUT,
            Self::ProfileNotFound { .. } | Self::Config { .. } | Self::Client { .. } => {
                exit_code::CONFIG
            }
            Self::Validation { .. } => exit_code::USAGE,
            Self::ImportIncomplete { .. } => exit_code::INCOMPLETE,
            Self::Json(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::FileRead { path, source } => CliError::SitesFile {
                path: path.display().to_string(),
                source,
            },

            CoreError::Parse { path, source } => CliError::InvalidSitesFile {
                path: path.display().to_string(),
                reason: source.to_string(),
            },

            CoreError::NotAnArray { path, found } => CliError::InvalidSitesFile {
                path: path.display().to_string(),
                reason: format!("expected a JSON array, found {found}"),
            },

            CoreError::Client(err) => CliError::Client {
                message: err.to_string(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        let config_path = siteimport_config::config_path().display().to_string();
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },

            ConfigError::ProfileNotFound { name, available } => CliError::ProfileNotFound {
                name,
                available,
                config_path,
            },

            ConfigError::Figment(err) => CliError::Config {
                message: err.to_string(),
                config_path,
            },
        }
    }
}
