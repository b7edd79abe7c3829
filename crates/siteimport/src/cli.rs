//! Clap derive structures for the `siteimport` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// siteimport -- bulk-create sites through the Zephyr admin API
#[derive(Debug, Parser)]
#[command(
    name = "siteimport",
    version,
    about = "Bulk-create sites from a JSON file through the Zephyr admin API",
    long_about = "Reads a JSON array of site records and submits each one, in order,\n\
        to the sites endpoint of the admin API. Every record is attempted;\n\
        failures are listed in the summary at the end of the run."
)]
pub struct Cli {
    /// Admin key for the sites API (prompted for when omitted)
    #[arg(env = "SITEIMPORT_ADMIN_KEY", hide_env_values = true)]
    pub admin_key: Option<String>,

    #[command(flatten)]
    pub global: GlobalOpts,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// API profile to use
    #[arg(long, short = 'p', env = "SITEIMPORT_PROFILE")]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, short = 'u', env = "SITEIMPORT_BASE_URL")]
    pub base_url: Option<String>,

    /// JSON file containing the array of sites [default: sites.json]
    #[arg(long, short = 'f', env = "SITEIMPORT_FILE")]
    pub file: Option<PathBuf>,

    /// Summary output format
    #[arg(long, short = 'o', env = "SITEIMPORT_OUTPUT", default_value = "text")]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress per-site progress lines
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "SITEIMPORT_INSECURE")]
    pub insecure: bool,

    /// Request timeout in seconds (unset: no timeout)
    #[arg(long, env = "SITEIMPORT_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Exit non-zero when any site fails to import
    #[arg(long)]
    pub fail_on_error: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable progress and summary
    Text,
    /// Summary as pretty-printed JSON on stdout; progress goes to stderr
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}
