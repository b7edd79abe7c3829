//! Admin key resolution: argument / env var, profile env var, then prompt.

use std::io::{self, BufRead, IsTerminal, Write};

use secrecy::SecretString;
use siteimport_config::Profile;
use tracing::debug;

use crate::error::CliError;

const PROMPT: &str = "Enter admin key: ";

/// Resolve the admin key, prompting only when no other source supplied one.
///
/// An explicitly supplied but blank key is rejected without prompting.
pub fn resolve_admin_key(
    supplied: Option<&str>,
    profile: &Profile,
) -> Result<SecretString, CliError> {
    let raw = if let Some(value) = supplied {
        value.to_owned()
    } else if let Some(key) = siteimport_config::resolve_admin_key_env(profile) {
        debug!("admin key taken from profile admin_key_env");
        return Ok(key);
    } else {
        prompt_admin_key()?
    };

    non_empty(&raw).ok_or(CliError::MissingAdminKey)
}

fn non_empty(raw: &str) -> Option<SecretString> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(SecretString::from(trimmed.to_owned()))
    }
}

/// Ask for the key: hidden input on a terminal, a plain line from stdin otherwise.
fn prompt_admin_key() -> Result<String, CliError> {
    if io::stdin().is_terminal() {
        return rpassword::prompt_password(PROMPT).map_err(prompt_err);
    }

    let mut stderr = io::stderr().lock();
    let _ = write!(stderr, "{PROMPT}");
    let _ = stderr.flush();
    read_admin_key(&mut io::stdin().lock()).map_err(prompt_err)
}

/// Read one line; end of input reads as an empty key.
fn read_admin_key(reader: &mut impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line)
}

/// Map an interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Prompt {
        reason: e.to_string(),
    }
}
