//! CLI-side configuration: applies `GlobalOpts` overrides on top of the
//! loaded profile and produces the settings for one run.

use std::path::PathBuf;

use clap::ValueEnum;
use secrecy::SecretString;
use siteimport_config::{Defaults, Profile};
use siteimport_core::ImportConfig;

use crate::cli::{ColorMode, GlobalOpts};
use crate::error::CliError;

/// Everything resolved before the admin key is known.
#[derive(Debug)]
pub struct Settings {
    pub profile_name: String,
    pub profile: Profile,
    pub defaults: Defaults,
    pub sites_file: PathBuf,
    pub color: ColorMode,
}

impl Settings {
    /// Combine with the admin key into the core's connection settings.
    pub fn import_config(&self, admin_key: SecretString) -> Result<ImportConfig, CliError> {
        Ok(siteimport_config::profile_to_import_config(
            &self.profile,
            &self.defaults,
            admin_key,
        )?)
    }
}

/// Load config file + env, select the profile, and apply CLI flag overrides.
pub fn resolve_settings(global: &GlobalOpts) -> Result<Settings, CliError> {
    let cfg = siteimport_config::load_config()?;
    let profile_name = siteimport_config::active_profile_name(global.profile.as_deref(), &cfg);
    let profile = apply_overrides(
        siteimport_config::resolve_profile(&cfg, &profile_name)?,
        global,
    );

    // Fail on a bad URL before anything prompts for a key.
    siteimport_config::validate_base_url(&profile)?;

    let color = match global.color {
        Some(mode) => mode,
        None => parse_color(&cfg.defaults.color)?,
    };

    let sites_file = global
        .file
        .clone()
        .unwrap_or_else(|| cfg.defaults.sites_file.clone());

    tracing::debug!(profile = %profile_name, base_url = %profile.base_url, "settings resolved");

    Ok(Settings {
        profile_name,
        profile,
        defaults: cfg.defaults,
        sites_file,
        color,
    })
}

/// Flags win over the profile (flag > env > profile > defaults).
fn apply_overrides(mut profile: Profile, global: &GlobalOpts) -> Profile {
    if let Some(ref url) = global.base_url {
        profile.base_url.clone_from(url);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    profile
}

fn parse_color(raw: &str) -> Result<ColorMode, CliError> {
    ColorMode::from_str(raw, true).map_err(|_| CliError::Validation {
        field: "defaults.color".into(),
        reason: format!("expected 'auto', 'always', or 'never', got '{raw}'"),
    })
}
