//! Configuration for siteimport.
//!
//! TOML profiles (one per API environment), env overrides, and translation
//! to `siteimport_core::ImportConfig`. The binary layers CLI flags on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use siteimport_core::{DEFAULT_BASE_URL, DEFAULT_SITES_FILE, ImportConfig, TlsVerification};

/// Prefix for environment overrides, e.g. `SITEIMPORT_DEFAULTS__TIMEOUT=60`.
pub const ENV_PREFIX: &str = "SITEIMPORT_";

/// Name of the profile used when none is configured or selected.
pub const DEFAULT_PROFILE: &str = "default";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found (available: {available})")]
    ProfileNotFound { name: String, available: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named API profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some(DEFAULT_PROFILE.into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// Input file holding the JSON array of sites.
    #[serde(default = "default_sites_file")]
    pub sites_file: PathBuf,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds. Unset means no client-side timeout.
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            sites_file: default_sites_file(),
            color: default_color(),
            insecure: false,
            timeout: None,
        }
    }
}

fn default_sites_file() -> PathBuf {
    PathBuf::from(DEFAULT_SITES_FILE)
}
fn default_color() -> String {
    "auto".into()
}

/// A named API target (test, production, local, ...).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// API base URL (e.g., "https://api.zephyrapp.nz").
    pub base_url: String,

    /// Environment variable name containing the admin key.
    pub admin_key_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

impl Profile {
    /// The profile used when the config file defines none.
    pub fn builtin() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            admin_key_env: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("nz", "zephyrapp", "siteimport").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("siteimport");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load Config from `path` + environment. A missing file yields defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["admin_key"]).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Profile resolution ──────────────────────────────────────────────

/// Resolve the active profile name from an explicit selection and config.
pub fn active_profile_name(selected: Option<&str>, config: &Config) -> String {
    selected
        .map(str::to_owned)
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| DEFAULT_PROFILE.into())
}

/// Look up a profile by name.
///
/// The default profile always resolves: when the config doesn't define it,
/// the built-in profile pointing at [`DEFAULT_BASE_URL`] is used.
pub fn resolve_profile(config: &Config, name: &str) -> Result<Profile, ConfigError> {
    if let Some(profile) = config.profiles.get(name) {
        return Ok(profile.clone());
    }

    if name == DEFAULT_PROFILE {
        return Ok(Profile::builtin());
    }

    let mut available: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
    available.sort_unstable();
    Err(ConfigError::ProfileNotFound {
        name: name.into(),
        available: if available.is_empty() {
            "none".into()
        } else {
            available.join(", ")
        },
    })
}

/// Read the admin key from the profile's `admin_key_env` variable, if set and non-empty.
pub fn resolve_admin_key_env(profile: &Profile) -> Option<SecretString> {
    let env_name = profile.admin_key_env.as_deref()?;
    std::env::var(env_name)
        .ok()
        .map(|val| val.trim().to_owned())
        .filter(|val| !val.is_empty())
        .map(SecretString::from)
}

/// Parse and check the profile's base URL (must be http or https).
pub fn validate_base_url(profile: &Profile) -> Result<url::Url, ConfigError> {
    let base_url: url::Url = profile
        .base_url
        .parse()
        .map_err(|e| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL '{}': {e}", profile.base_url),
        })?;

    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("expected an http(s) URL, got '{}'", profile.base_url),
        });
    }

    Ok(base_url)
}

/// Build an `ImportConfig` from a resolved profile and global defaults.
pub fn profile_to_import_config(
    profile: &Profile,
    defaults: &Defaults,
    admin_key: SecretString,
) -> Result<ImportConfig, ConfigError> {
    let base_url = validate_base_url(profile)?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let timeout = profile.timeout.or(defaults.timeout).map(Duration::from_secs);

    Ok(ImportConfig {
        base_url,
        admin_key,
        tls,
        timeout,
    })
}
