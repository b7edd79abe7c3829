// ── Import configuration ──
//
// Everything the importer needs to talk to the API. Built by the binary
// from CLI flags + config profile; core never reads files or env vars.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Default API endpoint when no profile overrides it.
pub const DEFAULT_BASE_URL: &str = "https://api.test.zephyrapp.nz";

/// Default input file, relative to the working directory.
pub const DEFAULT_SITES_FILE: &str = "sites.json";

/// How to verify the API's TLS certificate.
#[derive(Debug, Clone, Default)]
pub enum TlsVerification {
    /// Use the system certificate store.
    #[default]
    SystemDefaults,
    /// Trust an additional CA from a PEM file.
    CustomCa(PathBuf),
    /// Skip verification entirely.
    DangerAcceptInvalid,
}

/// Connection settings for one import run.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub base_url: Url,
    pub admin_key: SecretString,
    pub tls: TlsVerification,
    /// Request timeout; `None` leaves the HTTP client's default in place.
    pub timeout: Option<Duration>,
}

impl ImportConfig {
    pub(crate) fn transport(&self) -> siteimport_api::TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => siteimport_api::TlsMode::System,
            TlsVerification::CustomCa(path) => siteimport_api::TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => siteimport_api::TlsMode::DangerAcceptInvalid,
        };
        siteimport_api::TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
