// HTTP client for the sites endpoint.
//
// Auth: admin key passed as the `key` query parameter on every request.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Async client for creating sites through the admin API.
///
/// Every call issues exactly one request. There is no retry layer: a
/// transport failure or rejection is returned to the caller as-is.
pub struct SitesClient {
    http: reqwest::Client,
    base_url: Url,
    admin_key: SecretString,
}

impl SitesClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL, admin key, and transport config.
    pub fn from_admin_key(
        base_url: &str,
        admin_key: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, admin_key, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(
        base_url: &str,
        admin_key: SecretString,
        http: reqwest::Client,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            admin_key,
        })
    }

    /// Ensure the base path ends with `/` so relative joins append to it.
    ///
    /// `https://host/api` becomes `https://host/api/`, making `sites`
    /// resolve to `https://host/api/sites` rather than `https://host/sites`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// Full URL of the sites collection, without the key parameter.
    pub fn sites_url(&self) -> Result<Url, Error> {
        Ok(self.base_url.join("sites")?)
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Create a site.
    ///
    /// `POST {base}/sites?key={admin_key}` with `site` as the JSON body.
    /// Returns the created resource as the API sent it back.
    pub async fn create_site<B: Serialize + ?Sized + Sync>(&self, site: &B) -> Result<Value, Error> {
        let url = self.sites_url()?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .query(&[("key", self.admin_key.expose_secret())])
            .json(site)
            .send()
            .await?;

        handle_response(resp).await
    }
}

// ── Response handling ────────────────────────────────────────────────

async fn handle_response(resp: reqwest::Response) -> Result<Value, Error> {
    let status = resp.status();
    let body = resp.text().await?;
    debug!(status = status.as_u16(), bytes = body.len(), "response received");

    if status.is_success() {
        parse_created(body)
    } else {
        Err(Error::Api {
            status: status.as_u16(),
            message: rejection_message(status, &body),
        })
    }
}

/// Parse a 2xx body. An empty body is a success without a payload.
fn parse_created(body: String) -> Result<Value, Error> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}

/// Best-effort human-readable reason for a rejected request.
///
/// Order: JSON `message`, JSON `error`, then `HTTP <status>`. A body that
/// isn't JSON at all is used verbatim.
fn rejection_message(status: StatusCode, raw: &str) -> String {
    let fallback = || format!("HTTP {}", status.as_u16());

    match serde_json::from_str::<Value>(raw) {
        Ok(body) => text_field(&body, "message")
            .or_else(|| text_field(&body, "error"))
            .map_or_else(fallback, str::to_owned),
        Err(_) if raw.trim().is_empty() => fallback(),
        Err(_) => raw.to_owned(),
    }
}

fn text_field<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
