use thiserror::Error;

/// Top-level error type for the `siteimport-api` crate.
///
/// The `Display` text of every request-level variant is the human-readable
/// failure message shown next to a site in the import log, so the wording
/// here is user-facing.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// The API host could not be reached (connection refused, DNS failure, etc.)
    #[error("Connection failed - is the server running?")]
    ConnectionFailed(#[source] reqwest::Error),

    /// The request did not complete within the transport timeout.
    #[error("Request timed out")]
    Timeout(#[source] reqwest::Error),

    /// Any other failure raised while sending the request or reading the response.
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-2xx response. `message` is the best-effort reason extracted from the body.
    #[error("{message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// A 2xx response whose body was not valid JSON, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the admin key as a query parameter.
        let err = err.without_url();
        match TransportKind::of(err.is_connect(), err.is_timeout()) {
            TransportKind::Connect => Self::ConnectionFailed(err),
            TransportKind::Timeout => Self::Timeout(err),
            TransportKind::Other => Self::Transport(err),
        }
    }
}

/// Transport failure class. A connect timeout counts as a connection failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransportKind {
    Connect,
    Timeout,
    Other,
}

impl TransportKind {
    fn of(is_connect: bool, is_timeout: bool) -> Self {
        if is_connect {
            Self::Connect
        } else if is_timeout {
            Self::Timeout
        } else {
            Self::Other
        }
    }
}

impl Error {
    /// Returns `true` if the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout(_) | Self::Transport(_)
        )
    }

    /// HTTP status of an API rejection, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
