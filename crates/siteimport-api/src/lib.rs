// siteimport-api: Async Rust client for the Zephyr sites API

pub mod error;
pub mod sites;
pub mod transport;

pub use error::Error;
pub use sites::SitesClient;
pub use transport::{TlsMode, TransportConfig};
