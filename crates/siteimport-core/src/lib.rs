// siteimport-core: Record loading, sequential submission, and run summary.
//
// The binary builds an `ImportConfig`, loads records with `load_records`,
// and hands both to an `Importer`. Progress is reported through the
// `ImportObserver` trait so core stays free of console concerns.

pub mod config;
pub mod error;
pub mod importer;
pub mod outcome;
pub mod record;

pub use config::{DEFAULT_BASE_URL, DEFAULT_SITES_FILE, ImportConfig, TlsVerification};
pub use error::CoreError;
pub use importer::{ImportObserver, Importer};
pub use outcome::{Failure, Outcome, RunSummary};
pub use record::{SiteRecord, UNNAMED_SITE, load_records};
