// ── Importer ──
//
// Submits records one at a time, in file order. Each submission is awaited
// before the next starts; per-record failures are folded into the summary
// and never stop the run.

use siteimport_api::SitesClient;
use tracing::{info, warn};

use crate::config::ImportConfig;
use crate::error::CoreError;
use crate::outcome::{Outcome, RunSummary};
use crate::record::SiteRecord;

/// Receives progress as the run advances. Positions are 1-based.
///
/// All methods default to no-ops so callers implement only what they render.
pub trait ImportObserver {
    /// A record is about to be submitted.
    fn submitting(&mut self, _position: usize, _total: usize, _name: &str) {}

    /// A record's submission resolved.
    fn finished(&mut self, _position: usize, _total: usize, _name: &str, _outcome: &Outcome) {}
}

/// Observer that ignores every event.
impl ImportObserver for () {}

/// Drives a batch of site submissions against the sites API.
pub struct Importer {
    client: SitesClient,
}

impl Importer {
    /// Build an importer (and its HTTP client) from connection settings.
    pub fn new(config: &ImportConfig) -> Result<Self, CoreError> {
        let client = SitesClient::from_admin_key(
            config.base_url.as_str(),
            config.admin_key.clone(),
            &config.transport(),
        )?;
        Ok(Self { client })
    }

    /// Submit one record. Exactly one request; errors become `Outcome::Failed`.
    pub async fn submit(&self, record: &SiteRecord) -> Outcome {
        match self.client.create_site(record).await {
            Ok(created) => Outcome::Created(created),
            Err(err) => Outcome::Failed(err.to_string()),
        }
    }

    /// Submit every record in order and return the summary.
    pub async fn run<O>(&self, records: &[SiteRecord], observer: &mut O) -> RunSummary
    where
        O: ImportObserver + Send + ?Sized,
    {
        let total = records.len();
        let mut summary = RunSummary::default();

        for (index, record) in records.iter().enumerate() {
            let position = index + 1;
            let name = record.display_name();

            observer.submitting(position, total, name);
            let outcome = self.submit(record).await;

            match &outcome {
                Outcome::Created(_) => info!(position, total, site = name, "site created"),
                Outcome::Failed(message) => {
                    warn!(position, total, site = name, error = %message, "site rejected");
                }
            }

            summary.record(name, &outcome);
            observer.finished(position, total, name, &outcome);
        }

        info!(
            attempted = summary.attempted(),
            succeeded = summary.succeeded(),
            failed = summary.failed(),
            "import finished"
        );
        summary
    }
}
