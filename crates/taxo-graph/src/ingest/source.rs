//! Where the taxonomy feed comes from.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

use taxo_core::TaxonomyFeed;

use super::IngestPhase;
use crate::error::{GraphError, GraphResult};

/// Published EU taxonomy feed.
pub const DEFAULT_FEED_URL: &str =
    "https://ec.europa.eu/sustainable-finance-taxonomy/assets/taxonomy.json";

const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// A feed location: an HTTP(S) URL or a local JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Url(String),
    File(PathBuf),
}

impl Default for FeedSource {
    fn default() -> Self {
        Self::Url(DEFAULT_FEED_URL.to_string())
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::Url(url) => f.write_str(url),
            FeedSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl FeedSource {
    async fn fetch_bytes(&self) -> GraphResult<Vec<u8>> {
        match self {
            FeedSource::Url(url) => {
                let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
                let response = client.get(url).send().await?.error_for_status()?;
                Ok(response.bytes().await?.to_vec())
            }
            FeedSource::File(path) => Ok(tokio::fs::read(path).await?),
        }
    }

    /// Fetch and parse the feed. Errors are tagged with the fetch or parse phase.
    pub async fn load(&self) -> GraphResult<TaxonomyFeed> {
        info!(source = %self, "Fetching taxonomy feed");

        let bytes = self
            .fetch_bytes()
            .await
            .map_err(|e| e.during(IngestPhase::Fetch))?;
        debug!(bytes = bytes.len(), "Feed downloaded");

        let feed = TaxonomyFeed::from_slice(&bytes)
            .map_err(|e| GraphError::from(e).during(IngestPhase::Parse))?;

        if feed.is_empty() {
            return Err(GraphError::feed(format!("feed at {} contains no records", self))
                .during(IngestPhase::Parse));
        }

        info!(
            sectors = feed.sectors.len(),
            activities = feed.activities.len(),
            objectives = feed.objectives.len(),
            matches = feed.matches.len(),
            "Feed parsed"
        );
        Ok(feed)
    }
}
