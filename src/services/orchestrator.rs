use serde::Deserialize;

use crate::domain::AggregatedResult;
use crate::services::{extractor, paginator, FetchOutcome, ListingStore, PageFetcher};

/// How a scrape session fails. Page-1 problems are terminal; anything that
/// goes wrong on later pages never reaches this enum.
#[derive(Debug)]
pub enum ScrapeError {
    /// Page 1 parsed cleanly but carried no listings.
    NotFound,
    /// The upstream site's anti-bot layer returned 403 on page 1.
    UpstreamBlocked,
    /// Transport failure reaching page 1.
    UpstreamUnavailable,
    /// Unexpected failure outside the scrape itself, e.g. persistence I/O.
    Internal(anyhow::Error),
}

impl std::fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrapeError::NotFound => write!(f, "no listings found"),
            ScrapeError::UpstreamBlocked => write!(f, "request blocked by upstream site"),
            ScrapeError::UpstreamUnavailable => write!(f, "failed to fetch data from upstream site"),
            ScrapeError::Internal(e) => write!(f, "internal error: {}", e),
        }
    }
}

impl std::error::Error for ScrapeError {}

/// What to do with a finished aggregate. The original service grew two
/// near-identical entry points (save-only and return-only); here a single
/// orchestrator carries the choice as configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrapeMode {
    Persist,
    Return,
    PersistAndReturn,
}

impl ScrapeMode {
    pub fn persists(self) -> bool {
        matches!(self, ScrapeMode::Persist | ScrapeMode::PersistAndReturn)
    }

    pub fn returns_listings(self) -> bool {
        matches!(self, ScrapeMode::Return | ScrapeMode::PersistAndReturn)
    }
}

/// Drives one scrape session per zip code: fetch page 1, extract listings
/// and the page count, walk the remaining pages, aggregate, persist.
pub struct ScrapeOrchestrator {
    fetcher: PageFetcher,
    store: ListingStore,
    base_url: String,
    mode: ScrapeMode,
}

impl ScrapeOrchestrator {
    pub fn new(
        fetcher: PageFetcher,
        store: ListingStore,
        base_url: String,
        mode: ScrapeMode,
    ) -> Self {
        Self {
            fetcher,
            store,
            base_url,
            mode,
        }
    }

    pub fn mode(&self) -> ScrapeMode {
        self.mode
    }

    pub fn search_url(&self, zip_code: &str) -> String {
        format!("{}/{}/", self.base_url.trim_end_matches('/'), zip_code)
    }

    /// Page 1 is the hard gate: if it cannot be fetched or yields nothing,
    /// the whole session fails and nothing is persisted. Later pages are
    /// best-effort; a bad one contributes zero listings and the loop moves
    /// on, so one blocked page cannot throw away an otherwise good session.
    pub async fn scrape_zip_code(&self, zip_code: &str) -> Result<AggregatedResult, ScrapeError> {
        let url = self.search_url(zip_code);

        let body = match self.fetcher.fetch(&url, &url).await {
            FetchOutcome::Success { body } => body,
            FetchOutcome::Blocked => return Err(ScrapeError::UpstreamBlocked),
            FetchOutcome::Failed => return Err(ScrapeError::UpstreamUnavailable),
        };

        let first_page = extractor::extract(&body);
        if first_page.listings.is_empty() {
            return Err(ScrapeError::NotFound);
        }

        log::info!(
            "Total pages for {}: {}",
            zip_code,
            first_page.total_pages.unwrap_or(1)
        );

        let mut listings = first_page.listings;

        for page_url in paginator::plan(first_page.total_pages, &url) {
            let body = match self.fetcher.fetch(&page_url, &page_url).await {
                FetchOutcome::Success { body } => body,
                FetchOutcome::Blocked => {
                    log::warn!("Skipping blocked page {}", page_url);
                    continue;
                }
                FetchOutcome::Failed => {
                    log::warn!("Skipping unreachable page {}", page_url);
                    continue;
                }
            };

            let page = extractor::extract(&body);
            if page.listings.is_empty() {
                log::warn!("No listings found on {}", page_url);
            }
            listings.extend(page.listings);
        }

        let result = AggregatedResult {
            zip_code: zip_code.to_string(),
            listings,
        };

        if self.mode.persists() {
            self.store
                .append(&result.zip_code, &result.listings)
                .map_err(ScrapeError::Internal)?;
        }

        log::info!(
            "Scraped {} listings for {}",
            result.listings.len(),
            result.zip_code
        );

        Ok(result)
    }
}
