// scraper.rs
use crate::config::Config;
use crate::domain::RawListing;
use crate::scraper::models::{parse_listing_cards, SiteSelectors};
use crate::scraper::source::ListingSource;
use crate::scraper::SourceError;
use rand::Rng;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

const MAX_ATTEMPTS: u64 = 3;
const MAX_BACKOFF_SECS: u64 = 10;
const JITTER_MAX_MILLIS: u64 = 2_000;

/// Live listing source: fetches search result pages over HTTP and reads the
/// listing cards out of the HTML.
pub struct HttpListingSource {
    client: Client,
    url_template: String,
    selectors: SiteSelectors,
    max_pages: usize,
    page_delay: Duration,
}

impl HttpListingSource {
    pub fn new(config: &Config) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok(Self {
            client,
            url_template: config.base_url.clone(),
            selectors: SiteSelectors::default(),
            max_pages: config.max_pages,
            page_delay: config.page_delay,
        })
    }

    pub fn with_selectors(mut self, selectors: SiteSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    /// Search URL for `city`, with `?page=N` from the second page on.
    pub fn page_url(&self, city: &str, page: usize) -> Result<Url, SourceError> {
        build_page_url(&self.url_template, city, page)
    }

    fn fetch_html(&self, url: &Url) -> Result<String, SourceError> {
        let mut last_err = None;

        for attempt in 1..=MAX_ATTEMPTS {
            match self.try_fetch_html(url) {
                Ok(html) => return Ok(html),
                // Blocks are not retried.
                Err(e @ SourceError::Blocked(_)) => return Err(e),
                Err(e) => {
                    warn!("Attempt {attempt} for {url} failed: {e}");
                    last_err = Some(e);

                    if attempt < MAX_ATTEMPTS {
                        let base = std::cmp::min(2 * attempt, MAX_BACKOFF_SECS);
                        let jitter = rand::thread_rng().gen_range(0..=JITTER_MAX_MILLIS);
                        std::thread::sleep(
                            Duration::from_secs(base) + Duration::from_millis(jitter),
                        );
                    }
                }
            }
        }

        Err(last_err.unwrap_or_else(|| SourceError::Network("retry loop failed".into())))
    }

    fn try_fetch_html(&self, url: &Url) -> Result<String, SourceError> {
        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::Blocked(format!("HTTP {status} for {url}")));
        }

        let text = resp
            .text()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(SourceError::Network(format!("HTTP {status} for {url}")));
        }

        Ok(text)
    }
}

pub fn build_page_url(template: &str, city: &str, page: usize) -> Result<Url, SourceError> {
    let mut url = Url::parse(&template.replace("{city}", city))
        .map_err(|e| SourceError::UnexpectedShape(format!("bad search url: {e}")))?;
    if page > 1 {
        url.query_pairs_mut().append_pair("page", &page.to_string());
    }
    Ok(url)
}

impl ListingSource for HttpListingSource {
    fn fetch(&self, city: &str, limit: usize) -> Result<Vec<RawListing>, SourceError> {
        let mut listings: Vec<RawListing> = Vec::new();

        for page in 1..=self.max_pages {
            if listings.len() >= limit {
                break;
            }

            let url = self.page_url(city, page)?;
            debug!("Fetching page {page} for {city}: {url}");

            let html = match self.fetch_html(&url) {
                Ok(html) => html,
                // Keep what earlier pages gave us; fail the city only if nothing came back.
                Err(e) if !listings.is_empty() => {
                    warn!("Stopping {city} at page {page}: {e}");
                    break;
                }
                Err(e) => return Err(e),
            };

            let remaining = limit - listings.len();
            let page_listings = parse_listing_cards(&html, &self.selectors, remaining)?;
            if page_listings.is_empty() {
                debug!("No listings on page {page} for {city}, stopping");
                break;
            }

            listings.extend(page_listings);
            if listings.len() < limit && page < self.max_pages {
                std::thread::sleep(self.page_delay);
            }
        }

        info!("Fetched {} listings for {city}", listings.len());
        Ok(listings)
    }
}
