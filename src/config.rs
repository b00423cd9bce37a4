use crate::errors::{Error, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.utahrealestate.com/search/city/{city}";
pub const DEFAULT_CONCURRENCY: usize = 4;
pub const DEFAULT_MAX_LISTINGS: usize = 5;

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Config {
    /// Search page URL; `{city}` is replaced with the city slug.
    pub base_url: String,
    /// Upper bound on cities fetched at the same time.
    pub concurrency: usize,
    pub request_timeout: Duration,
    pub max_pages: usize,
    pub page_delay: Duration,
    /// Static reference datasets used when scraping is skipped.
    pub static_datasets: Vec<PathBuf>,
    pub demo_dataset: PathBuf,
    /// Directory of `<city>.csv` recordings, used instead of live fetches when set.
    pub recordings_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout: Duration::from_secs(60),
            max_pages: 5,
            page_delay: Duration::from_secs(2),
            static_datasets: vec![
                PathBuf::from("data/utah_county_listings.csv"),
                PathBuf::from("data/salt_lake_county_listings.csv"),
            ],
            demo_dataset: PathBuf::from("data/demo_listings.csv"),
            recordings_dir: None,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| Error::Config(format!("{name} must be a number, got '{raw}'")))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from any variable lookup; unset variables keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(url) = lookup("HOUSING_BASE_URL") {
            config.base_url = url;
        }
        if let Some(raw) = lookup("HOUSING_CONCURRENCY") {
            config.concurrency = parse_var("HOUSING_CONCURRENCY", &raw)?;
        }
        if let Some(raw) = lookup("HOUSING_REQUEST_TIMEOUT_SECS") {
            config.request_timeout =
                Duration::from_secs(parse_var("HOUSING_REQUEST_TIMEOUT_SECS", &raw)?);
        }
        if let Some(raw) = lookup("HOUSING_MAX_PAGES") {
            config.max_pages = parse_var("HOUSING_MAX_PAGES", &raw)?;
        }
        if let Some(raw) = lookup("HOUSING_STATIC_DATASETS") {
            config.static_datasets = raw
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .collect();
        }
        if let Some(dir) = lookup("HOUSING_RECORDINGS_DIR") {
            config.recordings_dir = Some(PathBuf::from(dir));
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(Error::Config("concurrency must be at least 1".into()));
        }
        if !self.base_url.contains("{city}") {
            return Err(Error::Config(format!(
                "base url '{}' has no {{city}} placeholder",
                self.base_url
            )));
        }
        Ok(())
    }
}
