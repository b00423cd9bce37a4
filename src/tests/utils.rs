use crate::domain::RawListing;
use crate::scraper::{ListingSource, SourceError};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub fn raw_listing(mls: &str, price: &str, address: &str) -> RawListing {
    RawListing {
        mls_number: Some(mls.to_string()),
        price: Some(price.to_string()),
        address: Some(address.to_string()),
        beds: Some("3".to_string()),
        baths: Some("2".to_string()),
        sqft: Some("1,500".to_string()),
        ..Default::default()
    }
}

/// In-memory source keyed by city. Cities listed in `failing` return a
/// network error; unknown cities return no rows.
#[derive(Default)]
pub struct MemorySource {
    pub listings: HashMap<String, Vec<RawListing>>,
    pub failing: Vec<String>,
}

impl MemorySource {
    pub fn with_city(mut self, city: &str, listings: Vec<RawListing>) -> Self {
        self.listings.insert(city.to_string(), listings);
        self
    }

    pub fn failing(mut self, city: &str) -> Self {
        self.failing.push(city.to_string());
        self
    }
}

impl ListingSource for MemorySource {
    fn fetch(&self, city: &str, limit: usize) -> Result<Vec<RawListing>, SourceError> {
        if self.failing.iter().any(|c| c == city) {
            return Err(SourceError::Network(format!("connection reset for {city}")));
        }
        Ok(self
            .listings
            .get(city)
            .map(|rows| rows.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

/// Writes `contents` to `dir/name` and returns the path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap_or_else(|e| panic!("writing {}: {e}", path.display()));
    path
}
