//! Entry points over a listing source: raw, cleaned, static and
//! cleaned-static tables, all sharing one column schema.

use crate::cleaning::{clean_housing_data, sanitize};
use crate::config::{Config, DEFAULT_CONCURRENCY};
use crate::domain::{Listing, ListingTable, RawListing};
use crate::errors::{Error, Result};
use crate::fetch::{fetch_listings, get_data, FetchOutcome, FetchRequest};
use crate::output::{emit, Emitted, Output};
use crate::scraper::ListingSource;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct Pipeline<S> {
    source: S,
    concurrency: usize,
}

impl<S: ListingSource> Pipeline<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn from_config(source: S, config: &Config) -> Self {
        Self::new(source).with_concurrency(config.concurrency)
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Raw listings for the requested cities.
    pub fn get_data(
        &self,
        request: &FetchRequest,
        output: &Output,
    ) -> Result<FetchOutcome<Emitted<RawListing>>> {
        get_data(&self.source, request, output, self.concurrency)
    }

    /// Raw listings, cleaned and sanitized.
    pub fn get_cleaned_data(
        &self,
        request: &FetchRequest,
        output: &Output,
    ) -> Result<FetchOutcome<Emitted<Listing>>> {
        fetch_listings(&self.source, request, self.concurrency)?
            .try_map(|raw| emit(clean_and_sanitize(&raw), output))
    }
}

fn clean_and_sanitize(raw: &ListingTable<RawListing>) -> ListingTable<Listing> {
    let (table, report) = sanitize(clean_housing_data(raw));
    info!(
        "Cleaned {} rows: {} duplicates and {} invalid removed, {} kept",
        report.input_rows,
        report.duplicates_removed,
        report.invalid_removed,
        report.output_rows()
    );
    table
}

/// Loads the static datasets and stacks them row-wise, in the given order.
pub fn data_no_scrape<P: AsRef<Path>>(paths: &[P]) -> Result<ListingTable<RawListing>> {
    let mut table = ListingTable::empty();

    for path in paths {
        let path = path.as_ref();
        let rows = read_static_dataset(path)?;
        info!("Loaded {} rows from {}", rows.len(), path.display());
        table = table.concat(rows);
    }
    Ok(table)
}

fn read_static_dataset(path: &Path) -> Result<ListingTable<RawListing>> {
    if !path.is_file() {
        return Err(Error::StaticDatasetMissing {
            path: path.to_path_buf(),
        });
    }

    crate::scraper::read_raw_listings(path)
        .map(ListingTable::new)
        .map_err(|source| Error::StaticDatasetUnreadable {
            path: PathBuf::from(path),
            source,
        })
}

/// Static datasets, cleaned and sanitized.
pub fn cleaned_static_data<P: AsRef<Path>>(
    paths: &[P],
    output: &Output,
) -> Result<Emitted<Listing>> {
    let raw = data_no_scrape(paths)?;
    emit(clean_and_sanitize(&raw), output)
}
