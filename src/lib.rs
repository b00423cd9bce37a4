pub mod cities;
pub mod cleaning;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod scraper;
pub mod spreadsheets;
pub mod summary;

pub use config::Config;
pub use domain::{Listing, ListingTable, RawListing, COLUMNS};
pub use errors::{Error, Result};
pub use fetch::{get_data, CityFailure, FetchOutcome, FetchRequest};
pub use output::{Emitted, Output};
pub use pipeline::{cleaned_static_data, data_no_scrape, Pipeline};

#[cfg(test)]
mod tests;
