pub mod models;
mod scraper;
mod scraper_error;
pub mod source;

pub use models::{parse_listing_cards, SiteSelectors};
pub use self::scraper::{build_page_url, HttpListingSource};
pub use self::scraper_error::SourceError;
pub use source::{read_raw_listings, ListingSource, RecordedSource};
