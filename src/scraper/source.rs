use crate::domain::RawListing;
use crate::scraper::SourceError;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Anything that can hand back raw listings for a city.
///
/// Implementations are shared across fetch worker threads.
pub trait ListingSource: Send + Sync {
    fn fetch(&self, city: &str, limit: usize) -> Result<Vec<RawListing>, SourceError>;
}

impl<F> ListingSource for F
where
    F: Fn(&str, usize) -> Result<Vec<RawListing>, SourceError> + Send + Sync,
{
    fn fetch(&self, city: &str, limit: usize) -> Result<Vec<RawListing>, SourceError> {
        self(city, limit)
    }
}

/// Replays listings captured earlier, one `<city>.csv` file per city.
#[derive(Debug, Clone)]
pub struct RecordedSource {
    dir: PathBuf,
}

impl RecordedSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn recording_path(&self, city: &str) -> PathBuf {
        self.dir.join(format!("{city}.csv"))
    }
}

pub fn read_raw_listings(path: &Path) -> Result<Vec<RawListing>, csv::Error> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    reader.deserialize().collect()
}

impl ListingSource for RecordedSource {
    fn fetch(&self, city: &str, limit: usize) -> Result<Vec<RawListing>, SourceError> {
        let path = self.recording_path(city);
        if !path.exists() {
            return Err(SourceError::Recording(format!(
                "no recording for '{city}' at {}",
                path.display()
            )));
        }

        let mut listings = read_raw_listings(&path)?;
        listings.truncate(limit);
        debug!("Replayed {} listings for {city}", listings.len());
        Ok(listings)
    }
}
