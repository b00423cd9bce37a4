//! Per-city fetch orchestration.
//!
//! Cities are fetched on a small pool of scoped worker threads. A city that
//! fails is reported alongside the rows of the cities that succeeded; it never
//! aborts the batch.

use crate::cities::{all_slugs, find_city};
use crate::cleaning::fields::clean_city;
use crate::domain::{ListingTable, RawListing};
use crate::errors::{Error, Result};
use crate::output::{emit, Emitted, Output};
use crate::scraper::{ListingSource, SourceError};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Per-city cap, not a global one.
    pub max_listings: usize,
    /// `None` fetches every supported city.
    pub cities: Option<Vec<String>>,
}

impl FetchRequest {
    pub fn new<I, S>(max_listings: usize, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            max_listings,
            cities: Some(cities.into_iter().map(Into::into).collect()),
        }
    }

    pub fn all_cities(max_listings: usize) -> Self {
        Self {
            max_listings,
            cities: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityFailure {
    pub city: String,
    pub message: String,
}

/// Result of a batch fetch plus everything that went wrong along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome<T> {
    pub data: T,
    /// Requested slugs that are not supported, as given.
    pub rejected_cities: Vec<String>,
    pub failures: Vec<CityFailure>,
}

impl<T> FetchOutcome<T> {
    /// True when every requested city was recognized and fetched.
    pub fn is_complete(&self) -> bool {
        self.rejected_cities.is_empty() && self.failures.is_empty()
    }

    pub fn map<U, F>(self, f: F) -> FetchOutcome<U>
    where
        F: FnOnce(T) -> U,
    {
        FetchOutcome {
            data: f(self.data),
            rejected_cities: self.rejected_cities,
            failures: self.failures,
        }
    }

    pub fn try_map<U, F>(self, f: F) -> Result<FetchOutcome<U>>
    where
        F: FnOnce(T) -> Result<U>,
    {
        Ok(FetchOutcome {
            data: f(self.data)?,
            rejected_cities: self.rejected_cities,
            failures: self.failures,
        })
    }
}

/// Splits requested cities into canonical supported slugs and rejected input.
/// Order and repeats are preserved.
pub fn validate_cities(requested: &[String]) -> (Vec<String>, Vec<String>) {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    for city in requested {
        match clean_city(Some(city.as_str())).filter(|slug| find_city(slug).is_some()) {
            Some(slug) => accepted.push(slug),
            None => rejected.push(city.clone()),
        }
    }
    (accepted, rejected)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// One city's fetch. A panicking source fails that city only.
fn fetch_city<S>(
    source: &S,
    city: &str,
    limit: usize,
) -> std::result::Result<Vec<RawListing>, SourceError>
where
    S: ListingSource + ?Sized,
{
    panic::catch_unwind(AssertUnwindSafe(|| source.fetch(city, limit)))
        .unwrap_or_else(|payload| Err(SourceError::Panicked(panic_message(payload))))
}

/// Runs `source.fetch` for every city on at most `concurrency` threads and
/// returns the results in the order of `cities`.
fn fetch_each<S>(
    source: &S,
    cities: &[String],
    limit: usize,
    concurrency: usize,
) -> Vec<std::result::Result<Vec<RawListing>, SourceError>>
where
    S: ListingSource + ?Sized,
{
    let workers = concurrency.clamp(1, cities.len().max(1));
    let next = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let next = &next;
            scope.spawn(move || loop {
                let index = next.fetch_add(1, Ordering::Relaxed);
                let Some(city) = cities.get(index) else {
                    break;
                };
                if tx.send((index, fetch_city(source, city, limit))).is_err() {
                    break;
                }
            });
        }
    });
    drop(tx);

    let mut slots: Vec<Option<_>> = cities.iter().map(|_| None).collect();
    for (index, result) in rx {
        slots[index] = Some(result);
    }
    slots
        .into_iter()
        .map(|slot| {
            slot.unwrap_or_else(|| Err(SourceError::Network("fetch worker exited early".into())))
        })
        .collect()
}

/// Fetches up to `max_listings` raw listings for each requested city and
/// stacks them into one table, each row tagged with its city slug.
pub fn fetch_listings<S>(
    source: &S,
    request: &FetchRequest,
    concurrency: usize,
) -> Result<FetchOutcome<ListingTable<RawListing>>>
where
    S: ListingSource + ?Sized,
{
    if request.max_listings == 0 {
        return Err(Error::InvalidRequest(
            "max_listings must be a positive integer".into(),
        ));
    }

    let requested = request.cities.clone().unwrap_or_else(all_slugs);
    let (cities, rejected_cities) = validate_cities(&requested);
    for city in &rejected_cities {
        warn!("Skipping unsupported city '{city}'");
    }

    info!(
        "Fetching up to {} listings for {} cities",
        request.max_listings,
        cities.len()
    );

    let mut rows = Vec::new();
    let mut failures = Vec::new();
    let results = fetch_each(source, &cities, request.max_listings, concurrency);

    for (city, result) in cities.iter().zip(results) {
        match result {
            Ok(listings) => {
                info!("{city}: {} listings", listings.len().min(request.max_listings));
                rows.extend(
                    listings
                        .into_iter()
                        .take(request.max_listings)
                        .map(|listing| RawListing {
                            city: Some(city.clone()),
                            ..listing
                        }),
                );
            }
            Err(e) => {
                warn!("Fetch failed for {city}: {e}");
                failures.push(CityFailure {
                    city: city.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(FetchOutcome {
        data: ListingTable::new(rows),
        rejected_cities,
        failures,
    })
}

/// Raw data for the requested cities, emitted through `output`.
pub fn get_data<S>(
    source: &S,
    request: &FetchRequest,
    output: &Output,
    concurrency: usize,
) -> Result<FetchOutcome<Emitted<RawListing>>>
where
    S: ListingSource + ?Sized,
{
    fetch_listings(source, request, concurrency)?.try_map(|table| emit(table, output))
}
