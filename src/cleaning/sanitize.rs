// src/cleaning/sanitize.rs

use super::fields::is_missing;
use crate::domain::{Listing, ListingTable};
use std::collections::HashSet;
use tracing::debug;

/// Identity used to spot repeated listings.
///
/// Rows with an MLS number are keyed on (mls, address). Rows without one fall
/// back to their content. A row with an MLS number never matches one without,
/// since the two variants never compare equal.
#[derive(Debug, PartialEq, Eq, Hash)]
enum DuplicateKey {
    Mls {
        mls_number: String,
        address: Option<String>,
    },
    Content {
        address: Option<String>,
        price: Option<u64>,
        beds: Option<u64>,
        baths: Option<u64>,
        sqft: Option<u64>,
    },
}

fn float_key(value: Option<f64>) -> Option<u64> {
    value.map(f64::to_bits)
}

impl DuplicateKey {
    fn of(listing: &Listing) -> Self {
        let mls_number = listing
            .mls_number
            .as_deref()
            .filter(|mls| !is_missing(Some(*mls)));
        match mls_number {
            Some(mls_number) => DuplicateKey::Mls {
                mls_number: mls_number.to_string(),
                address: listing.address.clone(),
            },
            None => DuplicateKey::Content {
                address: listing.address.clone(),
                price: float_key(listing.price),
                beds: float_key(listing.beds),
                baths: float_key(listing.baths),
                sqft: float_key(listing.sqft),
            },
        }
    }
}

/// Keeps the first occurrence of each listing, in input order.
pub fn remove_duplicates(table: ListingTable<Listing>) -> ListingTable<Listing> {
    let mut seen = HashSet::new();
    let before = table.len();

    let kept: ListingTable<Listing> = table
        .into_iter()
        .filter(|listing| seen.insert(DuplicateKey::of(listing)))
        .collect();

    debug!("Removed {} duplicate listings", before - kept.len());
    kept
}

/// A row is worth keeping when it has a price, an address and at least one
/// size signal.
pub fn is_valid_entry(listing: &Listing) -> bool {
    let has_size = listing.beds.is_some() || listing.baths.is_some() || listing.sqft.is_some();
    listing.price.is_some() && !is_missing(listing.address.as_deref()) && has_size
}

/// Drops rows lacking a price, an address, or every one of beds/baths/sqft.
pub fn remove_invalid_entries(table: ListingTable<Listing>) -> ListingTable<Listing> {
    let before = table.len();

    let kept: ListingTable<Listing> = table.into_iter().filter(is_valid_entry).collect();

    debug!("Removed {} invalid listings", before - kept.len());
    kept
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    pub input_rows: usize,
    pub duplicates_removed: usize,
    pub invalid_removed: usize,
}

impl SanitizeReport {
    pub fn output_rows(&self) -> usize {
        self.input_rows - self.duplicates_removed - self.invalid_removed
    }
}

/// Deduplicates, then filters invalid rows.
pub fn sanitize(table: ListingTable<Listing>) -> (ListingTable<Listing>, SanitizeReport) {
    let input_rows = table.len();
    let deduplicated = remove_duplicates(table);
    let after_dedup = deduplicated.len();
    let valid = remove_invalid_entries(deduplicated);

    let report = SanitizeReport {
        input_rows,
        duplicates_removed: input_rows - after_dedup,
        invalid_removed: after_dedup - valid.len(),
    };
    (valid, report)
}
