// src/cleaning/record.rs

use super::fields::{
    clean_address, clean_agent, clean_city, clean_garage, clean_lot_size, clean_numeric_field,
    clean_price, clean_year_built,
};
use crate::domain::{Listing, ListingTable, RawListing};

/// Converts one raw listing into its typed form. Unparseable fields become
/// `None`; the row itself is always kept.
pub fn clean_listing(raw: &RawListing) -> Listing {
    Listing {
        mls_number: raw
            .mls_number
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        price: clean_price(raw.price.as_deref()),
        address: clean_address(raw.address.as_deref()),
        beds: clean_numeric_field(raw.beds.as_deref()),
        baths: clean_numeric_field(raw.baths.as_deref()),
        sqft: clean_numeric_field(raw.sqft.as_deref()),
        year_built: clean_year_built(raw.year_built.as_deref()),
        lot_size: clean_lot_size(raw.lot_size.as_deref()),
        garage: clean_garage(raw.garage.as_deref()),
        agent: clean_agent(raw.agent.as_deref()),
        city: clean_city(raw.city.as_deref()),
    }
}

/// Applies every field normalizer to every row. Same row count, same order.
pub fn clean_housing_data(table: &ListingTable<RawListing>) -> ListingTable<Listing> {
    table.iter().map(clean_listing).collect()
}
