pub mod fields;
pub mod record;
pub mod sanitize;

pub use fields::{
    clean_address, clean_agent, clean_city, clean_garage, clean_lot_size, clean_numeric_field,
    clean_price, clean_year_built, display_city, is_missing,
};
pub use record::{clean_housing_data, clean_listing};
pub use sanitize::{remove_duplicates, remove_invalid_entries, sanitize, SanitizeReport};
