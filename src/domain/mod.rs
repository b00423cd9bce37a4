pub mod listing;
pub mod table;

pub use listing::{Cell, Listing, RawListing, TableRow, COLUMNS};
pub use table::ListingTable;
