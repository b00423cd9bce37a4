pub mod connection;
pub mod listings;

pub use connection::Database;
pub use listings::{count_rows, save_listings, SqliteSink};
