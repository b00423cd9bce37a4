// src/domain/listing.rs

use serde::{Deserialize, Serialize};

/// Column order shared by every table the pipeline emits, raw or cleaned.
pub const COLUMNS: [&str; 11] = [
    "mls_number",
    "price",
    "address",
    "beds",
    "baths",
    "sqft",
    "year_built",
    "lot_size",
    "garage",
    "agent",
    "city",
];

/// A listing exactly as the source produced it. Every field may be absent,
/// empty, or carry stray units and contact text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawListing {
    #[serde(alias = "mls")]
    pub mls_number: Option<String>,
    pub price: Option<String>,
    pub address: Option<String>,
    pub beds: Option<String>,
    pub baths: Option<String>,
    pub sqft: Option<String>,
    pub year_built: Option<String>,
    pub lot_size: Option<String>,
    pub garage: Option<String>,
    pub agent: Option<String>,
    pub city: Option<String>,
}

/// A listing with every field converted to its typed form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub mls_number: Option<String>,
    pub price: Option<f64>,
    pub address: Option<String>,
    pub beds: Option<f64>,
    pub baths: Option<f64>,
    pub sqft: Option<f64>,
    pub year_built: Option<i32>,
    /// Acres.
    pub lot_size: Option<f64>,
    pub garage: Option<u32>,
    pub agent: Option<String>,
    /// Canonical slug, e.g. "salt-lake-city".
    pub city: Option<String>,
}

/// One cell of an exported row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Integer(i64),
}

impl Cell {
    fn text(value: &Option<String>) -> Self {
        value.clone().map(Cell::Text).unwrap_or(Cell::Empty)
    }

    fn number(value: Option<f64>) -> Self {
        value.map(Cell::Number).unwrap_or(Cell::Empty)
    }

    fn integer(value: Option<i64>) -> Self {
        value.map(Cell::Integer).unwrap_or(Cell::Empty)
    }
}

/// Rows that can be written by any output sink, in `COLUMNS` order.
pub trait TableRow: Serialize {
    /// SQLite table the rows land in.
    const TABLE_NAME: &'static str;
    /// SQLite column types, in `COLUMNS` order.
    const SQL_TYPES: [&'static str; 11];

    fn cells(&self) -> [Cell; 11];
}

impl TableRow for RawListing {
    const TABLE_NAME: &'static str = "raw_listings";
    const SQL_TYPES: [&'static str; 11] = ["TEXT"; 11];

    fn cells(&self) -> [Cell; 11] {
        [
            Cell::text(&self.mls_number),
            Cell::text(&self.price),
            Cell::text(&self.address),
            Cell::text(&self.beds),
            Cell::text(&self.baths),
            Cell::text(&self.sqft),
            Cell::text(&self.year_built),
            Cell::text(&self.lot_size),
            Cell::text(&self.garage),
            Cell::text(&self.agent),
            Cell::text(&self.city),
        ]
    }
}

impl TableRow for Listing {
    const TABLE_NAME: &'static str = "listings";
    const SQL_TYPES: [&'static str; 11] = [
        "TEXT", "REAL", "TEXT", "REAL", "REAL", "REAL", "INTEGER", "REAL", "INTEGER", "TEXT",
        "TEXT",
    ];

    fn cells(&self) -> [Cell; 11] {
        [
            Cell::text(&self.mls_number),
            Cell::number(self.price),
            Cell::text(&self.address),
            Cell::number(self.beds),
            Cell::number(self.baths),
            Cell::number(self.sqft),
            Cell::integer(self.year_built.map(i64::from)),
            Cell::number(self.lot_size),
            Cell::integer(self.garage.map(i64::from)),
            Cell::text(&self.agent),
            Cell::text(&self.city),
        ]
    }
}
