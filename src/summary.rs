// src/summary.rs

use crate::domain::{Listing, ListingTable};
use std::fmt;

/// count/mean/min/max of one numeric column, ignoring missing values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnStats {
    fn from_values(values: impl Iterator<Item = f64>) -> Self {
        let mut count = 0;
        let mut sum = 0.0;
        let mut min: Option<f64> = None;
        let mut max: Option<f64> = None;

        for value in values {
            count += 1;
            sum += value;
            min = Some(min.map_or(value, |m| m.min(value)));
            max = Some(max.map_or(value, |m| m.max(value)));
        }

        Self {
            count,
            mean: (count > 0).then(|| sum / count as f64),
            min,
            max,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub rows: usize,
    pub columns: Vec<(&'static str, ColumnStats)>,
}

impl Summary {
    pub fn column(&self, name: &str) -> Option<&ColumnStats> {
        self.columns
            .iter()
            .find(|(column, _)| *column == name)
            .map(|(_, stats)| stats)
    }
}

/// Descriptive statistics for the numeric columns of a cleaned table.
pub fn describe(table: &ListingTable<Listing>) -> Summary {
    let numeric: [(&'static str, fn(&Listing) -> Option<f64>); 7] = [
        ("price", |l: &Listing| l.price),
        ("beds", |l: &Listing| l.beds),
        ("baths", |l: &Listing| l.baths),
        ("sqft", |l: &Listing| l.sqft),
        ("year_built", |l: &Listing| l.year_built.map(f64::from)),
        ("lot_size", |l: &Listing| l.lot_size),
        ("garage", |l: &Listing| l.garage.map(f64::from)),
    ];

    let columns = numeric
        .iter()
        .map(|(name, get)| (*name, ColumnStats::from_values(table.iter().filter_map(*get))))
        .collect();

    Summary {
        rows: table.len(),
        columns,
    }
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<12}{:>8}{:>14}{:>14}{:>14}",
            "column", "count", "mean", "min", "max"
        )?;
        for (name, stats) in &self.columns {
            writeln!(
                f,
                "{:<12}{:>8}{:>14}{:>14}{:>14}",
                name,
                stats.count,
                cell(stats.mean),
                cell(stats.min),
                cell(stats.max)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_skips_missing() {
        let table = ListingTable::new(vec![
            Listing {
                price: Some(100.0),
                garage: Some(2),
                ..Default::default()
            },
            Listing {
                price: Some(300.0),
                ..Default::default()
            },
            Listing::default(),
        ]);

        let summary = describe(&table);

        assert_eq!(summary.rows, 3);
        let price = summary.column("price").unwrap();
        assert_eq!(price.count, 2);
        assert_eq!(price.mean, Some(200.0));
        assert_eq!(price.min, Some(100.0));
        assert_eq!(price.max, Some(300.0));
        assert_eq!(summary.column("garage").unwrap().count, 1);
    }

    #[test]
    fn test_empty_column() {
        let summary = describe(&ListingTable::empty());
        let sqft = summary.column("sqft").unwrap();
        assert_eq!(sqft.count, 0);
        assert_eq!(sqft.mean, None);
        assert!(summary.to_string().contains("sqft"));
    }
}
