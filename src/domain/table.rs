// src/domain/table.rs

use super::listing::COLUMNS;

/// An ordered, city-tagged set of listing rows produced by one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingTable<R> {
    rows: Vec<R>,
}

impl<R> ListingTable<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// (rows, columns), like a dataframe shape.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), COLUMNS.len())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    pub fn head(&self, n: usize) -> &[R] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Appends `other` below `self`, row-wise.
    pub fn concat(mut self, other: ListingTable<R>) -> Self {
        self.rows.extend(other.rows);
        self
    }
}

impl<R> Default for ListingTable<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R> From<Vec<R>> for ListingTable<R> {
    fn from(rows: Vec<R>) -> Self {
        Self::new(rows)
    }
}

impl<R> FromIterator<R> for ListingTable<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<R> IntoIterator for ListingTable<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a ListingTable<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
