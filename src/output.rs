//! Where a finished table goes: kept in memory or written to a file.

use crate::db::{Database, SqliteSink};
use crate::domain::{ListingTable, TableRow, COLUMNS};
use crate::errors::Result;
use crate::spreadsheets::XlsxSink;
use std::path::{Path, PathBuf};
use tracing::info;

/// Something that can persist a listing table.
pub trait TableSink {
    fn write<R: TableRow>(&self, table: &ListingTable<R>) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Hand the table back to the caller.
    Table,
    Csv(PathBuf),
    Xlsx(PathBuf),
    Sqlite(PathBuf),
}

impl Output {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Output::Table => None,
            Output::Csv(path) | Output::Xlsx(path) | Output::Sqlite(path) => Some(path),
        }
    }
}

/// What an entry point produced for its `Output`.
#[derive(Debug, Clone, PartialEq)]
pub enum Emitted<R> {
    Table(ListingTable<R>),
    File(PathBuf),
}

impl<R> Emitted<R> {
    pub fn into_table(self) -> Option<ListingTable<R>> {
        match self {
            Emitted::Table(table) => Some(table),
            Emitted::File(_) => None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Emitted::Table(_) => None,
            Emitted::File(path) => Some(path),
        }
    }
}

/// Comma-separated file with a `COLUMNS` header, written even for empty tables.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TableSink for CsvSink {
    fn write<R: TableRow>(&self, table: &ListingTable<R>) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        writer.write_record(COLUMNS)?;
        for row in table {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Sends `table` to `output`, returning the table itself or the written path.
pub fn emit<R: TableRow>(table: ListingTable<R>, output: &Output) -> Result<Emitted<R>> {
    let path = match output {
        Output::Table => return Ok(Emitted::Table(table)),
        Output::Csv(path) => {
            CsvSink::new(path).write(&table)?;
            path
        }
        Output::Xlsx(path) => {
            XlsxSink::new(path).write(&table)?;
            path
        }
        Output::Sqlite(path) => {
            SqliteSink::new(Database::new(path)).write(&table)?;
            path
        }
    };

    info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(Emitted::File(path.clone()))
}
