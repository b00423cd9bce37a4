use crate::domain::{Cell, ListingTable, TableRow, COLUMNS};
use crate::errors::Result;
use crate::output::TableSink;
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};

/// Builds a one-sheet workbook: a header row, then one row per listing.
/// Missing values are left as blank cells.
pub fn export_listings_xlsx<R: TableRow>(table: &ListingTable<R>, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("listings")?;

    // Headers
    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    // Rows
    for (i, listing) in table.iter().enumerate() {
        let r = (i + 1) as u32;

        for (col, cell) in listing.cells().into_iter().enumerate() {
            let c = col as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(text) => {
                    worksheet.write_string(r, c, &text)?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(r, c, n)?;
                }
                Cell::Integer(n) => {
                    worksheet.write_number(r, c, n as f64)?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

pub struct XlsxSink {
    path: PathBuf,
}

impl XlsxSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TableSink for XlsxSink {
    fn write<R: TableRow>(&self, table: &ListingTable<R>) -> Result<()> {
        export_listings_xlsx(table, &self.path)
    }
}
