// src/tests/sink_tests.rs

use super::utils::raw_listing;
use crate::cleaning::clean_housing_data;
use crate::db::{count_rows, Database};
use crate::domain::{Listing, ListingTable, RawListing, COLUMNS};
use crate::output::{emit, Emitted, Output};
use std::fs;

fn raw_table() -> ListingTable<RawListing> {
    ListingTable::new(vec![
        raw_listing("1001", "$481,999", "12 N Main St"),
        raw_listing("1002", "$390,000", "40 W Center St"),
    ])
}

#[test]
fn csv_sink_writes_header_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("listings.csv");

    let emitted = emit(clean_housing_data(&raw_table()), &Output::Csv(path.clone())).unwrap();

    assert_eq!(emitted.path(), Some(path.as_path()));
    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], COLUMNS.join(","));
    assert!(lines[1].starts_with("1001,481999.0,12 N Main St,3.0,2.0,1500.0"));
}

#[test]
fn csv_sink_writes_header_for_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");

    emit(ListingTable::<Listing>::empty(), &Output::Csv(path.clone())).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap().trim_end(), COLUMNS.join(","));
}

#[test]
fn csv_output_reads_back_as_raw_listings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw.csv");

    emit(raw_table(), &Output::Csv(path.clone())).unwrap();
    let rows = crate::scraper::read_raw_listings(&path).unwrap();

    assert_eq!(rows, raw_table().into_rows());
}

#[test]
fn xlsx_sink_creates_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("listings.xlsx");

    let emitted = emit(clean_housing_data(&raw_table()), &Output::Xlsx(path.clone())).unwrap();

    assert!(matches!(emitted, Emitted::File(_)));
    assert!(fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn sqlite_sink_appends_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("listings.sqlite3");
    let output = Output::Sqlite(path.clone());

    emit(clean_housing_data(&raw_table()), &output).unwrap();
    emit(clean_housing_data(&raw_table()), &output).unwrap();
    emit(raw_table(), &output).unwrap();

    let db = Database::new(&path);
    assert_eq!(count_rows(&db, "listings").unwrap(), 4);
    assert_eq!(count_rows(&db, "raw_listings").unwrap(), 2);

    let price: f64 = db
        .with_conn(|conn| {
            Ok(conn.query_row(
                "SELECT price FROM listings WHERE mls_number = '1002' LIMIT 1",
                [],
                |row| row.get(0),
            )?)
        })
        .unwrap();
    assert_eq!(price, 390000.0);
}
