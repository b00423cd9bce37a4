use crate::db::connection::Database;
use crate::domain::{Cell, ListingTable, TableRow, COLUMNS};
use crate::errors::Result;
use crate::output::TableSink;
use chrono::Utc;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use tracing::debug;

fn create_table_sql<R: TableRow>() -> String {
    let columns: Vec<String> = COLUMNS
        .iter()
        .zip(R::SQL_TYPES.iter())
        .map(|(name, ty)| format!("{name} {ty}"))
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} (id INTEGER PRIMARY KEY, loaded_at TEXT NOT NULL, {})",
        R::TABLE_NAME,
        columns.join(", ")
    )
}

fn insert_sql<R: TableRow>() -> String {
    let placeholders: Vec<String> = (1..=COLUMNS.len() + 1).map(|i| format!("?{i}")).collect();
    format!(
        "INSERT INTO {} (loaded_at, {}) VALUES ({})",
        R::TABLE_NAME,
        COLUMNS.join(", "),
        placeholders.join(", ")
    )
}

fn to_sql_value(cell: Cell) -> Value {
    match cell {
        Cell::Empty => Value::Null,
        Cell::Text(text) => Value::Text(text),
        Cell::Number(n) => Value::Real(n),
        Cell::Integer(n) => Value::Integer(n),
    }
}

/// Appends every row of `table` to its SQLite table inside one transaction.
pub fn save_listings<R: TableRow>(db: &Database, table: &ListingTable<R>) -> Result<usize> {
    let loaded_at = Utc::now().naive_utc().format("%Y-%m-%d %H:%M:%S").to_string();

    db.with_conn(|conn: &mut Connection| {
        conn.execute(&create_table_sql::<R>(), [])?;

        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&insert_sql::<R>())?;
            for row in table {
                let values = std::iter::once(Value::Text(loaded_at.clone()))
                    .chain(row.cells().into_iter().map(to_sql_value));
                stmt.execute(params_from_iter(values))?;
            }
        }
        tx.commit()?;

        debug!("Saved {} rows into {}", table.len(), R::TABLE_NAME);
        Ok(table.len())
    })
}

pub fn count_rows(db: &Database, table_name: &str) -> Result<i64> {
    db.with_conn(|conn| {
        let count = conn.query_row(&format!("SELECT COUNT(*) FROM {table_name}"), [], |row| {
            row.get(0)
        })?;
        Ok(count)
    })
}

pub struct SqliteSink {
    db: Database,
}

impl SqliteSink {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl TableSink for SqliteSink {
    fn write<R: TableRow>(&self, table: &ListingTable<R>) -> Result<()> {
        save_listings(&self.db, table)?;
        Ok(())
    }
}
