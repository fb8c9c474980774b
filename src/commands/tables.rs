//! `tables` command: the dataset catalog, optionally checked against the database

use serde::Serialize;

use crate::{catalog::DatasetTable, config::ProjectPaths, storage::NbaDatabase, Result};

/// Presence of one dataset table in the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableStatus {
    pub table: DatasetTable,
    /// `None` when the table is absent
    pub rows: Option<u64>,
}

pub fn check_tables(db: &NbaDatabase) -> Result<Vec<TableStatus>> {
    DatasetTable::all()
        .iter()
        .map(|&table| {
            Ok(TableStatus {
                table,
                rows: db.table_row_count(table.name())?,
            })
        })
        .collect()
}

pub fn handle_tables(paths: &ProjectPaths, check: bool) -> Result<()> {
    if !check {
        for table in DatasetTable::all() {
            println!("{:<22} {}", table.name(), table.description());
        }
        return Ok(());
    }

    let db = super::common::open_database(paths)?;
    let statuses = check_tables(&db)?;
    let missing = statuses.iter().filter(|s| s.rows.is_none()).count();

    for status in &statuses {
        match status.rows {
            Some(rows) => println!("✓ {:<22} {rows} rows", status.table.name()),
            None => println!("✗ {:<22} missing", status.table.name()),
        }
    }
    println!(
        "{} of {} tables present",
        statuses.len() - missing,
        statuses.len()
    );
    Ok(())
}
