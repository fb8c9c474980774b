//! Database connection and schema management

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use rusqlite::{Connection, OpenFlags};

use crate::error::NbaError;
use crate::Result;

/// Connection to the NBA SQLite file (the downloaded dataset and/or loader tables)
pub struct NbaDatabase {
    pub(crate) conn: Connection,
}

/// Reject anything but `[A-Za-z_][A-Za-z0-9_]*` before it is spliced into SQL.
pub fn validate_identifier(name: &str) -> Result<&str> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(name)
    } else {
        Err(NbaError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}

impl NbaDatabase {
    /// Open (or create) the database file and ensure bookkeeping tables exist
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)
            .with_context(|| format!("opening SQLite database {}", path.display()))?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Open a database that must already exist, read-only.
    ///
    /// Analyses never create the file or the loader bookkeeping tables.
    pub fn open_existing(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(NbaError::MissingDatabase {
                path: path.display().to_string(),
            });
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("opening SQLite database {} read-only", path.display()))?;
        Ok(Self { conn })
    }

    /// In-memory database, used by tests and dry runs
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Create the loader bookkeeping table
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS fetch_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                endpoint TEXT NOT NULL,
                params TEXT NOT NULL,
                row_count INTEGER NOT NULL,
                fetched_at INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_fetch_log_endpoint
             ON fetch_log(endpoint, fetched_at)",
            [],
        )?;

        Ok(())
    }

    /// Raw SQL access for setup scripts and tests
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    pub fn table_exists(&self, table: &str) -> Result<bool> {
        table_exists_on(&self.conn, table)
    }

    /// Lower-cased column names of an existing table
    pub fn table_columns(&self, table: &str) -> Result<HashSet<String>> {
        table_columns_on(&self.conn, table)
    }

    /// Row count, or `None` when the table does not exist
    pub fn table_row_count(&self, table: &str) -> Result<Option<u64>> {
        let table = validate_identifier(table)?;
        if !self.table_exists(table)? {
            return Ok(None);
        }
        let count: i64 =
            self.conn
                .query_row(&format!("SELECT COUNT(*) FROM \"{table}\""), [], |row| {
                    row.get(0)
                })?;
        Ok(Some(count as u64))
    }

    /// Create `table` if missing, or add any of `columns` it lacks.
    ///
    /// `columns` pairs a column name with its declared type (may be empty).
    /// `key` becomes the composite primary key of a newly created table.
    pub fn ensure_table(
        &self,
        table: &str,
        columns: &[(String, &str)],
        key: &[&str],
    ) -> Result<()> {
        ensure_table_on(&self.conn, table, columns, key)
    }

    pub fn drop_table(&self, table: &str) -> Result<()> {
        drop_table_on(&self.conn, table)
    }
}

// The helpers below take a plain `Connection` so loader writes can run them
// inside a `Transaction`.

fn table_exists_on(conn: &Connection, table: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn table_columns_on(conn: &Connection, table: &str) -> Result<HashSet<String>> {
    let table = validate_identifier(table)?;
    let mut stmt = conn.prepare(&format!("SELECT name FROM pragma_table_info('{table}')"))?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut columns = HashSet::new();
    for row in rows {
        columns.insert(row?.to_lowercase());
    }
    Ok(columns)
}

pub(crate) fn ensure_table_on(
    conn: &Connection,
    table: &str,
    columns: &[(String, &str)],
    key: &[&str],
) -> Result<()> {
    let table = validate_identifier(table)?;
    for (name, _) in columns {
        validate_identifier(name)?;
    }
    for name in key {
        validate_identifier(name)?;
    }

    if !table_exists_on(conn, table)? {
        let mut defs: Vec<String> = columns
            .iter()
            .map(|(name, decl)| format!("\"{name}\" {decl}").trim_end().to_string())
            .collect();
        if !key.is_empty() {
            let key_cols: Vec<String> = key.iter().map(|k| format!("\"{k}\"")).collect();
            defs.push(format!("PRIMARY KEY ({})", key_cols.join(", ")));
        }
        conn.execute(
            &format!("CREATE TABLE \"{table}\" ({})", defs.join(", ")),
            [],
        )?;
        return Ok(());
    }

    let existing = table_columns_on(conn, table)?;
    for (name, decl) in columns {
        if !existing.contains(&name.to_lowercase()) {
            tracing::info!(table, column = %name, "adding column to existing table");
            conn.execute(
                format!("ALTER TABLE \"{table}\" ADD COLUMN \"{name}\" {decl}").trim_end(),
                [],
            )?;
        }
    }
    Ok(())
}

pub(crate) fn drop_table_on(conn: &Connection, table: &str) -> Result<()> {
    let table = validate_identifier(table)?;
    conn.execute(&format!("DROP TABLE IF EXISTS \"{table}\""), [])?;
    Ok(())
}
