//! Loader writes and lookups

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, params_from_iter};
use tracing::{debug, info};

use super::{
    models::*,
    schema::{drop_table_on, ensure_table_on, validate_identifier, NbaDatabase},
    values::{declared_type, json_to_sql, sql_to_text},
};
use crate::{nba::ResultSet, Result};

impl NbaDatabase {
    /// Store a result set in `<category>_<name>` in one transaction.
    ///
    /// Returns the number of rows written; empty sets are skipped.
    pub fn save_result_set(
        &mut self,
        table: &LoaderTable,
        set: &ResultSet,
        mode: WriteMode,
    ) -> Result<usize> {
        let table_name = table.table_name();
        validate_identifier(&table_name)?;

        if set.is_empty() {
            info!(table = %table_name, "result set is empty, nothing stored");
            return Ok(0);
        }

        let columns: Vec<(String, &str)> = set
            .headers
            .iter()
            .map(|h| {
                let values = set.column_values(h).into_iter().flatten();
                (h.clone(), declared_type(values))
            })
            .collect();

        // A key is only usable when the response carries every key column.
        let key: &[&str] = if table
            .key
            .iter()
            .all(|k| set.column_index(k).is_some())
        {
            table.key
        } else {
            debug!(table = %table_name, "response lacks key columns, storing without key");
            &[]
        };

        let column_list: Vec<String> = set.headers.iter().map(|h| format!("\"{h}\"")).collect();
        let placeholders = vec!["?"; set.headers.len()].join(", ");
        let verb = if key.is_empty() {
            "INSERT"
        } else {
            "INSERT OR REPLACE"
        };
        let sql = format!(
            "{verb} INTO \"{table_name}\" ({}) VALUES ({placeholders})",
            column_list.join(", ")
        );

        // Drop, create and insert commit or roll back together.
        let tx = self.conn.transaction()?;
        if mode == WriteMode::Replace {
            drop_table_on(&tx, &table_name)?;
        }
        ensure_table_on(&tx, &table_name, &columns, key)?;
        {
            let mut stmt = tx.prepare(&sql)?;
            for row in &set.rows {
                let values = (0..set.headers.len())
                    .map(|i| row.get(i).map(json_to_sql).unwrap_or(rusqlite::types::Value::Null));
                stmt.execute(params_from_iter(values))?;
            }
        }
        tx.commit()?;

        info!(table = %table_name, rows = set.len(), "stored result set");
        Ok(set.len())
    }

    /// Distinct values of `column` in `table`, as text.
    ///
    /// Empty when the table does not exist yet.
    pub fn existing_ids(&self, table: &str, column: &str) -> Result<HashSet<String>> {
        let table = validate_identifier(table)?;
        let column = validate_identifier(column)?;
        if !self.table_exists(table)?
            || !self.table_columns(table)?.contains(&column.to_lowercase())
        {
            return Ok(HashSet::new());
        }

        let mut stmt = self
            .conn
            .prepare(&format!("SELECT DISTINCT \"{column}\" FROM \"{table}\""))?;
        let rows = stmt.query_map([], |row| row.get::<_, rusqlite::types::Value>(0))?;

        let mut ids = HashSet::new();
        for row in rows {
            if let Some(id) = sql_to_text(&row?) {
                ids.insert(id);
            }
        }
        Ok(ids)
    }

    /// Record a successful download in `fetch_log`
    pub fn record_fetch(&mut self, endpoint: &str, params: &str, row_count: usize) -> Result<()> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        self.conn.execute(
            "INSERT INTO fetch_log (endpoint, params, row_count, fetched_at)
             VALUES (?, ?, ?, ?)",
            params![endpoint, params, row_count as i64, now as i64],
        )?;
        Ok(())
    }

    /// Most recent downloads first
    pub fn recent_fetches(&self, limit: u32) -> Result<Vec<FetchRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT endpoint, params, row_count, fetched_at
             FROM fetch_log
             ORDER BY fetched_at DESC, id DESC
             LIMIT ?",
        )?;

        let rows = stmt.query_map(params![limit], |row| {
            Ok(FetchRecord {
                endpoint: row.get(0)?,
                params: row.get(1)?,
                row_count: row.get::<_, i64>(2)? as u64,
                fetched_at: row.get::<_, i64>(3)? as u64,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}
