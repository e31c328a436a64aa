//! Persisted record of applied updates

use crate::error::Result;
use crate::types::LedgerEntry;
use rusqlite::{Connection, OpenFlags, params};
use std::collections::BTreeSet;
use std::path::Path;

/// Name of the ledger table
pub const TABLE: &str = "database_updates";

/// The ledger database: holds the `database_updates` table and is also the
/// database that update scripts run against.
pub struct Ledger {
    conn: Connection,
}

impl Ledger {
    /// Open or create the ledger database at the given path
    ///
    /// Creates the database file and the ledger table if they don't exist.
    pub fn open(db_path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        Self::with_connection(conn)
    }

    /// Open an existing ledger read-only, creating nothing.
    ///
    /// Returns `None` when the database file or the ledger table is missing.
    pub fn open_existing(db_path: &Path) -> Result<Option<Self>> {
        if !db_path.is_file() {
            return Ok(None);
        }

        let conn = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let tables: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [TABLE],
            |row| row.get(0),
        )?;
        if tables == 0 {
            return Ok(None);
        }

        Ok(Some(Self { conn }))
    }

    /// Wrap an already open connection, creating the ledger table if needed
    pub fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {TABLE} (
                id INTEGER PRIMARY KEY,
                "update" TEXT NOT NULL UNIQUE,
                applied_at TEXT NOT NULL
            );
            "#
        ))?;

        Ok(Self { conn })
    }

    /// Names of every update recorded as applied
    pub fn applied(&self) -> Result<BTreeSet<String>> {
        let mut stmt = self
            .conn
            .prepare(&format!(r#"SELECT "update" FROM {TABLE}"#))?;

        let names = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut result = BTreeSet::new();
        for name in names {
            result.insert(name?);
        }
        Ok(result)
    }

    /// All ledger entries in application order
    pub fn entries(&self) -> Result<Vec<LedgerEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"SELECT "update", applied_at FROM {TABLE} ORDER BY id"#
        ))?;

        let rows = stmt.query_map([], |row| {
            Ok(LedgerEntry {
                update: row.get(0)?,
                applied_at: row.get(1)?,
            })
        })?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    /// Execute an update script and record it, atomically.
    ///
    /// The script and the ledger insert share one transaction, so a failing
    /// script leaves neither its own changes nor a ledger entry behind.
    /// Scripts must not issue their own `BEGIN`/`COMMIT`.
    pub fn apply(&mut self, name: &str, sql: &str) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.execute(
            &format!(r#"INSERT INTO {TABLE} ("update", applied_at) VALUES (?1, ?2)"#),
            params![name, chrono::Utc::now().to_rfc3339()],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Borrow the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_table() {
        let tmp = TempDir::new().unwrap();
        let db_path = tmp.path().join("nested").join("database.sqlite");

        let ledger = Ledger::open(&db_path).unwrap();

        assert!(db_path.exists());
        assert!(ledger.applied().unwrap().is_empty());
    }

    #[test]
    fn test_open_existing_missing() {
        let tmp = TempDir::new().unwrap();
        let db_path = tmp.path().join("database.sqlite");

        assert!(Ledger::open_existing(&db_path).unwrap().is_none());
        assert!(!db_path.exists());
    }

    #[test]
    fn test_open_existing_leaves_foreign_database_untouched() {
        let tmp = TempDir::new().unwrap();
        let db_path = tmp.path().join("database.sqlite");
        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch("CREATE TABLE users (id INTEGER);").unwrap();
        drop(conn);

        assert!(Ledger::open_existing(&db_path).unwrap().is_none());

        let conn = Connection::open(&db_path).unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [TABLE],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 0);
    }

    #[test]
    fn test_open_existing_reads_ledger() {
        let tmp = TempDir::new().unwrap();
        let db_path = tmp.path().join("database.sqlite");
        let mut ledger = Ledger::open(&db_path).unwrap();
        ledger.apply("2024_01_01_000001_a", "").unwrap();
        drop(ledger);

        let ledger = Ledger::open_existing(&db_path).unwrap().unwrap();
        assert!(ledger.applied().unwrap().contains("2024_01_01_000001_a"));
        assert!(ledger.connection().execute_batch("CREATE TABLE b (id INTEGER);").is_err());
    }

    #[test]
    fn test_apply_records_entry() {
        let tmp = TempDir::new().unwrap();
        let db_path = tmp.path().join("database.sqlite");

        let mut ledger = Ledger::open(&db_path).unwrap();
        ledger
            .apply("2024_01_01_000001_a", "CREATE TABLE a (id INTEGER);")
            .unwrap();

        // Survives reopening
        drop(ledger);
        let ledger = Ledger::open(&db_path).unwrap();
        let entries = ledger.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].update, "2024_01_01_000001_a");
        assert!(!entries[0].applied_at.is_empty());
    }

    #[test]
    fn test_apply_failure_rolls_back() {
        let tmp = TempDir::new().unwrap();
        let mut ledger = Ledger::open(&tmp.path().join("database.sqlite")).unwrap();

        let result = ledger.apply(
            "2024_01_01_000001_a",
            "CREATE TABLE a (id INTEGER); INSERT INTO missing VALUES (1);",
        );
        assert!(result.is_err());

        assert!(ledger.applied().unwrap().is_empty());
        let tables: i64 = ledger
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'a'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 0);
    }

    #[test]
    fn test_same_update_cannot_be_recorded_twice() {
        let tmp = TempDir::new().unwrap();
        let mut ledger = Ledger::open(&tmp.path().join("database.sqlite")).unwrap();

        ledger.apply("2024_01_01_000001_a", "").unwrap();
        assert!(ledger.apply("2024_01_01_000001_a", "").is_err());
        assert_eq!(ledger.entries().unwrap().len(), 1);
    }
}
