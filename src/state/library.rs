use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};

use super::catalog::KeyValueStore;
use crate::error::Result;

/// The Library is the desktop stand-in for the browser's `localStorage`:
/// a single SQLite table of string keys and string values.
pub struct Library {
    conn: Connection,
    db_path: PathBuf,
}

impl Library {
    /// Open (or create) the library in the user's data directory:
    /// - Linux: ~/.local/share/portfolio-images/portfolio.db
    /// - macOS: ~/Library/Application Support/portfolio-images/portfolio.db
    /// - Windows: %APPDATA%\portfolio-images\portfolio.db
    pub fn new() -> Result<Self> {
        let db_path = Self::get_db_path()?;
        Self::open(&db_path)
    }

    /// Open a library at an explicit path
    pub fn open(db_path: &Path) -> Result<Self> {
        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;

        tracing::info!("📁 Library opened at: {}", db_path.display());

        let library = Library {
            conn,
            db_path: db_path.to_path_buf(),
        };
        library.init_schema()?;

        Ok(library)
    }

    /// Get the path where the database should be stored
    fn get_db_path() -> Result<PathBuf> {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| crate::error::PortfolioError::Storage("could not determine user data directory".into()))?;

        path.push("portfolio-images");
        path.push("portfolio.db");
        Ok(path)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key     TEXT PRIMARY KEY,
                value   TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Get the path to the database file
    pub fn path(&self) -> &PathBuf {
        &self.db_path
    }
}

impl KeyValueStore for Library {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("db_path", &self.db_path)
            .finish()
    }
}
