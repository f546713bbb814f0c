//! Durable key-value blob storage.
//!
//! # Responsibility
//! - Define the minimal byte-level persistence contract the journal
//!   store is built on.
//! - Provide a SQLite-backed implementation for durable sessions and an
//!   in-memory implementation for tests and ephemeral use.
//!
//! # Invariants
//! - Each `set` is atomic per key; readers observe the old value or the
//!   new value, never a partial write.
//! - No cross-key transactions are offered or assumed.

use crate::db::{migrations::latest_version, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;

pub type BlobResult<T> = Result<T, BlobError>;

/// Transport error for blob persistence operations.
#[derive(Debug)]
pub enum BlobError {
    Db(DbError),
    /// Connection has not been migrated to the supported schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for BlobError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for BlobError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for BlobError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for BlobError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Byte-level persistence contract consumed by the journal store.
pub trait BlobStore {
    fn get(&self, key: &str) -> BlobResult<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> BlobResult<()>;
    fn remove(&self, key: &str) -> BlobResult<()>;
}

impl<B: BlobStore + ?Sized> BlobStore for &B {
    fn get(&self, key: &str) -> BlobResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> BlobResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> BlobResult<()> {
        (**self).remove(key)
    }
}

/// SQLite-backed blob store over a migrated connection.
pub struct SqliteBlobStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBlobStore<'conn> {
    /// Wraps a connection after verifying it is fully migrated.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not
    ///   match the latest migration version.
    /// - `MissingRequiredTable` when the `blobs` table is absent.
    pub fn try_new(conn: &'conn Connection) -> BlobResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(BlobError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master
                WHERE type = 'table' AND name = 'blobs'
            );",
            [],
            |row| row.get(0),
        )?;
        if table_exists != 1 {
            return Err(BlobError::MissingRequiredTable("blobs"));
        }

        Ok(Self { conn })
    }
}

impl BlobStore for SqliteBlobStore<'_> {
    fn get(&self, key: &str) -> BlobResult<Option<Vec<u8>>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM blobs WHERE key = ?1;",
                [key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &[u8]) -> BlobResult<()> {
        self.conn.execute(
            "INSERT INTO blobs (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> BlobResult<()> {
        self.conn
            .execute("DELETE FROM blobs WHERE key = ?1;", [key])?;
        Ok(())
    }
}

/// In-memory blob store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryBlobStore {
    values: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> BlobResult<Option<Vec<u8>>> {
        let values = self.values.lock().unwrap_or_else(|err| err.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> BlobResult<()> {
        let mut values = self.values.lock().unwrap_or_else(|err| err.into_inner());
        values.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> BlobResult<()> {
        let mut values = self.values.lock().unwrap_or_else(|err| err.into_inner());
        values.remove(key);
        Ok(())
    }
}
