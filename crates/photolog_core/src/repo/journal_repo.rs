//! Journal record store contracts and blob-backed implementation.
//!
//! # Responsibility
//! - Persist the ordered entry collection as one serialized blob under a
//!   single key.
//! - Own marshalling/unmarshalling and enforce entry invariants.
//!
//! # Invariants
//! - `replace` writes the full collection or nothing; readers observe the
//!   old collection or the new one, never an interleaving.
//! - `load` never fails on blob content: absent or corrupt state yields an
//!   empty collection, and the corrupt blob is discarded by the next
//!   successful `replace`.

use crate::blob::{BlobError, BlobStore};
use crate::model::entry::{EntryValidationError, PhotoEntry};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key holding the serialized journal collection in the blob store.
pub const JOURNAL_BLOB_KEY: &str = "photolog:journal";

/// Version written into the persisted envelope. Bump on layout changes so
/// future readers can migrate instead of guessing.
pub const JOURNAL_SCHEMA_VERSION: u32 = 1;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for journal store persistence operations.
#[derive(Debug)]
pub enum StoreError {
    Validation(EntryValidationError),
    /// Two entries referenced the same permanent file.
    DuplicateUri(String),
    Blob(BlobError),
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateUri(uri) => {
                write!(f, "duplicate entry uri in collection: {uri}")
            }
            Self::Blob(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize journal: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateUri(_) => None,
            Self::Blob(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<EntryValidationError> for StoreError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<BlobError> for StoreError {
    fn from(value: BlobError) -> Self {
        Self::Blob(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Record store interface: single source of truth for the ordered
/// journal collection.
pub trait JournalStore {
    /// Loads the persisted collection.
    ///
    /// Absent or corrupt state yields an empty collection; only blob
    /// transport failures propagate.
    fn load(&self) -> StoreResult<Vec<PhotoEntry>>;

    /// Atomically overwrites the persisted collection.
    ///
    /// Validates every entry and the unique-uri invariant before writing.
    fn replace(&self, entries: &[PhotoEntry]) -> StoreResult<()>;
}

impl<S: JournalStore + ?Sized> JournalStore for &S {
    fn load(&self) -> StoreResult<Vec<PhotoEntry>> {
        (**self).load()
    }

    fn replace(&self, entries: &[PhotoEntry]) -> StoreResult<()> {
        (**self).replace(entries)
    }
}

/// Versioned on-disk envelope wrapping the entry array.
#[derive(Debug, Serialize, Deserialize)]
struct JournalEnvelope {
    schema_version: u32,
    entries: Vec<PhotoEntry>,
}

/// Blob-backed journal store.
pub struct BlobJournalStore<B: BlobStore> {
    blobs: B,
    key: String,
}

impl<B: BlobStore> BlobJournalStore<B> {
    /// Creates a store over the default journal key.
    pub fn new(blobs: B) -> Self {
        Self::with_key(blobs, JOURNAL_BLOB_KEY)
    }

    /// Creates a store over a caller-provided key. Used by tests that need
    /// isolated collections in one backing store.
    pub fn with_key(blobs: B, key: impl Into<String>) -> Self {
        Self {
            blobs,
            key: key.into(),
        }
    }
}

impl<B: BlobStore> JournalStore for BlobJournalStore<B> {
    fn load(&self) -> StoreResult<Vec<PhotoEntry>> {
        let Some(raw) = self.blobs.get(&self.key)? else {
            info!("event=journal_load module=repo status=ok entries=0 source=absent");
            return Ok(Vec::new());
        };

        let envelope: JournalEnvelope = match serde_json::from_slice(&raw) {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(
                    "event=journal_load module=repo status=recovered error_code=corrupt_blob error={err}"
                );
                return Ok(Vec::new());
            }
        };

        if envelope.schema_version != JOURNAL_SCHEMA_VERSION {
            warn!(
                "event=journal_load module=repo status=recovered error_code=unknown_schema_version version={}",
                envelope.schema_version
            );
            return Ok(Vec::new());
        }

        if let Err(err) = check_collection(&envelope.entries) {
            warn!(
                "event=journal_load module=repo status=recovered error_code=invalid_entries error={err}"
            );
            return Ok(Vec::new());
        }

        info!(
            "event=journal_load module=repo status=ok entries={}",
            envelope.entries.len()
        );
        Ok(envelope.entries)
    }

    fn replace(&self, entries: &[PhotoEntry]) -> StoreResult<()> {
        check_collection(entries)?;

        let envelope = JournalEnvelope {
            schema_version: JOURNAL_SCHEMA_VERSION,
            entries: entries.to_vec(),
        };
        let raw = serde_json::to_vec(&envelope)?;
        self.blobs.set(&self.key, &raw)?;

        info!(
            "event=journal_replace module=repo status=ok entries={}",
            entries.len()
        );
        Ok(())
    }
}

fn check_collection(entries: &[PhotoEntry]) -> StoreResult<()> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        entry.validate()?;
        if !seen.insert(entry.uri.as_str()) {
            return Err(StoreError::DuplicateUri(entry.uri.clone()));
        }
    }
    Ok(())
}
