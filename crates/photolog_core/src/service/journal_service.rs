//! Entry lifecycle service.
//!
//! # Responsibility
//! - Sequence the side-effecting steps of photo capture and deletion so
//!   the record store and filesystem converge even when a step fails.
//! - Serialize every load-mutate-replace so overlapping mutations queue
//!   instead of silently losing updates.
//!
//! # Invariants
//! - An entry is committed only after its file is durably adopted; it is
//!   removed only after best-effort removal of that file.
//! - The in-memory snapshot and the persisted collection are identical
//!   after every operation that reports success; persistence failures
//!   roll the snapshot back before being surfaced.
//! - A failed position fix never fails a create; a failed file removal
//!   never fails a delete.

use crate::model::entry::PhotoEntry;
use crate::provider::capture::{CaptureError, CaptureProvider};
use crate::provider::files::FileStore;
use crate::provider::position::PositionProvider;
use crate::repo::journal_repo::{JournalStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Bounded wait applied to position resolution during create.
pub const DEFAULT_POSITION_TIMEOUT: Duration = Duration::from_secs(10);

pub type JournalResult<T> = Result<T, JournalError>;

/// Error surface of the lifecycle operations.
///
/// Only consistency-threatening failures appear here; enrichment and
/// orphan-tolerant failures are absorbed with a log line.
#[derive(Debug)]
pub enum JournalError {
    /// Camera collaborator failed; nothing was mutated.
    Capture(CaptureError),
    /// Derived destination already holds a file. Precondition violation:
    /// captures are expected to be serialized by the caller.
    DestinationCollision(PathBuf),
    /// Copy into permanent storage failed; nothing was mutated and the
    /// transient file stays with its owner.
    Adoption {
        destination: PathBuf,
        source: io::Error,
    },
    /// Persisting the collection failed; the in-memory snapshot was
    /// rolled back to the pre-operation state.
    Store(StoreError),
}

impl Display for JournalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Capture(err) => write!(f, "{err}"),
            Self::DestinationCollision(path) => {
                write!(f, "destination already exists: {}", path.display())
            }
            Self::Adoption {
                destination,
                source,
            } => write!(
                f,
                "failed to adopt captured file into {}: {source}",
                destination.display()
            ),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for JournalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Capture(err) => Some(err),
            Self::DestinationCollision(_) => None,
            Self::Adoption { source, .. } => Some(source),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<CaptureError> for JournalError {
    fn from(value: CaptureError) -> Self {
        Self::Capture(value)
    }
}

impl From<StoreError> for JournalError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Lifecycle manager over the journal record store and its collaborators.
///
/// Owns the canonical in-memory snapshot; presentation layers read it via
/// [`JournalService::entries`] and mutate only through
/// [`JournalService::create_entry`] / [`JournalService::delete_entry`].
pub struct JournalService<S, C, P, F>
where
    S: JournalStore,
    C: CaptureProvider,
    P: PositionProvider,
    F: FileStore,
{
    store: S,
    capture: C,
    position: P,
    files: F,
    media_dir: PathBuf,
    position_timeout: Duration,
    // Serialization point for load-mutate-replace; also guards the
    // snapshot against torn reads.
    entries: Mutex<Vec<PhotoEntry>>,
}

impl<S, C, P, F> JournalService<S, C, P, F>
where
    S: JournalStore,
    C: CaptureProvider,
    P: PositionProvider,
    F: FileStore,
{
    /// Creates a service and seeds the snapshot from persisted state.
    ///
    /// # Errors
    /// - Propagates blob transport failures from the initial `load()`.
    pub fn new(
        store: S,
        capture: C,
        position: P,
        files: F,
        media_dir: impl Into<PathBuf>,
    ) -> JournalResult<Self> {
        let entries = store.load()?;
        info!(
            "event=journal_open module=service status=ok entries={}",
            entries.len()
        );
        Ok(Self {
            store,
            capture,
            position,
            files,
            media_dir: media_dir.into(),
            position_timeout: DEFAULT_POSITION_TIMEOUT,
            entries: Mutex::new(entries),
        })
    }

    /// Overrides the bounded wait for position resolution.
    pub fn with_position_timeout(mut self, timeout: Duration) -> Self {
        self.position_timeout = timeout;
        self
    }

    /// Returns a read-only snapshot of the collection, newest first.
    pub fn entries(&self) -> Vec<PhotoEntry> {
        self.lock_entries().clone()
    }

    /// Captures a photo, adopts its file and commits a new entry.
    ///
    /// Sequence: capture, derive destination, copy, bounded position fix
    /// (failure absorbed), prepend + persist. Success is reported only
    /// after the full collection is durably replaced.
    pub fn create_entry(&self) -> JournalResult<PhotoEntry> {
        let mut entries = self.lock_entries();

        let shot = self.capture.capture().inspect_err(|err| {
            warn!("event=journal_create module=service status=error error_code=capture_failed error={err}");
        })?;

        let (timestamp_ms, capture_nanos) = now_since_epoch();
        let destination = self.media_dir.join(format!("photo_{capture_nanos}.jpg"));
        if self.files.exists(&destination) {
            warn!(
                "event=journal_create module=service status=error error_code=destination_collision path={}",
                destination.display()
            );
            return Err(JournalError::DestinationCollision(destination));
        }

        self.files
            .copy(&shot.path, &destination)
            .map_err(|source| {
                warn!(
                    "event=journal_create module=service status=error error_code=adoption_failed path={} error={source}",
                    destination.display()
                );
                JournalError::Adoption {
                    destination: destination.clone(),
                    source,
                }
            })?;

        // Enrichment only: a user must never lose a photo to GPS failure.
        let position = match self.position.current_position(self.position_timeout) {
            Ok(fix) => Some(fix),
            Err(err) => {
                warn!(
                    "event=journal_create module=service status=degraded error_code=position_unavailable error={err}"
                );
                None
            }
        };

        let uri = destination.to_string_lossy().into_owned();
        let entry = match position {
            Some(fix) => {
                PhotoEntry::with_position(uri, timestamp_ms, fix.latitude, fix.longitude)
            }
            None => PhotoEntry::new(uri, timestamp_ms),
        };

        entries.insert(0, entry.clone());
        if let Err(err) = self.store.replace(&entries) {
            entries.remove(0);
            warn!(
                "event=journal_create module=service status=error error_code=persist_failed error={err}"
            );
            return Err(err.into());
        }

        info!(
            "event=journal_create module=service status=ok uri={} has_position={}",
            entry.uri,
            entry.has_position()
        );
        Ok(entry)
    }

    /// Removes the entry with the given `uri` and its underlying file.
    ///
    /// Returns `Ok(false)` when no such entry exists (idempotent no-op).
    /// File-removal failures are absorbed: a silent orphan file is
    /// preferred over a record pointing at an undeletable file.
    pub fn delete_entry(&self, uri: &str) -> JournalResult<bool> {
        let mut entries = self.lock_entries();

        let Some(index) = entries.iter().position(|entry| entry.uri == uri) else {
            info!("event=journal_delete module=service status=ok outcome=absent uri={uri}");
            return Ok(false);
        };

        if let Err(err) = self.files.remove(Path::new(uri)) {
            warn!(
                "event=journal_delete module=service status=degraded error_code=file_remove_failed uri={uri} error={err}"
            );
        }

        let removed = entries.remove(index);
        if let Err(err) = self.store.replace(&entries) {
            entries.insert(index, removed);
            warn!(
                "event=journal_delete module=service status=error error_code=persist_failed uri={uri} error={err}"
            );
            return Err(err.into());
        }

        info!("event=journal_delete module=service status=ok outcome=removed uri={uri}");
        Ok(true)
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, Vec<PhotoEntry>> {
        self.entries.lock().unwrap_or_else(|err| err.into_inner())
    }
}

fn now_since_epoch() -> (i64, u128) {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (elapsed.as_millis() as i64, elapsed.as_nanos())
}
