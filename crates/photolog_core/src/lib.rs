//! Core domain logic for the Photolog journal.
//! This crate is the single source of truth for journal invariants.

pub mod blob;
pub mod db;
pub mod logging;
pub mod model;
pub mod provider;
pub mod repo;
pub mod service;

pub use blob::{BlobError, BlobResult, BlobStore, MemoryBlobStore, SqliteBlobStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{EntryValidationError, PhotoEntry};
pub use provider::capture::{CaptureError, CapturedFile, CaptureProvider};
pub use provider::files::{FileStore, LocalFileStore};
pub use provider::position::{GeoPosition, PositionError, PositionProvider};
pub use repo::journal_repo::{
    BlobJournalStore, JournalStore, StoreError, StoreResult, JOURNAL_BLOB_KEY,
    JOURNAL_SCHEMA_VERSION,
};
pub use service::journal_service::{
    JournalError, JournalResult, JournalService, DEFAULT_POSITION_TIMEOUT,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
