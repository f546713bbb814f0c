//! Record store layer for the journal collection.
//!
//! # Responsibility
//! - Define the load/replace contract over the persisted journal blob.
//! - Keep serialization details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths must validate every entry and the unique-uri collection
//!   invariant before persistence.
//! - Corrupt persisted state is absorbed on load, never surfaced to
//!   callers as an error.

pub mod journal_repo;
