//! Domain model for persisted photo journal entries.
//!
//! # Responsibility
//! - Define the canonical record describing one captured photo.
//! - Enforce entry-level invariants before anything reaches storage.
//!
//! # Invariants
//! - Every entry is identified by its permanent file `uri`.
//! - Coordinates are an optional enrichment; their absence is permanent.

pub mod entry;
