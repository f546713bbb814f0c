//! Collaborator contracts consumed by the lifecycle service.
//!
//! # Responsibility
//! - Define the capture, position and file-store seams so the core stays
//!   independent of camera/GPS/filesystem specifics.
//!
//! # Invariants
//! - Capture failure is fatal to a create sequence.
//! - Position failure is an absorbed enrichment failure, never fatal.
//! - File removal is idempotent: an absent file satisfies the goal state.

pub mod capture;
pub mod files;
pub mod position;
