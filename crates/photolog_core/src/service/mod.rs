//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate capture, position, file and record-store collaborators
//!   into the journal create/delete sequences.
//! - Keep UI layers decoupled from storage and filesystem details.

pub mod journal_service;
