//! Position provider contract.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Resolved geographic position fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

/// Position resolution failure. Never fatal: entries proceed without
/// coordinates and the fix is not retried later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    PermissionDenied,
    Unavailable,
    Timeout,
}

impl Display for PositionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "location permission denied"),
            Self::Unavailable => write!(f, "no position fix available"),
            Self::Timeout => write!(f, "position resolution timed out"),
        }
    }
}

impl Error for PositionError {}

/// External GPS collaborator.
pub trait PositionProvider {
    /// Resolves the current position within the given bounded wait.
    fn current_position(&self, timeout: Duration) -> Result<GeoPosition, PositionError>;
}
