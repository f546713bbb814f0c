//! Capture provider contract.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Transient file handle produced by a capture.
///
/// The file remains owned by the capture provider until the lifecycle
/// service copies it into permanent storage; the core never deletes a
/// file it did not adopt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFile {
    pub path: PathBuf,
}

impl CapturedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Capture failure. Always fatal to the create sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    PermissionDenied,
    Failed(String),
}

impl Display for CaptureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "camera permission denied"),
            Self::Failed(reason) => write!(f, "capture failed: {reason}"),
        }
    }
}

impl Error for CaptureError {}

/// External camera collaborator.
pub trait CaptureProvider {
    /// Takes a picture and returns a transient file handle.
    fn capture(&self) -> Result<CapturedFile, CaptureError>;
}
