//! Photo entry domain model.
//!
//! # Responsibility
//! - Define the persisted record for one captured photo.
//! - Validate entry invariants before persistence.
//!
//! # Invariants
//! - `uri` is the stable reference to the adopted file and is unique
//!   within a journal collection.
//! - `latitude`/`longitude` are both present or both absent; absence is a
//!   valid, permanent state and is never retried later.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Canonical record for one captured photo.
///
/// Wire names (`uri`, `ts`, `lat`, `lon`) match the persisted journal
/// format; coordinate fields are omitted entirely when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoEntry {
    /// Stable reference to the permanent file location. Unique key within
    /// the journal collection.
    pub uri: String,
    /// Capture instant in Unix epoch milliseconds. Default sort key.
    #[serde(rename = "ts")]
    pub timestamp_ms: i64,
    /// Present only when a position fix was obtained before commit.
    #[serde(rename = "lat", skip_serializing_if = "Option::is_none", default)]
    pub latitude: Option<f64>,
    /// Present only when a position fix was obtained before commit.
    #[serde(rename = "lon", skip_serializing_if = "Option::is_none", default)]
    pub longitude: Option<f64>,
}

/// Validation failure for a single photo entry.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValidationError {
    EmptyUri,
    NonPositiveTimestamp(i64),
    /// One coordinate set without the other.
    PartialCoordinates,
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUri => write!(f, "entry uri must not be empty"),
            Self::NonPositiveTimestamp(value) => {
                write!(f, "entry timestamp must be positive, got {value}")
            }
            Self::PartialCoordinates => {
                write!(f, "latitude and longitude must be both present or both absent")
            }
            Self::LatitudeOutOfRange(value) => {
                write!(f, "latitude {value} outside [-90, 90]")
            }
            Self::LongitudeOutOfRange(value) => {
                write!(f, "longitude {value} outside [-180, 180]")
            }
        }
    }
}

impl Error for EntryValidationError {}

impl PhotoEntry {
    /// Creates an entry without a position fix.
    pub fn new(uri: impl Into<String>, timestamp_ms: i64) -> Self {
        Self {
            uri: uri.into(),
            timestamp_ms,
            latitude: None,
            longitude: None,
        }
    }

    /// Creates an entry carrying a resolved position.
    pub fn with_position(
        uri: impl Into<String>,
        timestamp_ms: i64,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            uri: uri.into(),
            timestamp_ms,
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// Returns whether this entry carries a position fix.
    pub fn has_position(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// Checks entry invariants.
    ///
    /// # Errors
    /// - Empty `uri` or non-positive timestamp.
    /// - One coordinate present without the other.
    /// - Coordinates outside the valid geographic range.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.uri.trim().is_empty() {
            return Err(EntryValidationError::EmptyUri);
        }
        if self.timestamp_ms <= 0 {
            return Err(EntryValidationError::NonPositiveTimestamp(
                self.timestamp_ms,
            ));
        }
        match (self.latitude, self.longitude) {
            (None, None) => {}
            (Some(lat), Some(lon)) => {
                if !(-90.0..=90.0).contains(&lat) {
                    return Err(EntryValidationError::LatitudeOutOfRange(lat));
                }
                if !(-180.0..=180.0).contains(&lon) {
                    return Err(EntryValidationError::LongitudeOutOfRange(lon));
                }
            }
            _ => return Err(EntryValidationError::PartialCoordinates),
        }
        Ok(())
    }
}
