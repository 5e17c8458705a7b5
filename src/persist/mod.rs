//! Saving and restoring tour progress.
//!
//! Progress is a small `{index, status}` record keyed by tour name. Stores
//! are plain key-value backends; what a record means is decided by the tour.

use crate::core::TourStatus;
use serde::{Deserialize, Serialize};

pub mod error;
mod store;

pub use error::PersistenceError;
pub use store::{JsonFileStore, MemoryStore, ProgressStore};

/// Persisted position of a tour.
///
/// `index` is `-1` for a tour that has not started.
///
/// # Example
///
/// ```rust
/// use tourguide::core::TourStatus;
/// use tourguide::persist::ProgressRecord;
///
/// let record = ProgressRecord::new(Some(2), TourStatus::Running);
/// assert_eq!(record.to_json().unwrap(), r#"{"index":2,"status":"Running"}"#);
/// assert_eq!(record.current_index(), Some(2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub index: i64,
    pub status: TourStatus,
}

impl ProgressRecord {
    pub fn new(index: Option<usize>, status: TourStatus) -> Self {
        Self {
            index: index.map_or(-1, |i| i as i64),
            status,
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        usize::try_from(self.index).ok()
    }

    /// Check the record against a tour with `len` steps.
    pub fn validate(&self, len: usize) -> Result<(), PersistenceError> {
        let index = self.current_index();
        let in_range = index.is_some_and(|i| i < len);
        let valid = match self.status {
            TourStatus::NotStarted => self.index == -1,
            TourStatus::Running | TourStatus::Paused => in_range,
            TourStatus::Finished | TourStatus::Stopped => self.index == -1 || in_range,
        };
        if valid {
            Ok(())
        } else {
            Err(PersistenceError::ValidationFailed(format!(
                "index {} is not valid for a {} tour with {} steps",
                self.index, self.status, len
            )))
        }
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string(self).map_err(|e| PersistenceError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        serde_json::from_str(json).map_err(|e| PersistenceError::DeserializationFailed(e.to_string()))
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistenceError> {
        bincode::serialize(self).map_err(|e| PersistenceError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistenceError> {
        bincode::deserialize(bytes)
            .map_err(|e| PersistenceError::DeserializationFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_started_record_uses_minus_one() {
        let record = ProgressRecord::new(None, TourStatus::NotStarted);
        assert_eq!(record.index, -1);
        assert_eq!(record.current_index(), None);
        assert!(record.validate(0).is_ok());
    }

    #[test]
    fn json_shape_is_index_and_status() {
        let record = ProgressRecord::from_json(r#"{"index":4,"status":"Paused"}"#).unwrap();
        assert_eq!(record, ProgressRecord::new(Some(4), TourStatus::Paused));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = ProgressRecord::from_json(r#"{"index":"two"}"#).unwrap_err();
        assert!(matches!(err, PersistenceError::DeserializationFailed(_)));
    }

    #[test]
    fn binary_encoding_restores_record() {
        let record = ProgressRecord::new(Some(1), TourStatus::Finished);
        let bytes = record.to_bytes().unwrap();
        assert_eq!(ProgressRecord::from_bytes(&bytes).unwrap(), record);
    }

    #[test]
    fn validate_checks_index_against_status() {
        assert!(ProgressRecord::new(Some(2), TourStatus::Running).validate(3).is_ok());
        assert!(ProgressRecord::new(Some(3), TourStatus::Running).validate(3).is_err());
        assert!(ProgressRecord::new(None, TourStatus::Paused).validate(3).is_err());
        assert!(ProgressRecord::new(None, TourStatus::Stopped).validate(3).is_ok());
        assert!(ProgressRecord::new(Some(0), TourStatus::NotStarted).validate(3).is_err());
    }
}
