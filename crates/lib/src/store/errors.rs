//! Error types for store operations.

use thiserror::Error;

/// Errors raised by the collection stores.
///
/// Missing keys are not errors: lookups return `Ok(None)`.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// A value could not be encoded for the log
    #[error("Serialization failed in store '{store}': {reason}")]
    SerializationFailed { store: String, reason: String },

    /// A logged value could not be decoded into the store's item type
    #[error("Deserialization failed in store '{store}': {reason}")]
    DeserializationFailed { store: String, reason: String },

    /// A position was NaN or infinite
    #[error("Invalid position {position} for key '{key}' in store '{store}': positions must be finite")]
    InvalidPosition {
        store: String,
        key: String,
        position: f64,
    },

    /// No registered store type has this identifier
    #[error("Unknown store type '{type_id}'")]
    UnknownType { type_id: String },
}

impl StoreError {
    /// Check if this error is related to serialization
    pub fn is_serialization_error(&self) -> bool {
        matches!(
            self,
            StoreError::SerializationFailed { .. } | StoreError::DeserializationFailed { .. }
        )
    }

    /// Check if this error rejected a non-finite position
    pub fn is_invalid_position(&self) -> bool {
        matches!(self, StoreError::InvalidPosition { .. })
    }

    /// Check if this error names an unregistered store type
    pub fn is_unknown_type(&self) -> bool {
        matches!(self, StoreError::UnknownType { .. })
    }

    /// Get the store name associated with this error
    pub fn store_name(&self) -> Option<&str> {
        match self {
            StoreError::SerializationFailed { store, .. }
            | StoreError::DeserializationFailed { store, .. }
            | StoreError::InvalidPosition { store, .. } => Some(store),
            StoreError::UnknownType { .. } => None,
        }
    }
}

impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
