//! Error types for dealflow operations

use crate::{RecordId, RecordKind};
use thiserror::Error;

/// Record-store errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found: {kind:?} with id {id}")]
    NotFound { kind: RecordKind, id: RecordId },

    #[error("Create failed for {kind:?}: {reason}")]
    CreateFailed { kind: RecordKind, reason: String },

    #[error("Update failed for {kind:?} with id {id}: {reason}")]
    UpdateFailed {
        kind: RecordKind,
        id: RecordId,
        reason: String,
    },

    #[error("Delete failed for {kind:?} with id {id}: {reason}")]
    DeleteFailed {
        kind: RecordKind,
        id: RecordId,
        reason: String,
    },

    #[error("Transport error: {reason}")]
    Transport { reason: String },

    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Validation errors, raised before any request is sent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Invalid email address: {value}")]
    InvalidEmail { value: String },
}

/// Master error type for all dealflow errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CrmError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type alias for dealflow operations.
pub type CrmResult<T> = Result<T, CrmError>;

// =============================================================================
// TESTS
// =============================================================================
