//! Identity types for dealflow records

use chrono::{DateTime, Utc};

/// Record identifier assigned by the record store.
/// Stable integers, never reused within an entity table.
pub type RecordId = i64;

/// Stage identifier, e.g. `"cold-lead"`. Stage membership is stored
/// per-deal and matched against the stage set by string equality.
pub type StageId = String;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;
