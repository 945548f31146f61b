//! Dealflow Core - Record Types
//!
//! Pure data structures shared by every other crate: entity records, their
//! draft (pre-creation) forms, wire enums, the error taxonomy, draft
//! validation, and client-side list filters. No I/O lives here.

pub mod entities;
pub mod enums;
pub mod error;
pub mod filter;
pub mod identity;
pub mod validation;

pub use entities::{
    Account, AccountDraft, Contact, ContactDraft, Deal, DealDraft, Lead, LeadDraft, Stage,
};
pub use enums::{AccountHealth, LeadSource, LeadStatus, Priority, RecordKind};
pub use error::{CrmError, CrmResult, StoreError, ValidationError};
pub use filter::{AccountFilter, ContactFilter, LeadFilter};
pub use identity::{RecordId, StageId, Timestamp};
pub use validation::{
    validate_account_draft, validate_contact_draft, validate_deal_draft, validate_email,
    validate_lead_draft, validate_non_negative,
};
