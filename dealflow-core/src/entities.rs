//! Core entity records and their draft (pre-creation) forms.
//!
//! Records are created by the record store, which assigns the integer id
//! and stamps the timestamps; client code submits drafts. Mutations are
//! whole-record replacements, never partial patches.

use crate::{AccountHealth, LeadSource, LeadStatus, Priority, RecordId, StageId, Timestamp};
use serde::{Deserialize, Serialize};

/// Deal - a sales opportunity, always assigned to exactly one stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: RecordId,
    pub title: String,
    /// Monetary value in store currency units. Non-negative.
    pub value: f64,
    /// Current stage identifier. Must match a stage in the stage set to be
    /// visible on the board; an unmatched id drops the deal from every
    /// column without error.
    pub stage: StageId,
    pub priority: Priority,
    pub contact_name: Option<String>,
    pub company: Option<String>,
    pub assigned_to: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub last_activity: Timestamp,
    pub last_activity_kind: Option<String>,
}

impl Deal {
    /// Replacement record for a stage move: target stage plus refreshed
    /// activity and update timestamps. Everything else carries over.
    pub fn moved_to(&self, stage: StageId, now: Timestamp) -> Deal {
        Deal {
            stage,
            updated_at: now,
            last_activity: now,
            ..self.clone()
        }
    }

    /// Replacement record for a logged activity.
    pub fn logged_activity(&self, kind: impl Into<String>, now: Timestamp) -> Deal {
        Deal {
            last_activity: now,
            last_activity_kind: Some(kind.into()),
            updated_at: now,
            ..self.clone()
        }
    }
}

/// Fields supplied when creating a deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealDraft {
    pub title: String,
    pub value: f64,
    pub stage: StageId,
    pub priority: Priority,
    pub contact_name: Option<String>,
    pub company: Option<String>,
    pub assigned_to: Option<String>,
}

impl DealDraft {
    /// Complete the draft into a record. Called by store implementations
    /// once an id has been assigned.
    pub fn into_record(self, id: RecordId, now: Timestamp) -> Deal {
        Deal {
            id,
            title: self.title,
            value: self.value,
            stage: self.stage,
            priority: self.priority,
            contact_name: self.contact_name,
            company: self.company,
            assigned_to: self.assigned_to,
            created_at: now,
            updated_at: now,
            last_activity: now,
            last_activity_kind: Some("Created".to_string()),
        }
    }
}

/// Stage - a named, ordered bucket in the sales process.
/// Read-only from the board's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub id: StageId,
    pub name: String,
    /// Ordinal position; defines left-to-right column order.
    pub position: i32,
}

/// Lead - an unconverted prospect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub source: LeadSource,
    pub status: LeadStatus,
    /// Qualification score, 0-100.
    pub score: i32,
    pub estimated_value: f64,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Lead {
    /// Replacement record for a status transition.
    pub fn with_status(&self, status: LeadStatus, now: Timestamp) -> Lead {
        Lead {
            status,
            updated_at: now,
            ..self.clone()
        }
    }
}

/// Fields supplied when creating a lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub source: LeadSource,
    pub status: LeadStatus,
    pub score: i32,
    pub estimated_value: f64,
    pub notes: Option<String>,
}

impl LeadDraft {
    pub fn into_record(self, id: RecordId, now: Timestamp) -> Lead {
        Lead {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            title: self.title,
            source: self.source,
            status: self.status,
            score: self.score,
            estimated_value: self.estimated_value,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Contact - a converted or directly entered person record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    /// Source channel carried over from lead conversion, if any.
    pub lead_source: Option<LeadSource>,
    pub created_at: Timestamp,
}

/// Fields supplied when creating a contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub lead_source: Option<LeadSource>,
}

impl ContactDraft {
    pub fn into_record(self, id: RecordId, now: Timestamp) -> Contact {
        Contact {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            lead_source: self.lead_source,
            created_at: now,
        }
    }

    /// Draft built from a lead being converted. Conversion carries the
    /// identity fields and remembers the acquisition channel.
    pub fn from_lead(lead: &Lead) -> ContactDraft {
        ContactDraft {
            name: lead.name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            company: lead.company.clone(),
            lead_source: Some(lead.source),
        }
    }
}

/// Account - a company relationship record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: RecordId,
    pub name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    /// Relationship type, pass-through (e.g. "customer", "prospect").
    pub account_type: Option<String>,
    pub employees: i32,
    pub health: AccountHealth,
    pub contact_count: i32,
    pub total_revenue: f64,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// Fields supplied when creating an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountDraft {
    pub name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub account_type: Option<String>,
    pub employees: i32,
    pub health: AccountHealth,
    pub contact_count: i32,
    pub total_revenue: f64,
    pub notes: Option<String>,
}

impl AccountDraft {
    pub fn into_record(self, id: RecordId, now: Timestamp) -> Account {
        Account {
            id,
            name: self.name,
            industry: self.industry,
            website: self.website,
            location: self.location,
            account_type: self.account_type,
            employees: self.employees,
            health: self.health,
            contact_count: self.contact_count,
            total_revenue: self.total_revenue,
            notes: self.notes,
            created_at: now,
        }
    }
}
