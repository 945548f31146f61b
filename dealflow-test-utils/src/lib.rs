//! Dealflow Test Utilities
//!
//! Centralized test infrastructure for the workspace:
//! - Record fixtures with sensible defaults
//! - Proptest generators for deal collections
//! - `FailingStore` for exercising mutation-failure paths

// Re-export the in-memory store from its source crate
pub use dealflow_storage::InMemoryStore;

use async_trait::async_trait;
use chrono::Utc;
use dealflow_core::{
    Account, AccountDraft, AccountHealth, Contact, ContactDraft, CrmResult, Deal, DealDraft, Lead,
    LeadDraft, LeadSource, LeadStatus, Priority, RecordId, RecordKind, Stage, StoreError,
};
use dealflow_storage::RecordStore;
use proptest::prelude::*;

// ============================================================================
// FIXTURES
// ============================================================================

/// Build a stage.
pub fn stage(id: &str, name: &str, position: i32) -> Stage {
    Stage {
        id: id.to_string(),
        name: name.to_string(),
        position,
    }
}

/// The stage set used across the test suite.
pub fn default_stages() -> Vec<Stage> {
    vec![
        stage("cold-lead", "Cold Lead", 1),
        stage("hot-lead", "Hot Lead", 2),
        stage("estimate-sent", "Estimate Sent", 3),
        stage("deal-closed", "Deal Closed", 4),
    ]
}

/// Build a deal in the given stage.
pub fn deal(id: RecordId, stage: &str, value: f64) -> Deal {
    DealDraft {
        title: format!("Deal {}", id),
        value,
        stage: stage.to_string(),
        priority: Priority::Medium,
        contact_name: None,
        company: None,
        assigned_to: None,
    }
    .into_record(id, Utc::now())
}

/// Build a lead draft with a well-formed email derived from the name.
pub fn lead_draft(name: &str) -> LeadDraft {
    let slug = name.to_lowercase().replace(' ', ".");
    LeadDraft {
        name: name.to_string(),
        email: format!("{}@example.com", slug),
        phone: None,
        company: Some("TechFlow Solutions".to_string()),
        title: None,
        source: LeadSource::Website,
        status: LeadStatus::New,
        score: 50,
        estimated_value: 10_000.0,
        notes: None,
    }
}

/// Build a lead with the given status.
pub fn lead(id: RecordId, name: &str, status: LeadStatus) -> Lead {
    let mut draft = lead_draft(name);
    draft.status = status;
    draft.into_record(id, Utc::now())
}

/// Build a contact.
pub fn contact(id: RecordId, name: &str, email: &str) -> Contact {
    ContactDraft {
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        company: None,
        lead_source: None,
    }
    .into_record(id, Utc::now())
}

/// Build an account with the given health and revenue.
pub fn account(id: RecordId, name: &str, health: AccountHealth, revenue: f64) -> Account {
    AccountDraft {
        name: name.to_string(),
        industry: Some("Software".to_string()),
        website: None,
        location: None,
        account_type: Some("customer".to_string()),
        employees: 25,
        health,
        contact_count: 0,
        total_revenue: revenue,
        notes: None,
    }
    .into_record(id, Utc::now())
}

// ============================================================================
// GENERATORS
// ============================================================================

/// Stage-id pool used by the collection generator: the default stage set
/// plus one id that matches no stage.
pub const STAGE_POOL: [&str; 5] = [
    "cold-lead",
    "hot-lead",
    "estimate-sent",
    "deal-closed",
    "orphaned",
];

pub fn arb_priority() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::High),
        Just(Priority::Medium),
        Just(Priority::Low),
    ]
}

/// A deal collection with distinct ids, stages drawn from `STAGE_POOL`
/// (so some deals may reference no known stage), and bounded values.
pub fn arb_deal_collection(max_len: usize) -> impl Strategy<Value = Vec<Deal>> {
    proptest::collection::vec(
        (proptest::sample::select(STAGE_POOL.to_vec()), 0.0f64..100_000.0),
        0..max_len,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (stage, value))| deal(i as RecordId + 1, stage, value))
            .collect()
    })
}

// ============================================================================
// FAULT INJECTION
// ============================================================================

/// A store whose mutations always fail. Reads serve the seeded data, or
/// fail too when constructed with `new()`. Used to verify that failed
/// writes leave client state untouched and that no-op paths never reach
/// the store.
#[derive(Debug, Default)]
pub struct FailingStore {
    stages: Vec<Stage>,
    deals: Vec<Deal>,
    fail_reads: bool,
}

impl FailingStore {
    /// Everything fails, reads included.
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            deals: Vec::new(),
            fail_reads: true,
        }
    }

    /// Reads serve the given data; every mutation still fails.
    pub fn with_data(stages: Vec<Stage>, deals: Vec<Deal>) -> Self {
        Self {
            stages,
            deals,
            fail_reads: false,
        }
    }

    fn read_failure<T>(&self) -> CrmResult<T> {
        Err(StoreError::Transport {
            reason: "injected read failure".to_string(),
        }
        .into())
    }

    fn create_failure<T>(kind: RecordKind) -> CrmResult<T> {
        Err(StoreError::CreateFailed {
            kind,
            reason: "injected write failure".to_string(),
        }
        .into())
    }

    fn update_failure<T>(kind: RecordKind, id: RecordId) -> CrmResult<T> {
        Err(StoreError::UpdateFailed {
            kind,
            id,
            reason: "injected write failure".to_string(),
        }
        .into())
    }

    fn delete_failure<T>(kind: RecordKind, id: RecordId) -> CrmResult<T> {
        Err(StoreError::DeleteFailed {
            kind,
            id,
            reason: "injected write failure".to_string(),
        }
        .into())
    }
}

#[async_trait]
impl RecordStore for FailingStore {
    async fn deal_list(&self) -> CrmResult<Vec<Deal>> {
        if self.fail_reads {
            return self.read_failure();
        }
        Ok(self.deals.clone())
    }

    async fn deal_get(&self, id: RecordId) -> CrmResult<Option<Deal>> {
        if self.fail_reads {
            return self.read_failure();
        }
        Ok(self.deals.iter().find(|d| d.id == id).cloned())
    }

    async fn deal_create(&self, _draft: &DealDraft) -> CrmResult<Deal> {
        Self::create_failure(RecordKind::Deal)
    }

    async fn deal_update(&self, deal: &Deal) -> CrmResult<Deal> {
        Self::update_failure(RecordKind::Deal, deal.id)
    }

    async fn deal_delete(&self, id: RecordId) -> CrmResult<()> {
        Self::delete_failure(RecordKind::Deal, id)
    }

    async fn lead_list(&self) -> CrmResult<Vec<Lead>> {
        if self.fail_reads {
            return self.read_failure();
        }
        Ok(Vec::new())
    }

    async fn lead_get(&self, _id: RecordId) -> CrmResult<Option<Lead>> {
        if self.fail_reads {
            return self.read_failure();
        }
        Ok(None)
    }

    async fn lead_create(&self, _draft: &LeadDraft) -> CrmResult<Lead> {
        Self::create_failure(RecordKind::Lead)
    }

    async fn lead_update(&self, lead: &Lead) -> CrmResult<Lead> {
        Self::update_failure(RecordKind::Lead, lead.id)
    }

    async fn lead_delete(&self, id: RecordId) -> CrmResult<()> {
        Self::delete_failure(RecordKind::Lead, id)
    }

    async fn contact_list(&self) -> CrmResult<Vec<Contact>> {
        if self.fail_reads {
            return self.read_failure();
        }
        Ok(Vec::new())
    }

    async fn contact_get(&self, _id: RecordId) -> CrmResult<Option<Contact>> {
        if self.fail_reads {
            return self.read_failure();
        }
        Ok(None)
    }

    async fn contact_create(&self, _draft: &ContactDraft) -> CrmResult<Contact> {
        Self::create_failure(RecordKind::Contact)
    }

    async fn contact_update(&self, contact: &Contact) -> CrmResult<Contact> {
        Self::update_failure(RecordKind::Contact, contact.id)
    }

    async fn contact_delete(&self, id: RecordId) -> CrmResult<()> {
        Self::delete_failure(RecordKind::Contact, id)
    }

    async fn account_list(&self) -> CrmResult<Vec<Account>> {
        if self.fail_reads {
            return self.read_failure();
        }
        Ok(Vec::new())
    }

    async fn account_get(&self, _id: RecordId) -> CrmResult<Option<Account>> {
        if self.fail_reads {
            return self.read_failure();
        }
        Ok(None)
    }

    async fn account_create(&self, _draft: &AccountDraft) -> CrmResult<Account> {
        Self::create_failure(RecordKind::Account)
    }

    async fn account_update(&self, account: &Account) -> CrmResult<Account> {
        Self::update_failure(RecordKind::Account, account.id)
    }

    async fn account_delete(&self, id: RecordId) -> CrmResult<()> {
        Self::delete_failure(RecordKind::Account, id)
    }

    async fn stage_list(&self) -> CrmResult<Vec<Stage>> {
        if self.fail_reads {
            return self.read_failure();
        }
        let mut stages = self.stages.clone();
        stages.sort_by_key(|s| s.position);
        Ok(stages)
    }

    async fn stage_get(&self, id: &str) -> CrmResult<Option<Stage>> {
        if self.fail_reads {
            return self.read_failure();
        }
        Ok(self.stages.iter().find(|s| s.id == id).cloned())
    }

    async fn stage_create(&self, _stage: &Stage) -> CrmResult<Stage> {
        Self::create_failure(RecordKind::Stage)
    }

    async fn stage_update(&self, _stage: &Stage) -> CrmResult<Stage> {
        Self::update_failure(RecordKind::Stage, 0)
    }

    async fn stage_delete(&self, _id: &str) -> CrmResult<()> {
        Self::delete_failure(RecordKind::Stage, 0)
    }
}
