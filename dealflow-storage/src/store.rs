//! The record-store CRUD contract.
//!
//! One async method set per entity type. `*_get` on a missing id is
//! `Ok(None)`, never an error; `*_update`/`*_delete` on a missing id fail
//! with `StoreError::NotFound`. Creation goes through draft structs and
//! returns the completed record with its store-assigned id; updates are
//! whole-record replacements.

use async_trait::async_trait;
use dealflow_core::{
    Account, AccountDraft, Contact, ContactDraft, CrmResult, Deal, DealDraft, Lead, LeadDraft,
    RecordId, Stage,
};

/// Async CRUD contract with the record-storage collaborator.
///
/// Implementations: `InMemoryStore` (this crate) and
/// `dealflow_client::RemoteStore` (REST).
#[async_trait]
pub trait RecordStore: Send + Sync {
    // === Deal Operations ===

    /// List all deals, unordered. The full collection is fetched and
    /// partitioned client-side; there is no pagination.
    async fn deal_list(&self) -> CrmResult<Vec<Deal>>;

    /// Get a deal by id.
    async fn deal_get(&self, id: RecordId) -> CrmResult<Option<Deal>>;

    /// Create a deal from a draft.
    async fn deal_create(&self, draft: &DealDraft) -> CrmResult<Deal>;

    /// Replace a deal record wholesale.
    async fn deal_update(&self, deal: &Deal) -> CrmResult<Deal>;

    /// Delete a deal.
    async fn deal_delete(&self, id: RecordId) -> CrmResult<()>;

    // === Lead Operations ===

    /// List all leads, unordered.
    async fn lead_list(&self) -> CrmResult<Vec<Lead>>;

    /// Get a lead by id.
    async fn lead_get(&self, id: RecordId) -> CrmResult<Option<Lead>>;

    /// Create a lead from a draft.
    async fn lead_create(&self, draft: &LeadDraft) -> CrmResult<Lead>;

    /// Replace a lead record wholesale.
    async fn lead_update(&self, lead: &Lead) -> CrmResult<Lead>;

    /// Delete a lead.
    async fn lead_delete(&self, id: RecordId) -> CrmResult<()>;

    // === Contact Operations ===

    /// List all contacts, unordered.
    async fn contact_list(&self) -> CrmResult<Vec<Contact>>;

    /// Get a contact by id.
    async fn contact_get(&self, id: RecordId) -> CrmResult<Option<Contact>>;

    /// Create a contact from a draft.
    async fn contact_create(&self, draft: &ContactDraft) -> CrmResult<Contact>;

    /// Replace a contact record wholesale.
    async fn contact_update(&self, contact: &Contact) -> CrmResult<Contact>;

    /// Delete a contact.
    async fn contact_delete(&self, id: RecordId) -> CrmResult<()>;

    // === Account Operations ===

    /// List all accounts, unordered.
    async fn account_list(&self) -> CrmResult<Vec<Account>>;

    /// Get an account by id.
    async fn account_get(&self, id: RecordId) -> CrmResult<Option<Account>>;

    /// Create an account from a draft.
    async fn account_create(&self, draft: &AccountDraft) -> CrmResult<Account>;

    /// Replace an account record wholesale.
    async fn account_update(&self, account: &Account) -> CrmResult<Account>;

    /// Delete an account.
    async fn account_delete(&self, id: RecordId) -> CrmResult<()>;

    // === Stage Operations ===

    /// List the stage set in ordinal order. Board logic treats stages as
    /// read-only; the mutation methods exist for the settings surface.
    async fn stage_list(&self) -> CrmResult<Vec<Stage>>;

    /// Get a stage by its string id.
    async fn stage_get(&self, id: &str) -> CrmResult<Option<Stage>>;

    /// Create a stage. Stage ids are caller-chosen slugs, so a duplicate
    /// id is a `CreateFailed`.
    async fn stage_create(&self, stage: &Stage) -> CrmResult<Stage>;

    /// Replace a stage record wholesale.
    async fn stage_update(&self, stage: &Stage) -> CrmResult<Stage>;

    /// Delete a stage. Deals referencing it are not reassigned; they
    /// simply stop matching any column.
    async fn stage_delete(&self, id: &str) -> CrmResult<()>;
}
