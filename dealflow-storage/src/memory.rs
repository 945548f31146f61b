//! In-memory record store for tests and offline use.

use crate::store::RecordStore;
use async_trait::async_trait;
use chrono::Utc;
use dealflow_core::{
    Account, AccountDraft, Contact, ContactDraft, CrmError, CrmResult, Deal, DealDraft, Lead,
    LeadDraft, RecordId, RecordKind, Stage, StageId, StoreError,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// One entity table: rows keyed by id plus the id allocator.
#[derive(Debug)]
struct Table<T> {
    rows: HashMap<RecordId, T>,
    next_id: RecordId,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn allocate(&mut self) -> RecordId {
        self.next_id += 1;
        self.next_id
    }

    fn seed(&mut self, id: RecordId, row: T) {
        self.next_id = self.next_id.max(id);
        self.rows.insert(id, row);
    }
}

/// In-memory implementation of `RecordStore`.
///
/// Integer ids are allocated monotonically per table and never reused,
/// even after deletes. Updates store the submitted record verbatim
/// (whole-record replacement, field pass-through). Lists come back in id
/// order, i.e. creation order, so collection order is stable across
/// fetches.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    deals: Arc<RwLock<Table<Deal>>>,
    leads: Arc<RwLock<Table<Lead>>>,
    contacts: Arc<RwLock<Table<Contact>>>,
    accounts: Arc<RwLock<Table<Account>>>,
    stages: Arc<RwLock<HashMap<StageId, Stage>>>,
}

fn poisoned<T>(_: T) -> CrmError {
    StoreError::LockPoisoned.into()
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a stage set.
    pub fn with_stages(stages: impl IntoIterator<Item = Stage>) -> Self {
        let store = Self::new();
        {
            let mut table = store.stages.write().unwrap();
            for stage in stages {
                table.insert(stage.id.clone(), stage);
            }
        }
        store
    }

    /// Insert a deal with an explicit id, bumping the allocator past it.
    /// Fixture helper; normal creation goes through `deal_create`.
    pub fn seed_deal(&self, deal: Deal) {
        self.deals.write().unwrap().seed(deal.id, deal);
    }

    /// Insert a lead with an explicit id. Fixture helper.
    pub fn seed_lead(&self, lead: Lead) {
        self.leads.write().unwrap().seed(lead.id, lead);
    }

    /// Insert a contact with an explicit id. Fixture helper.
    pub fn seed_contact(&self, contact: Contact) {
        self.contacts.write().unwrap().seed(contact.id, contact);
    }

    /// Insert an account with an explicit id. Fixture helper.
    pub fn seed_account(&self, account: Account) {
        self.accounts.write().unwrap().seed(account.id, account);
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        *self.deals.write().unwrap() = Table::default();
        *self.leads.write().unwrap() = Table::default();
        *self.contacts.write().unwrap() = Table::default();
        *self.accounts.write().unwrap() = Table::default();
        self.stages.write().unwrap().clear();
    }

    /// Count of stored deals.
    pub fn deal_count(&self) -> usize {
        self.deals.read().unwrap().rows.len()
    }

    /// Count of stored leads.
    pub fn lead_count(&self) -> usize {
        self.leads.read().unwrap().rows.len()
    }

    /// Count of stored contacts.
    pub fn contact_count(&self) -> usize {
        self.contacts.read().unwrap().rows.len()
    }

    /// Count of stored accounts.
    pub fn account_count(&self) -> usize {
        self.accounts.read().unwrap().rows.len()
    }

    // === Sync core, shared by the async trait impl and sync tests ===

    fn list<T: Clone>(table: &Arc<RwLock<Table<T>>>) -> CrmResult<Vec<T>> {
        let table = table.read().map_err(poisoned)?;
        Ok(table.rows.values().cloned().collect())
    }

    fn get<T: Clone>(table: &Arc<RwLock<Table<T>>>, id: RecordId) -> CrmResult<Option<T>> {
        let table = table.read().map_err(poisoned)?;
        Ok(table.rows.get(&id).cloned())
    }

    fn create<T: Clone>(
        table: &Arc<RwLock<Table<T>>>,
        build: impl FnOnce(RecordId) -> T,
    ) -> CrmResult<T> {
        let mut table = table.write().map_err(poisoned)?;
        let id = table.allocate();
        let row = build(id);
        table.rows.insert(id, row.clone());
        Ok(row)
    }

    fn replace<T: Clone>(
        table: &Arc<RwLock<Table<T>>>,
        kind: RecordKind,
        id: RecordId,
        row: &T,
    ) -> CrmResult<T> {
        let mut table = table.write().map_err(poisoned)?;
        if !table.rows.contains_key(&id) {
            return Err(StoreError::NotFound { kind, id }.into());
        }
        table.rows.insert(id, row.clone());
        Ok(row.clone())
    }

    fn remove<T>(table: &Arc<RwLock<Table<T>>>, kind: RecordKind, id: RecordId) -> CrmResult<()> {
        let mut table = table.write().map_err(poisoned)?;
        if table.rows.remove(&id).is_none() {
            return Err(StoreError::NotFound { kind, id }.into());
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    // === Deal Operations ===

    async fn deal_list(&self) -> CrmResult<Vec<Deal>> {
        let mut deals = Self::list(&self.deals)?;
        deals.sort_by_key(|d| d.id);
        Ok(deals)
    }

    async fn deal_get(&self, id: RecordId) -> CrmResult<Option<Deal>> {
        Self::get(&self.deals, id)
    }

    async fn deal_create(&self, draft: &DealDraft) -> CrmResult<Deal> {
        let now = Utc::now();
        Self::create(&self.deals, |id| draft.clone().into_record(id, now))
    }

    async fn deal_update(&self, deal: &Deal) -> CrmResult<Deal> {
        Self::replace(&self.deals, RecordKind::Deal, deal.id, deal)
    }

    async fn deal_delete(&self, id: RecordId) -> CrmResult<()> {
        Self::remove(&self.deals, RecordKind::Deal, id)
    }

    // === Lead Operations ===

    async fn lead_list(&self) -> CrmResult<Vec<Lead>> {
        let mut leads = Self::list(&self.leads)?;
        leads.sort_by_key(|l| l.id);
        Ok(leads)
    }

    async fn lead_get(&self, id: RecordId) -> CrmResult<Option<Lead>> {
        Self::get(&self.leads, id)
    }

    async fn lead_create(&self, draft: &LeadDraft) -> CrmResult<Lead> {
        let now = Utc::now();
        Self::create(&self.leads, |id| draft.clone().into_record(id, now))
    }

    async fn lead_update(&self, lead: &Lead) -> CrmResult<Lead> {
        Self::replace(&self.leads, RecordKind::Lead, lead.id, lead)
    }

    async fn lead_delete(&self, id: RecordId) -> CrmResult<()> {
        Self::remove(&self.leads, RecordKind::Lead, id)
    }

    // === Contact Operations ===

    async fn contact_list(&self) -> CrmResult<Vec<Contact>> {
        let mut contacts = Self::list(&self.contacts)?;
        contacts.sort_by_key(|c| c.id);
        Ok(contacts)
    }

    async fn contact_get(&self, id: RecordId) -> CrmResult<Option<Contact>> {
        Self::get(&self.contacts, id)
    }

    async fn contact_create(&self, draft: &ContactDraft) -> CrmResult<Contact> {
        let now = Utc::now();
        Self::create(&self.contacts, |id| draft.clone().into_record(id, now))
    }

    async fn contact_update(&self, contact: &Contact) -> CrmResult<Contact> {
        Self::replace(&self.contacts, RecordKind::Contact, contact.id, contact)
    }

    async fn contact_delete(&self, id: RecordId) -> CrmResult<()> {
        Self::remove(&self.contacts, RecordKind::Contact, id)
    }

    // === Account Operations ===

    async fn account_list(&self) -> CrmResult<Vec<Account>> {
        let mut accounts = Self::list(&self.accounts)?;
        accounts.sort_by_key(|a| a.id);
        Ok(accounts)
    }

    async fn account_get(&self, id: RecordId) -> CrmResult<Option<Account>> {
        Self::get(&self.accounts, id)
    }

    async fn account_create(&self, draft: &AccountDraft) -> CrmResult<Account> {
        let now = Utc::now();
        Self::create(&self.accounts, |id| draft.clone().into_record(id, now))
    }

    async fn account_update(&self, account: &Account) -> CrmResult<Account> {
        Self::replace(&self.accounts, RecordKind::Account, account.id, account)
    }

    async fn account_delete(&self, id: RecordId) -> CrmResult<()> {
        Self::remove(&self.accounts, RecordKind::Account, id)
    }

    // === Stage Operations ===

    async fn stage_list(&self) -> CrmResult<Vec<Stage>> {
        let stages = self.stages.read().map_err(poisoned)?;
        let mut all: Vec<Stage> = stages.values().cloned().collect();
        all.sort_by_key(|s| s.position);
        Ok(all)
    }

    async fn stage_get(&self, id: &str) -> CrmResult<Option<Stage>> {
        let stages = self.stages.read().map_err(poisoned)?;
        Ok(stages.get(id).cloned())
    }

    async fn stage_create(&self, stage: &Stage) -> CrmResult<Stage> {
        let mut stages = self.stages.write().map_err(poisoned)?;
        if stages.contains_key(&stage.id) {
            return Err(StoreError::CreateFailed {
                kind: RecordKind::Stage,
                reason: format!("stage id {:?} already exists", stage.id),
            }
            .into());
        }
        stages.insert(stage.id.clone(), stage.clone());
        Ok(stage.clone())
    }

    async fn stage_update(&self, stage: &Stage) -> CrmResult<Stage> {
        let mut stages = self.stages.write().map_err(poisoned)?;
        if !stages.contains_key(&stage.id) {
            return Err(StoreError::NotFound {
                kind: RecordKind::Stage,
                id: 0,
            }
            .into());
        }
        stages.insert(stage.id.clone(), stage.clone());
        Ok(stage.clone())
    }

    async fn stage_delete(&self, id: &str) -> CrmResult<()> {
        let mut stages = self.stages.write().map_err(poisoned)?;
        if stages.remove(id).is_none() {
            return Err(StoreError::NotFound {
                kind: RecordKind::Stage,
                id: 0,
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealflow_core::Priority;

    fn deal_draft(stage: &str, value: f64) -> DealDraft {
        DealDraft {
            title: "Test deal".to_string(),
            value,
            stage: stage.to_string(),
            priority: Priority::Medium,
            contact_name: None,
            company: None,
            assigned_to: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_monotonic_ids() {
        let store = InMemoryStore::new();
        let a = store.deal_create(&deal_draft("cold-lead", 100.0)).await.unwrap();
        let b = store.deal_create(&deal_draft("cold-lead", 200.0)).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = InMemoryStore::new();
        let a = store.deal_create(&deal_draft("cold-lead", 100.0)).await.unwrap();
        store.deal_delete(a.id).await.unwrap();
        let b = store.deal_create(&deal_draft("cold-lead", 200.0)).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let store = InMemoryStore::new();
        assert_eq!(store.deal_get(999).await.unwrap(), None);
        assert_eq!(store.lead_get(999).await.unwrap(), None);
        assert_eq!(store.contact_get(999).await.unwrap(), None);
        assert_eq!(store.account_get(999).await.unwrap(), None);
        assert_eq!(store.stage_get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_missing_returns_not_found() {
        let store = InMemoryStore::new();
        let ghost = deal_draft("cold-lead", 100.0).into_record(999, Utc::now());
        let err = store.deal_update(&ghost).await.unwrap_err();
        assert!(matches!(
            err,
            CrmError::Store(StoreError::NotFound {
                kind: RecordKind::Deal,
                id: 999
            })
        ));
    }

    #[tokio::test]
    async fn test_update_replaces_record_verbatim() {
        let store = InMemoryStore::new();
        let deal = store.deal_create(&deal_draft("cold-lead", 100.0)).await.unwrap();
        let replacement = deal.moved_to("deal-closed".to_string(), Utc::now());

        let returned = store.deal_update(&replacement).await.unwrap();
        assert_eq!(returned, replacement);
        assert_eq!(store.deal_get(deal.id).await.unwrap(), Some(replacement));
    }

    #[tokio::test]
    async fn test_duplicate_stage_create_fails() {
        let stage = Stage {
            id: "cold-lead".to_string(),
            name: "Cold Lead".to_string(),
            position: 1,
        };
        let store = InMemoryStore::with_stages([stage.clone()]);
        let err = store.stage_create(&stage).await.unwrap_err();
        assert!(matches!(
            err,
            CrmError::Store(StoreError::CreateFailed {
                kind: RecordKind::Stage,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_stage_list_sorted_by_position() {
        let store = InMemoryStore::with_stages([
            Stage {
                id: "deal-closed".to_string(),
                name: "Deal Closed".to_string(),
                position: 4,
            },
            Stage {
                id: "cold-lead".to_string(),
                name: "Cold Lead".to_string(),
                position: 1,
            },
            Stage {
                id: "estimate-sent".to_string(),
                name: "Estimate Sent".to_string(),
                position: 3,
            },
        ]);
        let stages = store.stage_list().await.unwrap();
        let ids: Vec<&str> = stages.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["cold-lead", "estimate-sent", "deal-closed"]);
    }

    #[tokio::test]
    async fn test_seed_bumps_allocator() {
        let store = InMemoryStore::new();
        store.seed_deal(deal_draft("cold-lead", 100.0).into_record(10, Utc::now()));
        let next = store.deal_create(&deal_draft("cold-lead", 50.0)).await.unwrap();
        assert!(next.id > 10);
    }
}
