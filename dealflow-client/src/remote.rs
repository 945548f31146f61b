//! `RecordStore` implementation over the REST transport.

use crate::error::ClientError;
use crate::rest::RestClient;
use async_trait::async_trait;
use dealflow_core::{
    Account, AccountDraft, Contact, ContactDraft, CrmError, CrmResult, Deal, DealDraft, Lead,
    LeadDraft, RecordId, RecordKind, Stage, StoreError,
};
use dealflow_storage::RecordStore;

/// Remote record store. One HTTP round-trip per operation; no retries,
/// no caching, no request coalescing.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    rest: RestClient,
}

fn transport(err: ClientError) -> CrmError {
    StoreError::Transport {
        reason: err.to_string(),
    }
    .into()
}

fn create_error(kind: RecordKind, err: ClientError) -> CrmError {
    match err {
        ClientError::Status { status, message } => StoreError::CreateFailed {
            kind,
            reason: format!("HTTP {}: {}", status, message),
        }
        .into(),
        other => transport(other),
    }
}

fn update_error(kind: RecordKind, id: RecordId, err: ClientError) -> CrmError {
    if err.is_not_found() {
        return StoreError::NotFound { kind, id }.into();
    }
    match err {
        ClientError::Status { status, message } => StoreError::UpdateFailed {
            kind,
            id,
            reason: format!("HTTP {}: {}", status, message),
        }
        .into(),
        other => transport(other),
    }
}

fn delete_error(kind: RecordKind, id: RecordId, err: ClientError) -> CrmError {
    if err.is_not_found() {
        return StoreError::NotFound { kind, id }.into();
    }
    match err {
        ClientError::Status { status, message } => StoreError::DeleteFailed {
            kind,
            id,
            reason: format!("HTTP {}: {}", status, message),
        }
        .into(),
        other => transport(other),
    }
}

impl RemoteStore {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    async fn get_optional<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> CrmResult<Option<T>> {
        match self.rest.get_json::<T>(path).await {
            Ok(record) => Ok(Some(record)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(transport(err)),
        }
    }
}

#[async_trait]
impl RecordStore for RemoteStore {
    // === Deal Operations ===

    async fn deal_list(&self) -> CrmResult<Vec<Deal>> {
        self.rest.get_json("/api/v1/deals").await.map_err(transport)
    }

    async fn deal_get(&self, id: RecordId) -> CrmResult<Option<Deal>> {
        self.get_optional(&format!("/api/v1/deals/{}", id)).await
    }

    async fn deal_create(&self, draft: &DealDraft) -> CrmResult<Deal> {
        self.rest
            .post_json("/api/v1/deals", draft)
            .await
            .map_err(|e| create_error(RecordKind::Deal, e))
    }

    async fn deal_update(&self, deal: &Deal) -> CrmResult<Deal> {
        self.rest
            .put_json(&format!("/api/v1/deals/{}", deal.id), deal)
            .await
            .map_err(|e| update_error(RecordKind::Deal, deal.id, e))
    }

    async fn deal_delete(&self, id: RecordId) -> CrmResult<()> {
        self.rest
            .delete(&format!("/api/v1/deals/{}", id))
            .await
            .map_err(|e| delete_error(RecordKind::Deal, id, e))
    }

    // === Lead Operations ===

    async fn lead_list(&self) -> CrmResult<Vec<Lead>> {
        self.rest.get_json("/api/v1/leads").await.map_err(transport)
    }

    async fn lead_get(&self, id: RecordId) -> CrmResult<Option<Lead>> {
        self.get_optional(&format!("/api/v1/leads/{}", id)).await
    }

    async fn lead_create(&self, draft: &LeadDraft) -> CrmResult<Lead> {
        self.rest
            .post_json("/api/v1/leads", draft)
            .await
            .map_err(|e| create_error(RecordKind::Lead, e))
    }

    async fn lead_update(&self, lead: &Lead) -> CrmResult<Lead> {
        self.rest
            .put_json(&format!("/api/v1/leads/{}", lead.id), lead)
            .await
            .map_err(|e| update_error(RecordKind::Lead, lead.id, e))
    }

    async fn lead_delete(&self, id: RecordId) -> CrmResult<()> {
        self.rest
            .delete(&format!("/api/v1/leads/{}", id))
            .await
            .map_err(|e| delete_error(RecordKind::Lead, id, e))
    }

    // === Contact Operations ===

    async fn contact_list(&self) -> CrmResult<Vec<Contact>> {
        self.rest
            .get_json("/api/v1/contacts")
            .await
            .map_err(transport)
    }

    async fn contact_get(&self, id: RecordId) -> CrmResult<Option<Contact>> {
        self.get_optional(&format!("/api/v1/contacts/{}", id)).await
    }

    async fn contact_create(&self, draft: &ContactDraft) -> CrmResult<Contact> {
        self.rest
            .post_json("/api/v1/contacts", draft)
            .await
            .map_err(|e| create_error(RecordKind::Contact, e))
    }

    async fn contact_update(&self, contact: &Contact) -> CrmResult<Contact> {
        self.rest
            .put_json(&format!("/api/v1/contacts/{}", contact.id), contact)
            .await
            .map_err(|e| update_error(RecordKind::Contact, contact.id, e))
    }

    async fn contact_delete(&self, id: RecordId) -> CrmResult<()> {
        self.rest
            .delete(&format!("/api/v1/contacts/{}", id))
            .await
            .map_err(|e| delete_error(RecordKind::Contact, id, e))
    }

    // === Account Operations ===

    async fn account_list(&self) -> CrmResult<Vec<Account>> {
        self.rest
            .get_json("/api/v1/accounts")
            .await
            .map_err(transport)
    }

    async fn account_get(&self, id: RecordId) -> CrmResult<Option<Account>> {
        self.get_optional(&format!("/api/v1/accounts/{}", id)).await
    }

    async fn account_create(&self, draft: &AccountDraft) -> CrmResult<Account> {
        self.rest
            .post_json("/api/v1/accounts", draft)
            .await
            .map_err(|e| create_error(RecordKind::Account, e))
    }

    async fn account_update(&self, account: &Account) -> CrmResult<Account> {
        self.rest
            .put_json(&format!("/api/v1/accounts/{}", account.id), account)
            .await
            .map_err(|e| update_error(RecordKind::Account, account.id, e))
    }

    async fn account_delete(&self, id: RecordId) -> CrmResult<()> {
        self.rest
            .delete(&format!("/api/v1/accounts/{}", id))
            .await
            .map_err(|e| delete_error(RecordKind::Account, id, e))
    }

    // === Stage Operations ===

    async fn stage_list(&self) -> CrmResult<Vec<Stage>> {
        self.rest
            .get_json("/api/v1/stages")
            .await
            .map_err(transport)
    }

    async fn stage_get(&self, id: &str) -> CrmResult<Option<Stage>> {
        self.get_optional(&format!("/api/v1/stages/{}", id)).await
    }

    async fn stage_create(&self, stage: &Stage) -> CrmResult<Stage> {
        self.rest
            .post_json("/api/v1/stages", stage)
            .await
            .map_err(|e| create_error(RecordKind::Stage, e))
    }

    async fn stage_update(&self, stage: &Stage) -> CrmResult<Stage> {
        self.rest
            .put_json(&format!("/api/v1/stages/{}", stage.id), stage)
            .await
            .map_err(|e| update_error(RecordKind::Stage, 0, e))
    }

    async fn stage_delete(&self, id: &str) -> CrmResult<()> {
        self.rest
            .delete(&format!("/api/v1/stages/{}", id))
            .await
            .map_err(|e| delete_error(RecordKind::Stage, 0, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_store_not_found() {
        let err = update_error(
            RecordKind::Deal,
            42,
            ClientError::Status {
                status: 404,
                message: "no such record".to_string(),
            },
        );
        assert!(matches!(
            err,
            CrmError::Store(StoreError::NotFound {
                kind: RecordKind::Deal,
                id: 42
            })
        ));
    }

    #[test]
    fn test_server_error_maps_to_update_failed() {
        let err = update_error(
            RecordKind::Deal,
            42,
            ClientError::Status {
                status: 500,
                message: "boom".to_string(),
            },
        );
        match err {
            CrmError::Store(StoreError::UpdateFailed { kind, id, reason }) => {
                assert_eq!(kind, RecordKind::Deal);
                assert_eq!(id, 42);
                assert!(reason.contains("500"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_serde_error_maps_to_transport() {
        let err = create_error(
            RecordKind::Lead,
            ClientError::InvalidResponse("truncated body".to_string()),
        );
        assert!(matches!(err, CrmError::Store(StoreError::Transport { .. })));
    }
}
