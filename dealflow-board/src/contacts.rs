//! Contact directory: the converted-people list.

use crate::notifications::{Notification, NotificationAction, NotificationLevel, Notifications};
use crate::state::LoadState;
use dealflow_core::{
    validate_contact_draft, Contact, ContactDraft, ContactFilter, CrmResult, RecordId,
};
use dealflow_storage::RecordStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Owns the fetched contact collection plus the active search filter.
pub struct ContactDirectory {
    store: Arc<dyn RecordStore>,
    state: LoadState,
    contacts: Vec<Contact>,
    filter: ContactFilter,
    notifications: Notifications,
}

impl ContactDirectory {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            state: LoadState::Loading,
            contacts: Vec::new(),
            filter: ContactFilter::default(),
            notifications: Notifications::default(),
        }
    }

    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        match self.store.contact_list().await {
            Ok(contacts) => {
                debug!(contacts = contacts.len(), "contacts loaded");
                self.contacts = contacts;
                self.state = LoadState::Ready;
            }
            Err(err) => {
                warn!(%err, "contact load failed");
                self.state = LoadState::Failed("Failed to load contacts".to_string());
                self.notifications.push(
                    Notification::new(NotificationLevel::Error, "Failed to load contacts")
                        .with_action(NotificationAction::Retry),
                );
            }
        }
    }

    pub async fn reload(&mut self) {
        self.load().await;
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn notifications(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub fn set_filter(&mut self, filter: ContactFilter) {
        self.filter = filter;
    }

    pub fn visible(&self) -> Vec<&Contact> {
        self.filter.apply(&self.contacts)
    }

    /// Create a contact from a validated draft.
    pub async fn create_contact(&mut self, draft: &ContactDraft) -> CrmResult<Contact> {
        validate_contact_draft(draft)?;
        match self.store.contact_create(draft).await {
            Ok(contact) => {
                self.contacts.push(contact.clone());
                self.notifications.push(Notification::new(
                    NotificationLevel::Success,
                    "Contact created successfully",
                ));
                Ok(contact)
            }
            Err(err) => {
                warn!(%err, "contact create failed");
                self.notifications.push(Notification::new(
                    NotificationLevel::Error,
                    "Failed to create contact",
                ));
                Err(err)
            }
        }
    }

    /// Delete a contact.
    pub async fn delete_contact(&mut self, contact_id: RecordId) -> CrmResult<()> {
        match self.store.contact_delete(contact_id).await {
            Ok(()) => {
                self.contacts.retain(|c| c.id != contact_id);
                self.notifications
                    .push(Notification::new(NotificationLevel::Success, "Contact deleted"));
                Ok(())
            }
            Err(err) => {
                warn!(contact_id, %err, "contact delete failed");
                self.notifications.push(Notification::new(
                    NotificationLevel::Error,
                    "Failed to delete contact",
                ));
                Err(err)
            }
        }
    }
}
