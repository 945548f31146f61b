//! Lead workbench: capture, qualify, and convert leads.

use crate::notifications::{Notification, NotificationAction, NotificationLevel, Notifications};
use crate::state::LoadState;
use chrono::Utc;
use dealflow_core::{
    validate_lead_draft, Contact, ContactDraft, CrmResult, Lead, LeadDraft, LeadFilter, LeadStatus,
    RecordId,
};
use dealflow_storage::RecordStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Per-status headcounts for the stat row above the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeadStatusCounts {
    pub new: usize,
    pub contacted: usize,
    pub qualified: usize,
    pub unqualified: usize,
}

impl LeadStatusCounts {
    pub fn total(&self) -> usize {
        self.new + self.contacted + self.qualified + self.unqualified
    }

    /// Qualified share of all leads, rounded to whole percent.
    pub fn qualification_rate(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        ((self.qualified as f64 / total as f64) * 100.0).round() as u32
    }
}

/// Owns the fetched lead collection plus the active filter.
pub struct LeadWorkbench {
    store: Arc<dyn RecordStore>,
    state: LoadState,
    leads: Vec<Lead>,
    filter: LeadFilter,
    notifications: Notifications,
}

impl LeadWorkbench {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            state: LoadState::Loading,
            leads: Vec::new(),
            filter: LeadFilter::default(),
            notifications: Notifications::default(),
        }
    }

    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        match self.store.lead_list().await {
            Ok(leads) => {
                debug!(leads = leads.len(), "leads loaded");
                self.leads = leads;
                self.state = LoadState::Ready;
            }
            Err(err) => {
                warn!(%err, "lead load failed");
                self.state = LoadState::Failed("Failed to load leads".to_string());
                self.notifications.push(
                    Notification::new(NotificationLevel::Error, "Failed to load leads")
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

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn notifications(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub fn set_filter(&mut self, filter: LeadFilter) {
        self.filter = filter;
    }

    /// The filtered view of the collection, recomputed on demand.
    pub fn visible(&self) -> Vec<&Lead> {
        self.filter.apply(&self.leads)
    }

    /// Status counts over the whole collection, not the filtered view.
    pub fn status_counts(&self) -> LeadStatusCounts {
        let mut counts = LeadStatusCounts::default();
        for lead in &self.leads {
            match lead.status {
                LeadStatus::New => counts.new += 1,
                LeadStatus::Contacted => counts.contacted += 1,
                LeadStatus::Qualified => counts.qualified += 1,
                LeadStatus::Unqualified => counts.unqualified += 1,
            }
        }
        counts
    }

    /// Create a lead from a validated draft. Invalid drafts never reach
    /// the store.
    pub async fn create_lead(&mut self, draft: &LeadDraft) -> CrmResult<Lead> {
        validate_lead_draft(draft)?;
        match self.store.lead_create(draft).await {
            Ok(lead) => {
                self.leads.push(lead.clone());
                self.notifications.push(Notification::new(
                    NotificationLevel::Success,
                    "Lead created successfully",
                ));
                Ok(lead)
            }
            Err(err) => {
                warn!(%err, "lead create failed");
                self.notifications
                    .push(Notification::new(NotificationLevel::Error, "Failed to create lead"));
                Err(err)
            }
        }
    }

    /// Move a lead through the qualification pipeline. Unknown ids are a
    /// no-op, mirroring the board's move semantics.
    pub async fn set_status(&mut self, lead_id: RecordId, status: LeadStatus) -> CrmResult<()> {
        let Some(lead) = self.leads.iter().find(|l| l.id == lead_id).cloned() else {
            debug!(lead_id, "status change requested for unknown lead");
            return Ok(());
        };
        if lead.status == status {
            return Ok(());
        }
        let replacement = lead.with_status(status, Utc::now());
        match self.store.lead_update(&replacement).await {
            Ok(saved) => {
                if let Some(slot) = self.leads.iter_mut().find(|l| l.id == saved.id) {
                    *slot = saved;
                }
                self.notifications
                    .push(Notification::new(NotificationLevel::Success, "Lead status updated"));
                Ok(())
            }
            Err(err) => {
                warn!(lead_id, %err, "lead status change failed");
                self.notifications.push(Notification::new(
                    NotificationLevel::Error,
                    "Failed to update lead status",
                ));
                Err(err)
            }
        }
    }

    /// Convert a lead into a contact: create the contact from the lead's
    /// fields, then delete the lead. If contact creation fails the lead is
    /// untouched; if only the delete fails the contact exists and the lead
    /// remains until the next successful delete.
    pub async fn convert_to_contact(&mut self, lead_id: RecordId) -> CrmResult<Option<Contact>> {
        let Some(lead) = self.leads.iter().find(|l| l.id == lead_id).cloned() else {
            return Ok(None);
        };

        let draft = ContactDraft::from_lead(&lead);
        let contact = match self.store.contact_create(&draft).await {
            Ok(contact) => contact,
            Err(err) => {
                warn!(lead_id, %err, "lead conversion failed at contact create");
                self.notifications
                    .push(Notification::new(NotificationLevel::Error, "Failed to convert lead"));
                return Err(err);
            }
        };

        match self.store.lead_delete(lead_id).await {
            Ok(()) => {
                self.leads.retain(|l| l.id != lead_id);
                self.notifications.push(Notification::new(
                    NotificationLevel::Success,
                    format!("{} converted to contact successfully", lead.name),
                ));
                Ok(Some(contact))
            }
            Err(err) => {
                warn!(lead_id, %err, "lead conversion failed at lead delete");
                self.notifications
                    .push(Notification::new(NotificationLevel::Error, "Failed to convert lead"));
                Err(err)
            }
        }
    }

    /// Delete a lead outright.
    pub async fn delete_lead(&mut self, lead_id: RecordId) -> CrmResult<()> {
        match self.store.lead_delete(lead_id).await {
            Ok(()) => {
                self.leads.retain(|l| l.id != lead_id);
                self.notifications
                    .push(Notification::new(NotificationLevel::Success, "Lead deleted"));
                Ok(())
            }
            Err(err) => {
                warn!(lead_id, %err, "lead delete failed");
                self.notifications
                    .push(Notification::new(NotificationLevel::Error, "Failed to delete lead"));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealflow_core::LeadSource;
    use dealflow_test_utils::{lead, lead_draft, InMemoryStore};

    fn workbench_with(leads: Vec<Lead>) -> (LeadWorkbench, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        for l in leads {
            store.seed_lead(l);
        }
        (LeadWorkbench::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_status_counts_and_qualification_rate() {
        let (mut wb, _store) = workbench_with(vec![
            lead(1, "Sarah Johnson", LeadStatus::New),
            lead(2, "Michael Chen", LeadStatus::Qualified),
            lead(3, "David Kim", LeadStatus::Qualified),
            lead(4, "Emma Wilson", LeadStatus::Contacted),
        ]);
        wb.load().await;

        let counts = wb.status_counts();
        assert_eq!(counts.new, 1);
        assert_eq!(counts.qualified, 2);
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.qualification_rate(), 50);
    }

    #[tokio::test]
    async fn test_filter_narrows_visible_not_counts() {
        let (mut wb, _store) = workbench_with(vec![
            lead(1, "Sarah Johnson", LeadStatus::New),
            lead(2, "Michael Chen", LeadStatus::Qualified),
        ]);
        wb.load().await;
        wb.set_filter(LeadFilter {
            status: Some(LeadStatus::Qualified),
            ..Default::default()
        });

        assert_eq!(wb.visible().len(), 1);
        assert_eq!(wb.status_counts().total(), 2);
    }

    #[tokio::test]
    async fn test_set_status_persists_and_updates_local() {
        let (mut wb, store) = workbench_with(vec![lead(1, "Sarah Johnson", LeadStatus::New)]);
        wb.load().await;

        wb.set_status(1, LeadStatus::Contacted).await.unwrap();
        assert_eq!(wb.leads()[0].status, LeadStatus::Contacted);
        assert_eq!(
            store.lead_get(1).await.unwrap().unwrap().status,
            LeadStatus::Contacted
        );
    }

    #[tokio::test]
    async fn test_set_status_unknown_lead_is_noop() {
        let (mut wb, _store) = workbench_with(vec![lead(1, "Sarah Johnson", LeadStatus::New)]);
        wb.load().await;
        assert!(wb.set_status(99, LeadStatus::Qualified).await.is_ok());
        assert_eq!(wb.leads()[0].status, LeadStatus::New);
    }

    #[tokio::test]
    async fn test_convert_creates_contact_and_deletes_lead() {
        let (mut wb, store) = workbench_with(vec![lead(1, "Sarah Johnson", LeadStatus::Qualified)]);
        wb.load().await;

        let contact = wb.convert_to_contact(1).await.unwrap().unwrap();
        assert_eq!(contact.name, "Sarah Johnson");
        assert_eq!(contact.lead_source, Some(LeadSource::Website));
        assert_eq!(store.lead_get(1).await.unwrap(), None);
        assert_eq!(store.contact_count(), 1);
        assert!(wb.leads().is_empty());
    }

    #[tokio::test]
    async fn test_convert_unknown_lead_is_noop() {
        let (mut wb, store) = workbench_with(vec![lead(1, "Sarah Johnson", LeadStatus::New)]);
        wb.load().await;
        assert_eq!(wb.convert_to_contact(99).await.unwrap(), None);
        assert_eq!(store.contact_count(), 0);
    }

    #[tokio::test]
    async fn test_create_lead_invalid_email_never_hits_store() {
        let (mut wb, store) = workbench_with(vec![]);
        wb.load().await;

        let mut draft = lead_draft("Sarah Johnson");
        draft.email = "not-an-email".to_string();
        assert!(wb.create_lead(&draft).await.is_err());
        assert_eq!(store.lead_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_lead_removes_local() {
        let (mut wb, store) = workbench_with(vec![lead(1, "Sarah Johnson", LeadStatus::New)]);
        wb.load().await;

        wb.delete_lead(1).await.unwrap();
        assert!(wb.leads().is_empty());
        assert_eq!(store.lead_count(), 0);
    }
}
