//! Stage partitioning and the deal move operation.

use crate::notifications::{Notification, NotificationAction, NotificationLevel, Notifications};
use crate::state::LoadState;
use chrono::Utc;
use dealflow_core::{
    validate_deal_draft, validate_non_negative, CrmResult, Deal, DealDraft, Priority, RecordId,
    Stage, StageId,
};
use dealflow_storage::RecordStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// One pipeline column: a stage, its member deals, and their summed value.
#[derive(Debug, Clone, PartialEq)]
pub struct StageColumn {
    pub stage: Stage,
    pub deals: Vec<Deal>,
    pub total_value: f64,
}

impl StageColumn {
    pub fn count(&self) -> usize {
        self.deals.len()
    }
}

/// Partition deals by stage, in stage order.
///
/// Each column holds the deals whose stage id equals that stage's id,
/// preserving the deals' original relative order, plus their summed value.
/// A deal whose stage id matches no stage appears in no column; an empty
/// stage yields an empty column with a zero sum. Recomputed from scratch
/// on every call.
pub fn partition(stages: &[Stage], deals: &[Deal]) -> Vec<StageColumn> {
    stages
        .iter()
        .map(|stage| {
            let members: Vec<Deal> = deals
                .iter()
                .filter(|deal| deal.stage == stage.id)
                .cloned()
                .collect();
            let total_value = members.iter().map(|d| d.value).sum();
            StageColumn {
                stage: stage.clone(),
                deals: members,
                total_value,
            }
        })
        .collect()
}

/// Result of a requested move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The deal was persisted in the target stage and local state updated.
    Moved,
    /// The deal is already in the target stage; nothing was written.
    SameStage,
    /// No deal with that id is loaded; nothing was written.
    UnknownDeal,
}

/// The pipeline view: owns the fetched stage set and deal collection, and
/// applies stage moves and direct field edits against them.
///
/// Mutations are confirm-then-apply: the store write happens first and the
/// in-memory record is replaced only on success. A failed write leaves
/// local state untouched and queues an error notification.
pub struct PipelineBoard {
    store: Arc<dyn RecordStore>,
    state: LoadState,
    stages: Vec<Stage>,
    deals: Vec<Deal>,
    notifications: Notifications,
}

impl PipelineBoard {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            state: LoadState::Loading,
            stages: Vec::new(),
            deals: Vec::new(),
            notifications: Notifications::default(),
        }
    }

    /// Fetch the stage set and the full deal collection. Both must load
    /// for the board to become ready; either failure puts the whole view
    /// into the failed state with a retry notification.
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        let stages = self.store.stage_list().await;
        let deals = self.store.deal_list().await;
        match (stages, deals) {
            (Ok(mut stages), Ok(deals)) => {
                stages.sort_by_key(|s| s.position);
                debug!(stages = stages.len(), deals = deals.len(), "pipeline loaded");
                self.stages = stages;
                self.deals = deals;
                self.state = LoadState::Ready;
            }
            (Err(err), _) | (_, Err(err)) => {
                warn!(%err, "pipeline load failed");
                self.state = LoadState::Failed("Failed to load pipeline data".to_string());
                self.notifications.push(
                    Notification::new(NotificationLevel::Error, "Failed to load pipeline data")
                        .with_action(NotificationAction::Retry),
                );
            }
        }
    }

    /// Retry action for the failed view state.
    pub async fn reload(&mut self) {
        self.load().await;
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn notifications(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Current columns, recomputed from the live collections.
    pub fn columns(&self) -> Vec<StageColumn> {
        partition(&self.stages, &self.deals)
    }

    /// Move a deal to another stage.
    ///
    /// Unknown ids and same-stage requests are no-ops that never reach the
    /// store. The caller supplies ids from rendered state, so an unknown
    /// id is unusual but not an error.
    pub async fn move_deal(&mut self, deal_id: RecordId, target: StageId) -> CrmResult<MoveOutcome> {
        let Some(deal) = self.deals.iter().find(|d| d.id == deal_id).cloned() else {
            debug!(deal_id, "move requested for unknown deal");
            return Ok(MoveOutcome::UnknownDeal);
        };
        if deal.stage == target {
            return Ok(MoveOutcome::SameStage);
        }

        let replacement = deal.moved_to(target.clone(), Utc::now());
        match self.store.deal_update(&replacement).await {
            Ok(saved) => {
                self.replace_local(saved);
                let stage_name = self.stage_name(&target);
                self.notifications.push(Notification::new(
                    NotificationLevel::Success,
                    format!("Deal moved to {}", stage_name),
                ));
                Ok(MoveOutcome::Moved)
            }
            Err(err) => {
                warn!(deal_id, %err, "deal move failed");
                self.notifications
                    .push(Notification::new(NotificationLevel::Error, "Failed to move deal"));
                Err(err)
            }
        }
    }

    /// Create a deal from a validated draft.
    pub async fn create_deal(&mut self, draft: &DealDraft) -> CrmResult<Deal> {
        validate_deal_draft(draft)?;
        match self.store.deal_create(draft).await {
            Ok(deal) => {
                self.deals.push(deal.clone());
                self.notifications.push(Notification::new(
                    NotificationLevel::Success,
                    "Deal created successfully",
                ));
                Ok(deal)
            }
            Err(err) => {
                warn!(%err, "deal create failed");
                self.notifications
                    .push(Notification::new(NotificationLevel::Error, "Failed to create deal"));
                Err(err)
            }
        }
    }

    /// Edit a deal's monetary value. Whole-record replacement.
    pub async fn update_value(&mut self, deal_id: RecordId, value: f64) -> CrmResult<()> {
        validate_non_negative("value", value)?;
        let Some(deal) = self.deals.iter().find(|d| d.id == deal_id).cloned() else {
            return Ok(());
        };
        let replacement = Deal {
            value,
            updated_at: Utc::now(),
            ..deal
        };
        self.persist_edit(replacement, "Deal value updated", "Failed to update deal")
            .await
    }

    /// Edit a deal's priority. Whole-record replacement.
    pub async fn update_priority(&mut self, deal_id: RecordId, priority: Priority) -> CrmResult<()> {
        let Some(deal) = self.deals.iter().find(|d| d.id == deal_id).cloned() else {
            return Ok(());
        };
        let replacement = Deal {
            priority,
            updated_at: Utc::now(),
            ..deal
        };
        self.persist_edit(replacement, "Deal priority updated", "Failed to update deal")
            .await
    }

    /// Record an activity against a deal, refreshing its last-activity
    /// timestamp.
    pub async fn log_activity(&mut self, deal_id: RecordId, kind: &str) -> CrmResult<()> {
        let Some(deal) = self.deals.iter().find(|d| d.id == deal_id).cloned() else {
            return Ok(());
        };
        let replacement = deal.logged_activity(kind, Utc::now());
        self.persist_edit(replacement, "Activity logged", "Failed to log activity")
            .await
    }

    /// Delete a deal.
    pub async fn delete_deal(&mut self, deal_id: RecordId) -> CrmResult<()> {
        match self.store.deal_delete(deal_id).await {
            Ok(()) => {
                self.deals.retain(|d| d.id != deal_id);
                self.notifications
                    .push(Notification::new(NotificationLevel::Success, "Deal deleted"));
                Ok(())
            }
            Err(err) => {
                warn!(deal_id, %err, "deal delete failed");
                self.notifications
                    .push(Notification::new(NotificationLevel::Error, "Failed to delete deal"));
                Err(err)
            }
        }
    }

    async fn persist_edit(
        &mut self,
        replacement: Deal,
        success: &str,
        failure: &str,
    ) -> CrmResult<()> {
        match self.store.deal_update(&replacement).await {
            Ok(saved) => {
                self.replace_local(saved);
                self.notifications
                    .push(Notification::new(NotificationLevel::Success, success));
                Ok(())
            }
            Err(err) => {
                warn!(deal_id = replacement.id, %err, "deal edit failed");
                self.notifications
                    .push(Notification::new(NotificationLevel::Error, failure));
                Err(err)
            }
        }
    }

    fn replace_local(&mut self, saved: Deal) {
        if let Some(slot) = self.deals.iter_mut().find(|d| d.id == saved.id) {
            *slot = saved;
        }
    }

    fn stage_name(&self, id: &str) -> String {
        self.stages
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}
