//! Account directory: company relationships and portfolio health.

use crate::notifications::{Notification, NotificationAction, NotificationLevel, Notifications};
use crate::state::LoadState;
use dealflow_core::{Account, AccountFilter, AccountHealth, CrmResult, RecordId};
use dealflow_storage::RecordStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Headline numbers for the accounts screen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AccountSummary {
    pub excellent: usize,
    pub good: usize,
    /// Poor plus critical; surfaced together as "needs attention".
    pub at_risk: usize,
    pub portfolio_revenue: f64,
}

/// Owns the fetched account collection plus the active filter.
pub struct AccountDirectory {
    store: Arc<dyn RecordStore>,
    state: LoadState,
    accounts: Vec<Account>,
    filter: AccountFilter,
    notifications: Notifications,
}

impl AccountDirectory {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            state: LoadState::Loading,
            accounts: Vec::new(),
            filter: AccountFilter::default(),
            notifications: Notifications::default(),
        }
    }

    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        match self.store.account_list().await {
            Ok(accounts) => {
                debug!(accounts = accounts.len(), "accounts loaded");
                self.accounts = accounts;
                self.state = LoadState::Ready;
            }
            Err(err) => {
                warn!(%err, "account load failed");
                self.state = LoadState::Failed("Failed to load accounts".to_string());
                self.notifications.push(
                    Notification::new(NotificationLevel::Error, "Failed to load accounts")
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

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn notifications(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub fn set_filter(&mut self, filter: AccountFilter) {
        self.filter = filter;
    }

    pub fn visible(&self) -> Vec<&Account> {
        self.filter.apply(&self.accounts)
    }

    /// Summary over the whole collection, not the filtered view.
    pub fn summary(&self) -> AccountSummary {
        let mut summary = AccountSummary::default();
        for account in &self.accounts {
            match account.health {
                AccountHealth::Excellent => summary.excellent += 1,
                AccountHealth::Good => summary.good += 1,
                AccountHealth::Fair => {}
                AccountHealth::Poor | AccountHealth::Critical => summary.at_risk += 1,
            }
            summary.portfolio_revenue += account.total_revenue;
        }
        summary
    }

    /// Delete an account. Related deals and contacts are not cascaded.
    pub async fn delete_account(&mut self, account_id: RecordId) -> CrmResult<()> {
        match self.store.account_delete(account_id).await {
            Ok(()) => {
                self.accounts.retain(|a| a.id != account_id);
                self.notifications
                    .push(Notification::new(NotificationLevel::Success, "Account deleted"));
                Ok(())
            }
            Err(err) => {
                warn!(account_id, %err, "account delete failed");
                self.notifications.push(Notification::new(
                    NotificationLevel::Error,
                    "Failed to delete account",
                ));
                Err(err)
            }
        }
    }
}
