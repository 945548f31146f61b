//! Dealflow Board - client-side application state
//!
//! The behavioral core of the CRM client: stage partitioning with per-
//! column aggregates, the deal move operation, dashboard metrics, and the
//! lead/contact/account workbenches. Everything here owns the collections
//! it fetched from an injected `RecordStore`; mutations are persisted
//! first and applied locally only after the store confirms the write.

pub mod accounts;
pub mod board;
pub mod contacts;
pub mod dashboard;
pub mod leads;
pub mod notifications;
pub mod state;

pub use accounts::{AccountDirectory, AccountSummary};
pub use board::{partition, MoveOutcome, PipelineBoard, StageColumn};
pub use contacts::ContactDirectory;
pub use dashboard::{DashboardMetrics, FunnelStep, StagePerformance};
pub use leads::{LeadStatusCounts, LeadWorkbench};
pub use notifications::{Notification, NotificationAction, NotificationLevel, Notifications};
pub use state::LoadState;
