//! Load state for fetched collections.

/// Lifecycle of a fetched collection. A failed load is a full-view state
/// with a retry path; a failed mutation never changes this, it only
/// queues a notification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }
}
