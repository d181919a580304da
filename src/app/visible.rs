// SPDX-License-Identifier: MPL-2.0
//! Snapshot of the toasts the overlay draws.
//!
//! Re-read from the manager only when its revision counter moved, so idle
//! ticks cost a single atomic check instead of cloning the collection.

use crate::notifications::{Manager, Notification};
use tokio::sync::watch;

pub(crate) struct VisibleToasts {
    revisions: watch::Receiver<u64>,
    notifications: Vec<Notification>,
}

impl VisibleToasts {
    pub(crate) fn new(manager: &Manager) -> Self {
        Self {
            revisions: manager.subscribe(),
            notifications: manager.snapshot(),
        }
    }

    /// Refreshes from `manager` if it changed since the last sync.
    ///
    /// Returns `true` if the snapshot was replaced.
    pub(crate) fn sync(&mut self, manager: &Manager) -> bool {
        if !self.revisions.has_changed().unwrap_or(false) {
            return false;
        }
        // Mark first: a mutation racing the snapshot is picked up next sync.
        self.revisions.borrow_and_update();
        self.notifications = manager.snapshot();
        true
    }

    pub(crate) fn as_slice(&self) -> &[Notification] {
        &self.notifications
    }

    pub(crate) fn len(&self) -> usize {
        self.notifications.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::DwellInterval;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn sync_follows_manager_revisions() {
        let manager = Manager::new(DwellInterval::from_millis(1_000));
        let mut visible = VisibleToasts::new(&manager);
        assert!(visible.is_empty());
        assert!(!visible.sync(&manager));

        let id = manager.success("Upload complete");
        assert!(visible.sync(&manager));
        assert_eq!(visible.as_slice()[0].id(), id);
        assert!(!visible.sync(&manager));

        tokio::time::sleep(Duration::from_millis(1_001)).await;
        assert!(visible.sync(&manager));
        assert!(visible.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn starts_from_current_snapshot() {
        let manager = Manager::new(DwellInterval::default());
        manager.info("already there");

        let mut visible = VisibleToasts::new(&manager);
        assert_eq!(visible.len(), 1);
        assert!(!visible.sync(&manager));
    }
}
