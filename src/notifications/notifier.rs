// SPDX-License-Identifier: MPL-2.0
//! Cloneable capability handle for raising notifications.
//!
//! A [`Notifier`] is what call sites receive instead of the manager itself.
//! It does not keep the manager alive: once the owning [`Manager`] is torn
//! down, raises return `None` and dismissals do nothing.
//!
//! [`Manager`]: super::Manager

use std::sync::{Arc, Weak};

use super::manager::Shared;
use super::notification::{NotificationId, Severity};
use crate::diagnostics::RemovalReason;

#[derive(Clone)]
pub struct Notifier {
    shared: Weak<Shared>,
}

impl Notifier {
    pub(crate) fn new(shared: Weak<Shared>) -> Self {
        Self { shared }
    }

    fn upgrade(&self) -> Option<Arc<Shared>> {
        self.shared.upgrade()
    }

    /// Raises a notification with the manager's dwell interval.
    ///
    /// Returns `None` if the manager has been torn down.
    pub fn raise(&self, message: impl Into<String>, severity: Severity) -> Option<NotificationId> {
        let shared = self.upgrade()?;
        let dwell = shared.dwell_interval();
        shared.raise(message.into(), severity, dwell)
    }

    /// Raises a notification from a free-form severity tag; unknown tags become `Info`.
    pub fn raise_tagged(&self, message: impl Into<String>, tag: &str) -> Option<NotificationId> {
        self.upgrade()?.raise_tagged(message.into(), tag)
    }

    pub fn success(&self, message: impl Into<String>) -> Option<NotificationId> {
        self.raise(message, Severity::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> Option<NotificationId> {
        self.raise(message, Severity::Error)
    }

    pub fn warning(&self, message: impl Into<String>) -> Option<NotificationId> {
        self.raise(message, Severity::Warning)
    }

    pub fn info(&self, message: impl Into<String>) -> Option<NotificationId> {
        self.raise(message, Severity::Info)
    }

    /// Dismisses a notification. Returns `true` only if this call removed it.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        self.upgrade()
            .is_some_and(|shared| shared.remove(id, RemovalReason::Dismissed))
    }

    /// Returns `true` while the owning manager is alive.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.shared.strong_count() > 0
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("connected", &self.is_connected())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::DwellInterval;
    use crate::notifications::Manager;

    #[tokio::test(start_paused = true)]
    async fn notifier_raises_into_owning_manager() {
        let manager = Manager::new(DwellInterval::default());
        let notifier = manager.notifier();

        let id = notifier.success("Upload complete").unwrap();
        let snapshot = manager.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id(), id);
        assert_eq!(snapshot[0].severity(), Severity::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn clones_share_the_same_collection() {
        let manager = Manager::new(DwellInterval::default());
        let first = manager.notifier();
        let second = first.clone();

        let id = first.warning("from first").unwrap();
        assert!(second.dismiss(id));
        assert!(!first.dismiss(id));
        assert!(manager.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn notifier_is_inert_after_teardown() {
        let manager = Manager::new(DwellInterval::default());
        let notifier = manager.notifier();
        let id = notifier.info("before").unwrap();

        manager.shutdown();

        assert!(!notifier.is_connected());
        assert_eq!(notifier.error("after"), None);
        assert!(!notifier.dismiss(id));
    }

    #[tokio::test(start_paused = true)]
    async fn notifier_tag_fallback() {
        let manager = Manager::new(DwellInterval::default());
        let id = manager.notifier().raise_tagged("x", "nope").unwrap();
        assert_eq!(manager.get(id).unwrap().severity(), Severity::Info);
    }
}
