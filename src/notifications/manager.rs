// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The [`Manager`] owns the ordered collection of active notifications and
//! one expiry task per record. Every mutation (raise, dismiss, expiry, clear,
//! teardown) goes through a single lock held for short, non-awaiting
//! sections, so mutations are serialized and removal is keyed by id: the
//! first remover wins and every later attempt is a no-op.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::AbortHandle;

use super::notification::{Notification, NotificationId, Severity};
use super::notifier::Notifier;
use crate::diagnostics::{DiagnosticsHandle, RemovalReason};
use crate::domain::notification::DwellInterval;

/// An active record plus the handle of its pending expiry task.
struct Entry {
    notification: Notification,
    expiry: AbortHandle,
}

#[derive(Default)]
struct State {
    /// Active notifications, oldest first.
    active: Vec<Entry>,
    /// Set on teardown; raises are refused afterwards.
    closed: bool,
    diagnostics: Option<DiagnosticsHandle>,
}

/// State shared between the manager, its notifiers and its expiry tasks.
///
/// Only [`Manager`] holds a strong reference for longer than a call; expiry
/// tasks and notifiers hold weak ones.
pub(crate) struct Shared {
    state: Mutex<State>,
    dwell: DwellInterval,
    runtime: Handle,
    revision: watch::Sender<u64>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        // A panic while holding the lock cannot leave the Vec half-updated.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn dwell_interval(&self) -> DwellInterval {
        self.dwell
    }

    fn bump_revision(&self) {
        self.revision.send_modify(|revision| *revision = revision.wrapping_add(1));
    }

    pub(crate) fn raise(
        self: &Arc<Self>,
        message: String,
        severity: Severity,
        dwell: DwellInterval,
    ) -> Option<NotificationId> {
        let mut state = self.lock();
        if state.closed {
            tracing::debug!(%severity, "raise after teardown ignored");
            return None;
        }

        let notification = Notification::new(severity, message, dwell);
        let id = notification.id();
        debug_assert!(
            state.active.iter().all(|entry| entry.notification.id() != id),
            "duplicate notification id {id}"
        );

        // Deadline is fixed now, not when the task is first polled.
        let deadline = tokio::time::Instant::now() + dwell.as_duration();
        let weak = Arc::downgrade(self);
        let expiry = self
            .runtime
            .spawn(async move {
                tokio::time::sleep_until(deadline).await;
                if let Some(shared) = weak.upgrade() {
                    shared.remove(id, RemovalReason::Expired);
                }
            })
            .abort_handle();

        // A shut-down runtime cancels the task on spawn; such a record could never expire.
        if expiry.is_finished() {
            tracing::warn!(%id, "expiry runtime is shut down, notification refused");
            return None;
        }

        if let Some(diagnostics) = &state.diagnostics {
            diagnostics.log_raised(id, severity, dwell.as_duration());
        }
        state.active.push(Entry {
            notification,
            expiry,
        });
        drop(state);

        tracing::debug!(%id, %severity, dwell_ms = dwell.millis(), "notification raised");
        self.bump_revision();
        Some(id)
    }

    pub(crate) fn raise_tagged(self: &Arc<Self>, message: String, tag: &str) -> Option<NotificationId> {
        let severity = match Severity::recognize(tag) {
            Some(severity) => severity,
            None => {
                tracing::debug!(tag, "unrecognized severity, falling back to info");
                if let Some(diagnostics) = &self.lock().diagnostics {
                    diagnostics.log_severity_fallback(tag);
                }
                Severity::Info
            }
        };
        self.raise(message, severity, self.dwell)
    }

    pub(crate) fn remove(&self, id: NotificationId, reason: RemovalReason) -> bool {
        let mut state = self.lock();
        let Some(position) = state
            .active
            .iter()
            .position(|entry| entry.notification.id() == id)
        else {
            return false;
        };

        let entry = state.active.remove(position);
        if reason != RemovalReason::Expired {
            entry.expiry.abort();
        }
        if let Some(diagnostics) = &state.diagnostics {
            diagnostics.log_removed(
                id,
                entry.notification.severity(),
                reason,
                entry.notification.age(),
            );
        }
        drop(state);

        tracing::debug!(%id, ?reason, "notification removed");
        self.bump_revision();
        true
    }

    /// Removes every record and cancels every timer. Returns how many were removed.
    fn drain(&self, reason: RemovalReason, close: bool) -> usize {
        let mut state = self.lock();
        state.closed |= close;
        let drained = std::mem::take(&mut state.active);
        for entry in &drained {
            entry.expiry.abort();
            if let Some(diagnostics) = &state.diagnostics {
                diagnostics.log_removed(
                    entry.notification.id(),
                    entry.notification.severity(),
                    reason,
                    entry.notification.age(),
                );
            }
        }
        drop(state);

        if !drained.is_empty() {
            self.bump_revision();
        }
        drained.len()
    }
}

/// Owner of the active-notification collection.
///
/// Raise operations return immediately; each record expires on its own after
/// the dwell interval unless dismissed first. Dropping the manager cancels
/// every outstanding expiry task.
///
/// # Example
///
/// ```
/// use edu_toast::domain::notification::DwellInterval;
/// use edu_toast::notifications::{Manager, Severity};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let manager = Manager::new(DwellInterval::default());
///
/// let id = manager.success("Upload complete");
/// assert_eq!(manager.snapshot()[0].severity(), Severity::Success);
///
/// manager.dismiss(id);
/// assert!(manager.snapshot().is_empty());
/// # }
/// ```
pub struct Manager {
    shared: Arc<Shared>,
}

impl Manager {
    /// Creates a manager scheduling expiry on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a tokio runtime. Use
    /// [`Manager::with_runtime`] to pass a handle explicitly.
    #[must_use]
    pub fn new(dwell: DwellInterval) -> Self {
        Self::with_runtime(dwell, Handle::current())
    }

    /// Creates a manager scheduling expiry on the given runtime.
    ///
    /// Once that runtime shuts down, raises are refused: the returned id
    /// names nothing and no record is stored.
    #[must_use]
    pub fn with_runtime(dwell: DwellInterval, runtime: Handle) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State::default()),
                dwell,
                runtime,
                revision,
            }),
        }
    }

    /// Sets the diagnostics handle for lifecycle events.
    pub fn set_diagnostics(&self, handle: DiagnosticsHandle) {
        self.shared.lock().diagnostics = Some(handle);
    }

    /// Returns the dwell interval applied by [`Manager::raise`].
    #[must_use]
    pub fn dwell(&self) -> DwellInterval {
        self.shared.dwell
    }

    /// Appends a notification and schedules its expiry.
    pub fn raise(&self, message: impl Into<String>, severity: Severity) -> NotificationId {
        self.raise_with_dwell(message, severity, self.shared.dwell)
    }

    /// Appends a notification whose severity is given as a free-form tag.
    ///
    /// Unrecognized tags are treated as [`Severity::Info`].
    pub fn raise_tagged(&self, message: impl Into<String>, tag: &str) -> NotificationId {
        // Only reached when the expiry runtime is gone, see `with_runtime`.
        self.shared
            .raise_tagged(message.into(), tag)
            .unwrap_or_else(NotificationId::next)
    }

    /// Appends a notification that expires after `dwell` instead of the
    /// manager-wide interval.
    pub fn raise_with_dwell(
        &self,
        message: impl Into<String>,
        severity: Severity,
        dwell: DwellInterval,
    ) -> NotificationId {
        // The owner is never closed while it is alive, so the fallback only
        // covers a shut-down expiry runtime. The id is unique and names nothing.
        self.shared
            .raise(message.into(), severity, dwell)
            .unwrap_or_else(NotificationId::next)
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.raise(message, Severity::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationId {
        self.raise(message, Severity::Error)
    }

    pub fn warning(&self, message: impl Into<String>) -> NotificationId {
        self.raise(message, Severity::Warning)
    }

    pub fn info(&self, message: impl Into<String>) -> NotificationId {
        self.raise(message, Severity::Info)
    }

    /// Removes a notification and cancels its expiry.
    ///
    /// Returns `true` if the notification was found and removed. Unknown or
    /// already-removed ids are a no-op.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        self.shared.remove(id, RemovalReason::Dismissed)
    }

    /// Removes all notifications and cancels their timers. The manager stays usable.
    pub fn clear(&self) {
        let removed = self.shared.drain(RemovalReason::Cleared, false);
        tracing::debug!(removed, "notifications cleared");
    }

    /// Returns the active notifications in insertion order (oldest first).
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.shared
            .lock()
            .active
            .iter()
            .map(|entry| entry.notification.clone())
            .collect()
    }

    /// Returns a copy of the notification with the given id, if still active.
    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<Notification> {
        self.shared
            .lock()
            .active
            .iter()
            .find(|entry| entry.notification.id() == id)
            .map(|entry| entry.notification.clone())
    }

    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.lock().active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.lock().active.is_empty()
    }

    /// Subscribes to collection changes.
    ///
    /// The value is a revision counter bumped after every mutation. Render
    /// surfaces check `has_changed()` on their frame tick (or await
    /// `changed()`) and only then call [`Manager::snapshot`].
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.revision.subscribe()
    }

    /// Returns a cloneable capability handle for arbitrary call sites.
    #[must_use]
    pub fn notifier(&self) -> Notifier {
        Notifier::new(Arc::downgrade(&self.shared))
    }

    /// Tears the manager down, cancelling every outstanding expiry task.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for Manager {
    fn drop(&mut self) {
        let removed = self.shared.drain(RemovalReason::Teardown, true);
        tracing::debug!(removed, "notification manager torn down");
    }
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("dwell", &self.shared.dwell)
            .field("active", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{BufferCapacity, DiagnosticEventKind, DiagnosticsCollector};
    use std::time::Duration;

    const DWELL_MS: u64 = 1_000;

    fn manager() -> Manager {
        Manager::new(DwellInterval::from_millis(DWELL_MS))
    }

    fn messages(manager: &Manager) -> Vec<String> {
        manager
            .snapshot()
            .iter()
            .map(|n| n.message().to_string())
            .collect()
    }

    fn removals(collector: &mut DiagnosticsCollector) -> Vec<(NotificationId, RemovalReason)> {
        collector.process_pending();
        collector
            .iter()
            .filter_map(|event| match event.kind {
                DiagnosticEventKind::Removed { id, reason, .. } => Some((id, reason)),
                _ => None,
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn new_manager_is_empty() {
        let manager = manager();
        assert!(manager.is_empty());
        assert_eq!(manager.len(), 0);
        assert!(manager.snapshot().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn raise_appends_in_insertion_order() {
        let manager = manager();
        manager.info("first");
        manager.warning("second");
        manager.error("third");

        assert_eq!(messages(&manager), vec!["first", "second", "third"]);
    }

    #[tokio::test(start_paused = true)]
    async fn capability_surface_sets_severity() {
        let manager = manager();
        let ids = [
            manager.success("s"),
            manager.error("e"),
            manager.warning("w"),
            manager.info("i"),
        ];

        let severities: Vec<_> = ids
            .iter()
            .map(|id| manager.get(*id).unwrap().severity())
            .collect();
        assert_eq!(severities, Severity::ALL.to_vec());
    }

    #[tokio::test(start_paused = true)]
    async fn returned_ids_are_pairwise_distinct() {
        let manager = manager();
        let mut ids: Vec<_> = (0..50).map(|i| manager.info(format!("n{i}"))).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_removes_and_keeps_relative_order() {
        let manager = manager();
        manager.info("A");
        let b = manager.info("B");
        manager.info("C");

        assert!(manager.dismiss(b));
        assert_eq!(messages(&manager), vec!["A", "C"]);
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_is_idempotent() {
        let manager = manager();
        let id = manager.success("done");

        assert!(manager.dismiss(id));
        assert!(!manager.dismiss(id));
        assert!(manager.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_unknown_id_is_noop() {
        let manager = manager();
        manager.info("kept");

        assert!(!manager.dismiss(NotificationId::next()));
        assert_eq!(manager.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn record_expires_after_dwell() {
        let manager = manager();
        let id = manager.info("short lived");

        tokio::time::sleep(Duration::from_millis(DWELL_MS - 1)).await;
        assert!(manager.contains(id));

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!manager.contains(id));
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_after_expiry_is_noop() {
        let manager = manager();
        let id = manager.info("gone");

        tokio::time::sleep(Duration::from_millis(DWELL_MS + 10)).await;
        assert!(!manager.dismiss(id));
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_cancels_expiry() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        let manager = manager();
        manager.set_diagnostics(collector.handle());

        let id = manager.info("dismissed early");
        manager.dismiss(id);
        tokio::time::sleep(Duration::from_millis(DWELL_MS * 2)).await;

        assert_eq!(
            removals(&mut collector),
            vec![(id, RemovalReason::Dismissed)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn racing_dismiss_and_expiry_remove_exactly_once() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        let manager = manager();
        manager.set_diagnostics(collector.handle());

        let id = manager.info("race");
        tokio::time::sleep(Duration::from_millis(DWELL_MS)).await;
        manager.dismiss(id);
        tokio::task::yield_now().await;

        assert!(manager.is_empty());
        assert_eq!(removals(&mut collector).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn raise_with_dwell_overrides_interval() {
        let manager = manager();
        let long = manager.raise_with_dwell(
            "long",
            Severity::Warning,
            DwellInterval::from_millis(DWELL_MS * 5),
        );
        let short = manager.info("short");

        tokio::time::sleep(Duration::from_millis(DWELL_MS + 1)).await;
        assert!(!manager.contains(short));
        assert!(manager.contains(long));

        tokio::time::sleep(Duration::from_millis(DWELL_MS * 4)).await;
        assert!(!manager.contains(long));
    }

    #[tokio::test(start_paused = true)]
    async fn raise_tagged_falls_back_to_info() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        let manager = manager();
        manager.set_diagnostics(collector.handle());

        let id = manager.raise_tagged("x", "bogus-severity");
        assert_eq!(manager.get(id).unwrap().severity(), Severity::Info);

        collector.process_pending();
        assert!(collector.iter().any(|event| event.kind
            == DiagnosticEventKind::SeverityFallback {
                tag: "bogus-severity".to_string()
            }));
    }

    #[tokio::test(start_paused = true)]
    async fn clear_cancels_all_timers() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        let manager = manager();
        manager.set_diagnostics(collector.handle());

        manager.info("a");
        manager.info("b");
        manager.clear();
        assert!(manager.is_empty());

        tokio::time::sleep(Duration::from_millis(DWELL_MS * 2)).await;
        let reasons: Vec<_> = removals(&mut collector).into_iter().map(|(_, r)| r).collect();
        assert_eq!(reasons, vec![RemovalReason::Cleared, RemovalReason::Cleared]);

        // Still usable afterwards.
        manager.info("c");
        assert_eq!(manager.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribe_sees_every_mutation() {
        let manager = manager();
        let mut revisions = manager.subscribe();
        assert!(!revisions.has_changed().unwrap());

        let id = manager.info("watched");
        assert!(revisions.has_changed().unwrap());
        revisions.borrow_and_update();

        manager.dismiss(id);
        assert!(revisions.has_changed().unwrap());
        revisions.borrow_and_update();

        manager.info("expiring");
        revisions.borrow_and_update();
        tokio::time::sleep(Duration::from_millis(DWELL_MS + 1)).await;
        assert!(revisions.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_cancels_pending_timers() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        let manager = manager();
        manager.set_diagnostics(collector.handle());
        manager.info("pending");

        manager.shutdown();
        tokio::time::sleep(Duration::from_millis(DWELL_MS * 2)).await;

        let reasons: Vec<_> = removals(&mut collector).into_iter().map(|(_, r)| r).collect();
        assert_eq!(reasons, vec![RemovalReason::Teardown]);
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_records_full_lifetime() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        let manager = manager();
        manager.set_diagnostics(collector.handle());
        manager.info("timed");

        tokio::time::sleep(Duration::from_millis(DWELL_MS + 1)).await;
        collector.process_pending();

        let lifetime = collector.iter().find_map(|event| match event.kind {
            DiagnosticEventKind::Removed {
                reason: RemovalReason::Expired,
                lifetime_ms,
                ..
            } => Some(lifetime_ms),
            _ => None,
        });
        assert_eq!(lifetime, Some(DWELL_MS));
    }

    #[test]
    fn raise_on_shut_down_runtime_stores_nothing() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let handle = runtime.handle().clone();
        drop(runtime);

        let manager = Manager::with_runtime(DwellInterval::from_millis(DWELL_MS), handle);
        let id = manager.info("never expires");

        assert!(!manager.contains(id));
        assert!(manager.is_empty());
        assert_eq!(manager.notifier().warning("refused"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn removals_survive_more_raises_than_one_drain_holds() {
        let capacity = BufferCapacity::default();
        let mut collector = DiagnosticsCollector::new(capacity);
        let manager = manager();
        manager.set_diagnostics(collector.handle());

        // Drain between batches the way a UI tick does.
        let batch = capacity.value() / 4;
        let mut raised = 0;
        for _ in 0..4 {
            for i in 0..batch {
                manager.info(format!("n{i}"));
            }
            raised += batch;
            collector.process_pending();
        }
        assert!(2 * raised > capacity.value());

        tokio::time::sleep(Duration::from_millis(DWELL_MS + 1)).await;
        assert!(manager.is_empty());
        assert_eq!(removals(&mut collector).len(), raised);
    }
}
