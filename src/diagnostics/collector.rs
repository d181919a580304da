// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing lifecycle events.
//!
//! The collector receives events from the notification manager and the
//! role gate through a bounded channel and stores them in a circular buffer.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::Serialize;

use super::{BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind, RemovalReason};
use crate::access::DenyReason;
use crate::notifications::{NotificationId, Severity};

/// Handle for sending diagnostic events to the collector.
///
/// This handle is cheap to clone and can be shared across threads.
/// Events are sent via a bounded channel and dropped when it is full,
/// so logging never blocks a caller. The channel holds as many events as the
/// collector's buffer; call [`DiagnosticsCollector::process_pending`] before
/// that many events accumulate.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Logs an arbitrary event kind. Non-blocking.
    pub fn log(&self, kind: DiagnosticEventKind) {
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }

    /// Logs that a notification entered the collection.
    pub fn log_raised(&self, id: NotificationId, severity: Severity, dwell: Duration) {
        self.log(DiagnosticEventKind::Raised {
            id,
            severity,
            dwell_ms: duration_millis(dwell),
        });
    }

    /// Logs that a notification left the collection.
    pub fn log_removed(
        &self,
        id: NotificationId,
        severity: Severity,
        reason: RemovalReason,
        lifetime: Duration,
    ) {
        self.log(DiagnosticEventKind::Removed {
            id,
            severity,
            reason,
            lifetime_ms: duration_millis(lifetime),
        });
    }

    /// Logs that an unrecognized severity tag was coerced to `info`.
    pub fn log_severity_fallback(&self, tag: impl Into<String>) {
        self.log(DiagnosticEventKind::SeverityFallback { tag: tag.into() });
    }

    /// Logs a role-gate denial.
    pub fn log_access_denied(&self, reason: DenyReason) {
        self.log(DiagnosticEventKind::AccessDenied { reason });
    }

    /// Attempts to send an event, returning an error if the channel is full.
    ///
    /// # Errors
    ///
    /// Returns `TrySendError::Full` if the internal channel buffer is full,
    /// or `TrySendError::Disconnected` if the collector has been dropped.
    pub fn try_log(&self, kind: DiagnosticEventKind) -> Result<(), TrySendError<DiagnosticEvent>> {
        self.event_tx.try_send(DiagnosticEvent::new(kind))
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Central collector for diagnostic events.
///
/// Old events are evicted automatically once the buffer reaches capacity.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    /// When collection started (monotonic clock for relative timestamps).
    collection_started_at: Instant,
    /// When collection started (wall clock for report metadata).
    collection_started_at_utc: DateTime<Utc>,
}

impl DiagnosticsCollector {
    /// Creates a new diagnostics collector with the specified buffer capacity.
    ///
    /// The event channel is sized to the same capacity.
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(capacity.value());

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Drains the event channel into the buffer.
    ///
    /// Call this periodically (e.g., on each UI tick).
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns an iterator over all stored events (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Exports all stored events as a pretty-printed JSON report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        let events = self
            .buffer
            .iter()
            .map(|event| ReportEvent {
                offset_ms: duration_millis(
                    event
                        .timestamp
                        .saturating_duration_since(self.collection_started_at),
                ),
                kind: &event.kind,
            })
            .collect();

        let report = Report {
            collection_started_at: self.collection_started_at_utc.to_rfc3339(),
            event_count: self.buffer.len(),
            events,
        };
        serde_json::to_string_pretty(&report)
    }
}

#[derive(Serialize)]
struct Report<'a> {
    collection_started_at: String,
    event_count: usize,
    events: Vec<ReportEvent<'a>>,
}

#[derive(Serialize)]
struct ReportEvent<'a> {
    offset_ms: u64,
    #[serde(flatten)]
    kind: &'a DiagnosticEventKind,
}
