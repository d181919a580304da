// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for notification lifecycle tracking.
//!
//! Every raise and every removal of a notification can be recorded, together
//! with severity fallbacks and role-gate denials. Events carry no message
//! text, only ids and tags.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::access::DenyReason;
use crate::notifications::{NotificationId, Severity};

/// Why a notification left the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReason {
    /// Explicit `dismiss(id)` call, usually from the close button.
    Dismissed,
    /// The dwell interval elapsed.
    Expired,
    /// `clear()` removed every notification.
    Cleared,
    /// The manager was torn down.
    Teardown,
}

/// A single diagnostic event with its timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    /// The type and data of the event
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A notification entered the collection.
    Raised {
        id: NotificationId,
        severity: Severity,
        dwell_ms: u64,
    },

    /// A notification left the collection.
    Removed {
        id: NotificationId,
        severity: Severity,
        reason: RemovalReason,
        /// How long the record was alive, in milliseconds.
        lifetime_ms: u64,
    },

    /// A raise used a severity tag outside the recognized set.
    SeverityFallback { tag: String },

    /// The role gate rejected a request.
    AccessDenied { reason: DenyReason },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_serializes_with_type_tag() {
        let kind = DiagnosticEventKind::SeverityFallback {
            tag: "critical".to_string(),
        };
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["type"], "severity_fallback");
        assert_eq!(json["tag"], "critical");
    }

    #[test]
    fn removal_reason_serializes_snake_case() {
        let json = serde_json::to_string(&RemovalReason::Expired).unwrap();
        assert_eq!(json, "\"expired\"");
    }
}
