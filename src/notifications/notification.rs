// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` record and the `Severity` enum
//! shared by the manager, the diagnostics events and the render surface.

use crate::domain::notification::DwellInterval;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// Unique identifier for a notification.
///
/// Ids come from a process-wide monotonically increasing counter, so they
/// are never reused for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Allocates the next unique notification ID.
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Severity level of a notification.
///
/// The manager only stores and forwards the tag; styling is decided by the
/// render surface. Unknown tags degrade to [`Severity::Info`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Operation completed successfully.
    Success,
    /// Operation failed.
    Error,
    /// Something needs attention but did not fail.
    Warning,
    /// Informational message. Also the fallback for unknown tags.
    #[default]
    #[serde(other)]
    Info,
}

impl Severity {
    /// All recognized severities, in declaration order.
    pub const ALL: [Severity; 4] = [
        Severity::Success,
        Severity::Error,
        Severity::Warning,
        Severity::Info,
    ];

    /// Parses a severity tag, falling back to `Info` for anything unrecognized.
    ///
    /// Matching ignores surrounding whitespace and ASCII case.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        Self::recognize(tag).unwrap_or_else(|| {
            tracing::debug!(tag, "unrecognized severity, falling back to info");
            Severity::Info
        })
    }

    /// Returns the severity named by `tag`, or `None` if it is not one of the four kinds.
    #[must_use]
    pub fn recognize(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(tag))
    }

    /// Returns the canonical lowercase tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl FromStr for Severity {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An active notification record.
///
/// Records are created by the manager and are immutable afterwards; callers
/// only ever see clones handed out by `snapshot()` or `get()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message: String,
    created_at: Instant,
    dwell: DwellInterval,
}

impl Notification {
    pub(crate) fn new(severity: Severity, message: String, dwell: DwellInterval) -> Self {
        Self {
            id: NotificationId::next(),
            severity,
            message,
            created_at: Instant::now(),
            dwell,
        }
    }

    /// Returns the notification's unique ID.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the severity level.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the display text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns when this notification was created, on the clock expiry is scheduled against.
    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Returns the dwell interval this notification was scheduled with.
    #[must_use]
    pub fn dwell(&self) -> DwellInterval {
        self.dwell
    }

    /// Returns the age of this notification.
    #[must_use]
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Returns the time left before automatic expiry, saturating at zero.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.dwell.as_duration().saturating_sub(self.age())
    }
}
