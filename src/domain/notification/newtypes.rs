// SPDX-License-Identifier: MPL-2.0
//! Notification newtypes.
//!
//! This module provides type-safe wrappers for notification timing values,
//! ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// Dwell Bounds
// =============================================================================

/// Dwell interval bounds in milliseconds (500 ms to 60 s).
pub mod dwell_bounds {
    /// Minimum dwell interval.
    pub const MIN_MS: u64 = 500;
    /// Maximum dwell interval.
    pub const MAX_MS: u64 = 60_000;
    /// Default dwell interval.
    pub const DEFAULT_MS: u64 = 3_000;
}

// =============================================================================
// DwellInterval
// =============================================================================

/// Time a notification stays in the collection before automatic expiry.
///
/// The value is always within the valid range (500 ms–60 s), so a
/// misconfigured settings file can neither make toasts vanish instantly
/// nor keep them on screen indefinitely.
///
/// # Example
///
/// ```
/// use edu_toast::domain::notification::DwellInterval;
/// use std::time::Duration;
///
/// let dwell = DwellInterval::from_millis(4_000);
/// assert_eq!(dwell.as_duration(), Duration::from_secs(4));
///
/// // Values outside range are clamped
/// assert_eq!(DwellInterval::from_millis(10).millis(), 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DwellInterval(u64);

impl DwellInterval {
    /// Creates a dwell interval from milliseconds, clamping to valid range.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(millis.clamp(dwell_bounds::MIN_MS, dwell_bounds::MAX_MS))
    }

    /// Creates a dwell interval from a `Duration`, clamping to valid range.
    #[must_use]
    pub fn from_duration(duration: Duration) -> Self {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        Self::from_millis(millis)
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn millis(self) -> u64 {
        self.0
    }

    /// Returns the interval as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Returns true if this is the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= dwell_bounds::MIN_MS
    }

    /// Returns true if this is the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= dwell_bounds::MAX_MS
    }
}

impl Default for DwellInterval {
    fn default() -> Self {
        Self(dwell_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// Tests
// =============================================================================
