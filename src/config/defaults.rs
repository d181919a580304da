// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration constants.
//!
//! The bounds themselves live with the validating newtypes in
//! [`crate::domain`]; this module re-states them under config names so the
//! settings file and the domain cannot drift apart.

use crate::domain::diagnostics::buffer_capacity_bounds;
use crate::domain::notification::dwell_bounds;

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Default time a toast stays on screen before expiring (in milliseconds).
pub const DEFAULT_DWELL_MS: u64 = dwell_bounds::DEFAULT_MS;

/// Minimum dwell interval (in milliseconds).
pub const MIN_DWELL_MS: u64 = dwell_bounds::MIN_MS;

/// Maximum dwell interval (in milliseconds).
pub const MAX_DWELL_MS: u64 = dwell_bounds::MAX_MS;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of lifecycle events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = buffer_capacity_bounds::DEFAULT;

/// Minimum diagnostics buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = buffer_capacity_bounds::MIN;

/// Maximum diagnostics buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = buffer_capacity_bounds::MAX;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dwell_bounds_are_ordered() {
        assert!(MIN_DWELL_MS <= DEFAULT_DWELL_MS);
        assert!(DEFAULT_DWELL_MS <= MAX_DWELL_MS);
    }

    #[test]
    fn diagnostics_bounds_are_ordered() {
        assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY <= DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY);
        assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
    }
}
