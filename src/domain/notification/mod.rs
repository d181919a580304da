// SPDX-License-Identifier: MPL-2.0
//! Notification domain types.
//!
//! - [`DwellInterval`]: How long a notification stays before it expires

mod newtypes;

pub use newtypes::{dwell_bounds, DwellInterval};
