// SPDX-License-Identifier: MPL-2.0
//! Ephemeral notification (toast) system.
//!
//! Notifications are raised by arbitrary call sites, expire on their own
//! after a fixed dwell interval, and can be dismissed early by the user.
//!
//! # Components
//!
//! - `notification` - `Notification` record, `NotificationId` and `Severity`
//! - `manager` - `Manager` owning the collection and its expiry timers
//! - `notifier` - `Notifier`, the cloneable capability handle for call sites
//!
//! # Usage
//!
//! ```ignore
//! use edu_toast::notifications::Manager;
//!
//! let manager = Manager::new(config.notifications.dwell());
//! let notifier = manager.notifier();
//!
//! // Anywhere in the client
//! notifier.success("Upload complete");
//!
//! // Render surface
//! for notification in manager.snapshot() { /* draw */ }
//! ```

mod manager;
mod notification;
mod notifier;

pub use manager::Manager;
pub use notification::{Notification, NotificationId, Severity};
pub use notifier::Notifier;
