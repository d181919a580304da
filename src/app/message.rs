// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the demo host.

use crate::notifications::Severity;
use crate::ui::toast;
use std::time::Instant;
use tokio::runtime::Handle;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Raise a sample notification of the given severity.
    Raise(Severity),
    /// Remove every active notification.
    ClearAll,
    /// Forwarded from the toast overlay.
    Toast(toast::Message),
    /// Periodic tick while notifications are visible.
    Tick(Instant),
}

/// Runtime flags passed from `main.rs` into the application boot.
#[derive(Debug, Clone)]
pub struct Flags {
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `EDU_TOAST_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Runtime the notification manager schedules expiry tasks on.
    pub runtime: Handle,
}
