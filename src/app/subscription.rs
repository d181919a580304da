// SPDX-License-Identifier: MPL-2.0
//! Subscriptions for the demo host.

use super::Message;
use iced::{time, Subscription};
use std::time::Duration;

/// Redraw interval while toasts are on screen.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Creates a periodic tick subscription so expired toasts disappear from the
/// screen. Idle when nothing is shown.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
