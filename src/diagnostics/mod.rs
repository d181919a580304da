// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for notification lifecycle events.
//!
//! Lifecycle events (raise, removal, severity fallback, access denial) are
//! sent through a cheap, non-blocking [`DiagnosticsHandle`] and stored in a
//! memory-bounded [`CircularBuffer`] owned by the [`DiagnosticsCollector`].

mod buffer;
mod collector;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind, RemovalReason};
