// SPDX-License-Identifier: MPL-2.0
//! `edu_toast` is the ephemeral notification (toast) manager of an
//! education-platform client.
//!
//! Call sites raise success/error/warning/info notifications through a
//! cheap [`Notifier`](notifications::Notifier); each notification expires on
//! its own after a fixed dwell interval unless the user dismisses it first.
//! The [`ui::toast`] overlay renders the manager's snapshot with iced, and the
//! [`access`] module holds the role gate used at the request boundary.

pub mod access;
pub mod app;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod notifications;
pub mod ui;
