// SPDX-License-Identifier: MPL-2.0
//! UI components for rendering notifications.

pub mod design_tokens;
pub mod toast;
