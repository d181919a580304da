// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects with ZERO external dependencies.
//!
//! # Modules
//!
//! - [`diagnostics`]: Diagnostics types ([`BufferCapacity`](diagnostics::BufferCapacity))
//! - [`notification`]: Notification timing ([`DwellInterval`](notification::DwellInterval))

pub mod diagnostics;
pub mod notification;
