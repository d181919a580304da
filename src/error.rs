// SPDX-License-Identifier: MPL-2.0
//! Crate-level error type.
//!
//! The notification manager itself is infallible; errors only arise from the
//! configuration layer (file I/O and TOML handling).

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
