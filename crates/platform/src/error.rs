//! Error types for ship-platform

use thiserror::Error;

use crate::platform::{Arch, Os};

/// Errors that can occur while resolving a build target
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Unsupported os '{0}' (expected windows, linux or darwin)")]
    UnsupportedOs(String),

    #[error("Unsupported arch '{0}' (expected i686, x86_64 or arm64)")]
    UnsupportedArch(String),

    #[error("Unsupported arch '{arch}' for os '{os}'")]
    UnsupportedTarget { os: Os, arch: Arch },

    #[error("Cannot build butler on host OS '{0}' (use --os to pick a target)")]
    UnknownHostOs(String),
}
