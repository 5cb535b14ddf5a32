//! Platform resolution for the shipwright build orchestrator
//!
//! This crate provides:
//! - Target OS and architecture enums, with host detection and flag parsing
//! - The static matrix of (os, arch) pairs a butler release can be built for
//! - Per-architecture build metadata (extra search-path segments)

mod error;
mod matrix;
mod platform;

pub use error::PlatformError;
pub use matrix::{ArchInfo, PlatformMatrix};
pub use platform::{Arch, Os};
