//! Core pipeline for the shipwright build orchestrator
//!
//! Builds, validates, signs, packages and smoke-tests a butler release for a
//! single (os, arch) target. The pipeline is strictly sequential: each stage
//! either mutates the shared [`BuildContext`] or produces a file artifact the
//! next stage consumes, and the first fatal error stops everything.

mod build;
mod context;
mod envcfg;
mod error;
mod exec;
mod package;
mod pipeline;
mod sign;
mod smoke;
mod target;
mod validate;
mod version;

pub use context::BuildContext;
pub use error::{BuildError, Result};
pub use pipeline::{BuildOptions, BuildSummary, run};
pub use target::BuildTarget;
pub use version::VersionInfo;

/// Base name of the binary the pipeline produces
pub const BINARY_BASENAME: &str = "butler";
