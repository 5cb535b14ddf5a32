//! Error types for ship-core

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BuildError>;

/// Errors that can occur while running the build pipeline
///
/// Configuration problems (`Platform`) are detected before any side effect.
/// Subprocess failures (`Toolchain`, `Spawn`) are always fatal and never
/// retried. `GlibcCheck` is the one conditional case: it is only raised when
/// the pipeline runs under CI, and is downgraded to a warning otherwise.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Platform(#[from] ship_platform::PlatformError),

    #[error("Command `{command}` failed ({status})")]
    Toolchain { command: String, status: ExitStatus },

    #[error("Failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("glibc compatibility check failed: {0}")]
    GlibcCheck(#[source] Box<BuildError>),

    #[error("Build succeeded but produced no binary at {}", .path.display())]
    MissingArtifact { path: PathBuf },

    #[error("{stage}: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: Box<BuildError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildError {
    /// Tag this error with the pipeline stage it came from
    pub(crate) fn in_stage(self, stage: &'static str) -> Self {
        BuildError::Stage {
            stage,
            source: Box::new(self),
        }
    }
}
