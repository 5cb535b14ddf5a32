//! Artifact packaging.

use std::fs;
use std::path::{Path, PathBuf};

use ship_platform::PlatformMatrix;
use tracing::info;

use crate::context::BuildContext;
use crate::error::Result;
use crate::exec;
use crate::target::BuildTarget;

/// Root of the per-platform artifact tree, relative to the working directory
const ARTIFACTS_DIR: &str = "artifacts";

/// Move the built binary into the canonical artifact directory
///
/// The directory is keyed `<os>-<goarch>` with the normalised architecture
/// spelling. The platform matrix is consulted again here as a second
/// validation barrier, so an unsupported pair can never produce a malformed
/// path even if it somehow got past resolution. After the move the artifact
/// is sanity-checked three ways, all fatal: `file` on it, a `-V` version
/// query, and the `fetch-7z-libs` dependency-fetch subcommand the release
/// binary must support.
pub fn package(ctx: &BuildContext, target: &BuildTarget, binary: &Path) -> Result<PathBuf> {
    PlatformMatrix::get().lookup(target.os, target.arch)?;

    let artifact_dir = ctx.cwd.join(ARTIFACTS_DIR).join(target.artifact_dir_key());
    fs::create_dir_all(&artifact_dir)?;

    let artifact = artifact_dir.join(target.binary_name());
    info!(from = %binary.display(), to = %artifact.display(), "packaging");
    fs::rename(binary, &artifact)?;

    let artifact_str = artifact.to_string_lossy();
    exec::run(ctx, "file", &[&artifact_str])?;
    exec::run(ctx, &artifact, &["-V"])?;
    exec::run(ctx, &artifact, &["fetch-7z-libs"])?;

    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use ship_platform::{Arch, Os};

    #[test]
    fn unsupported_pair_is_rejected_before_any_write() {
        let temp = tempfile::TempDir::new().unwrap();
        let ctx = BuildContext::new(temp.path());
        let target = BuildTarget {
            os: Os::Windows,
            arch: Arch::Arm64,
            user_specified_os: true,
            user_specified_arch: true,
        };

        let err = package(&ctx, &target, Path::new("/nonexistent/butler.exe")).unwrap_err();
        assert!(matches!(err, BuildError::Platform(_)));
        assert!(!temp.path().join(ARTIFACTS_DIR).exists());
    }
}
