//! Compiler invocation.

use std::path::PathBuf;

use ship_platform::Os;
use tracing::info;

use crate::context::BuildContext;
use crate::error::{BuildError, Result};
use crate::exec;
use crate::target::BuildTarget;
use crate::version::VersionInfo;

/// Log the toolchain version before building
///
/// A broken PATH (bad prepension, missing MSYS2 install) surfaces here with
/// a clear message instead of halfway through the compile.
pub fn preflight(ctx: &BuildContext) -> Result<()> {
    info!("showing tool versions");
    exec::run(ctx, "go", &["version"])
}

/// Compile the butler binary for `target`
///
/// Windows builds first compile the resource manifest into a linkable
/// object, which `go build` picks up by its `.syso` extension. Returns the
/// path of the freshly built executable in the working directory.
pub fn compile(ctx: &BuildContext, target: &BuildTarget, version: &VersionInfo) -> Result<PathBuf> {
    if target.os == Os::Windows {
        info!("compiling Windows manifest");
        exec::run(ctx, "windres", &["-o", "butler.syso", "butler.rc"])?;
    }

    info!(version = %version.version, "compiling binary");
    exec::run(ctx, "go", &["build", "-ldflags", &version.ldflags()])?;

    let binary = ctx.cwd.join(target.binary_name());
    if !binary.is_file() {
        return Err(BuildError::MissingArtifact { path: binary });
    }
    Ok(binary)
}
