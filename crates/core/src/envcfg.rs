//! Environment configuration for the toolchain.
//!
//! Mutates the build context so every later subprocess sees the right search
//! path and cross-compilation variables. Mutations live for the rest of the
//! process; there is no rollback.

use ship_platform::{Arch, Os, PlatformMatrix};
use tracing::info;

use crate::context::BuildContext;
use crate::error::Result;
use crate::exec;
use crate::target::BuildTarget;

/// Minimum macOS version butler supports
const MACOS_VERSION_MIN: &str = "-mmacosx-version-min=10.10";

/// Prepare the context's environment for compiling `target`
///
/// - prepends the matrix entry's extra search-path segment (translated to a
///   host-native path on Windows, where the matrix stores MSYS2 paths)
/// - sets `GOOS`, `GOARCH` and `CGO_ENABLED` for the Go toolchain
/// - on darwin, sets the minimum-deployment-version compiler and linker
///   flags, adding `-arch x86_64` when cross-building for x86_64 from a
///   non-x86_64 host
pub fn configure(ctx: &mut BuildContext, target: &BuildTarget) -> Result<()> {
    let info = PlatformMatrix::get().lookup(target.os, target.arch)?;

    if let Some(segment) = info.prepend_path {
        let separator = target.os.path_list_separator();
        if target.os == Os::Windows {
            // The matrix stores MSYS2-style paths; translate before prepending
            let native = exec::run_captured(ctx, "cygpath", &["-w", segment])?;
            info!(msys = segment, native = %native, "prepending to PATH");
            ctx.prepend_path(&native, separator);
        } else {
            info!(segment, "prepending to PATH");
            ctx.prepend_path(segment, separator);
        }
    }

    ctx.set_env("GOOS", target.os.as_str());
    ctx.set_env("GOARCH", target.arch.go_arch());
    ctx.set_env("CGO_ENABLED", "1");

    if target.os == Os::Darwin {
        let mut flags = MACOS_VERSION_MIN.to_string();
        if target.arch == Arch::X86_64 && ctx.host_arch != Some(Arch::X86_64) {
            flags.push_str(" -arch x86_64");
        }
        ctx.set_env("CGO_CFLAGS", flags.clone());
        ctx.set_env("CGO_LDFLAGS", flags);
    }

    Ok(())
}
