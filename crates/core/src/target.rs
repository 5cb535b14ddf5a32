//! Build target resolution.
//!
//! Merges command-line overrides with host auto-detection and validates the
//! resulting (os, arch) pair against the platform matrix before any stage
//! gets to mutate the environment or touch the toolchain.

use ship_platform::{Arch, Os, PlatformError, PlatformMatrix};
use tracing::info;

use crate::BINARY_BASENAME;
use crate::error::Result;

/// Architecture used when `--arch` is not given
pub const DEFAULT_ARCH: Arch = Arch::X86_64;

/// The (os, arch) pair a single invocation builds for
///
/// Immutable once resolved. The `user_specified_*` flags only feed logging,
/// so operators can tell an override from auto-detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildTarget {
    pub os: Os,
    pub arch: Arch,
    pub user_specified_os: bool,
    pub user_specified_arch: bool,
}

impl BuildTarget {
    /// Resolve overrides against host detection and validate the pair
    pub fn resolve(os: Option<Os>, arch: Option<Arch>) -> Result<Self> {
        let (os, user_specified_os) = match os {
            Some(os) => (os, true),
            None => {
                let host = Os::host().ok_or_else(|| {
                    PlatformError::UnknownHostOs(std::env::consts::OS.to_string())
                })?;
                (host, false)
            }
        };
        let (arch, user_specified_arch) = match arch {
            Some(arch) => (arch, true),
            None => (DEFAULT_ARCH, false),
        };

        if user_specified_os {
            info!(os = %os, "using user-specified OS");
        } else {
            info!(os = %os, "using detected OS (use --os to override)");
        }
        if user_specified_arch {
            info!(arch = %arch, "using user-specified arch");
        } else {
            info!(arch = %arch, "using default arch (use --arch to override)");
        }

        PlatformMatrix::get().lookup(os, arch)?;

        Ok(Self {
            os,
            arch,
            user_specified_os,
            user_specified_arch,
        })
    }

    /// Name of the executable the toolchain emits for this target
    pub fn binary_name(&self) -> String {
        format!("{}{}", BINARY_BASENAME, self.os.exe_suffix())
    }

    /// Directory key under `artifacts/`, using the Go arch spelling
    pub fn artifact_dir_key(&self) -> String {
        format!("{}-{}", self.os, self.arch.go_arch())
    }
}
