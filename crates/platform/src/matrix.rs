//! Static matrix of supported (os, arch) pairs and their build metadata

use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::error::PlatformError;
use crate::platform::{Arch, Os};

/// Per-architecture build metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchInfo {
    /// Extra segment to prepend to `PATH` before invoking the toolchain
    /// (MSYS2 bin directories on Windows)
    pub prepend_path: Option<&'static str>,
}

impl ArchInfo {
    const fn plain() -> Self {
        Self { prepend_path: None }
    }

    const fn with_path(path: &'static str) -> Self {
        Self {
            prepend_path: Some(path),
        }
    }
}

/// The set of (os, arch) pairs butler releases are built for
///
/// Built once at startup and never mutated. Both the platform resolver and
/// the packager query it by exact key, each with explicit not-found handling,
/// so an unsupported pair can never slip past either stage.
#[derive(Debug)]
pub struct PlatformMatrix {
    entries: BTreeMap<Os, BTreeMap<Arch, ArchInfo>>,
}

static MATRIX: LazyLock<PlatformMatrix> = LazyLock::new(PlatformMatrix::new);

impl PlatformMatrix {
    fn new() -> Self {
        let mut entries: BTreeMap<Os, BTreeMap<Arch, ArchInfo>> = BTreeMap::new();

        entries.insert(
            Os::Windows,
            BTreeMap::from([
                (Arch::I686, ArchInfo::with_path("/mingw32/bin")),
                (Arch::X86_64, ArchInfo::with_path("/mingw64/bin")),
            ]),
        );
        entries.insert(
            Os::Linux,
            BTreeMap::from([
                (Arch::X86_64, ArchInfo::plain()),
                (Arch::Arm64, ArchInfo::plain()),
            ]),
        );
        entries.insert(
            Os::Darwin,
            BTreeMap::from([
                (Arch::X86_64, ArchInfo::plain()),
                (Arch::Arm64, ArchInfo::plain()),
            ]),
        );

        Self { entries }
    }

    /// Returns the process-wide matrix
    pub fn get() -> &'static PlatformMatrix {
        &MATRIX
    }

    /// Look up the metadata for an (os, arch) pair
    ///
    /// A miss on either level of the table is an `UnsupportedTarget` error
    /// carrying the offending pair.
    pub fn lookup(&self, os: Os, arch: Arch) -> Result<&ArchInfo, PlatformError> {
        self.entries
            .get(&os)
            .and_then(|arches| arches.get(&arch))
            .ok_or(PlatformError::UnsupportedTarget { os, arch })
    }

    /// Whether the pair is buildable at all
    pub fn supports(&self, os: Os, arch: Arch) -> bool {
        self.lookup(os, arch).is_ok()
    }
}
