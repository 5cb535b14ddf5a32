//! Target OS and architecture enums

use std::fmt;
use std::str::FromStr;

use crate::error::PlatformError;

/// Operating system a butler release can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Os {
    Windows,
    Linux,
    Darwin,
}

impl Os {
    /// Detect the host operating system at runtime
    ///
    /// Returns `None` when the host is not one of the three OSes butler
    /// ships for.
    pub fn host() -> Option<Self> {
        match std::env::consts::OS {
            "windows" => Some(Os::Windows),
            "linux" => Some(Os::Linux),
            "macos" => Some(Os::Darwin),
            _ => None,
        }
    }

    /// Returns the OS name as used in `GOOS` and artifact directory keys
    pub const fn as_str(&self) -> &'static str {
        match self {
            Os::Windows => "windows",
            Os::Linux => "linux",
            Os::Darwin => "darwin",
        }
    }

    /// Executable suffix for binaries built for this OS
    pub const fn exe_suffix(&self) -> &'static str {
        match self {
            Os::Windows => ".exe",
            _ => "",
        }
    }

    /// Separator used in this OS's `PATH`-style environment variables
    pub const fn path_list_separator(&self) -> char {
        match self {
            Os::Windows => ';',
            _ => ':',
        }
    }
}

impl FromStr for Os {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "windows" => Ok(Os::Windows),
            "linux" => Ok(Os::Linux),
            "darwin" => Ok(Os::Darwin),
            other => Err(PlatformError::UnsupportedOs(other.to_string())),
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// CPU architecture a butler release can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Arch {
    I686,
    X86_64,
    Arm64,
}

impl Arch {
    /// Detect the host architecture at runtime
    pub fn host() -> Option<Self> {
        match std::env::consts::ARCH {
            "x86" => Some(Arch::I686),
            "x86_64" => Some(Arch::X86_64),
            "aarch64" => Some(Arch::Arm64),
            _ => None,
        }
    }

    /// Returns the user-facing architecture name (the `--arch` spelling)
    pub const fn as_str(&self) -> &'static str {
        match self {
            Arch::I686 => "i686",
            Arch::X86_64 => "x86_64",
            Arch::Arm64 => "arm64",
        }
    }

    /// Returns the Go toolchain's spelling of this architecture
    ///
    /// This short form is what `GOARCH` expects and what the artifact
    /// directory key uses, so `x86_64` becomes `amd64` rather than the
    /// user-facing name.
    pub const fn go_arch(&self) -> &'static str {
        match self {
            Arch::I686 => "386",
            Arch::X86_64 => "amd64",
            Arch::Arm64 => "arm64",
        }
    }
}

impl FromStr for Arch {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "i686" => Ok(Arch::I686),
            "x86_64" => Ok(Arch::X86_64),
            "arm64" => Ok(Arch::Arm64),
            other => Err(PlatformError::UnsupportedArch(other.to_string())),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
