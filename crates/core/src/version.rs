//! Version resolution and linker-flag assembly.
//!
//! The version/timestamp/commit triple is computed once, before the compiler
//! starts, and embedded verbatim into the binary through Go linker symbol
//! overrides on the buildinfo package.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::context::BuildContext;

/// Branch that releases are cut from; builds of it get the sentinel version
pub const DEFAULT_BRANCH: &str = "master";

/// Version string used when the invocation context names no tag or branch
pub const VERSION_SENTINEL: &str = "head";

/// Go package whose symbols receive the embedded build info
const BUILDINFO_PACKAGE: &str = "github.com/itchio/butler/buildinfo";

/// The triple embedded into the compiled binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: String,
    /// Unix seconds, sampled once at resolution time
    pub built_at: u64,
    pub commit: String,
}

impl VersionInfo {
    /// Resolve version info from the invocation context
    pub fn resolve(ctx: &BuildContext) -> Self {
        let built_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        Self::resolve_at(ctx, built_at)
    }

    /// Resolution with an explicit timestamp, shared with tests
    pub(crate) fn resolve_at(ctx: &BuildContext, built_at: u64) -> Self {
        let version = match (ctx.ref_type.as_deref(), ctx.ref_name.as_deref()) {
            (Some("tag"), Some(tag)) => strip_tag_prefix(tag).to_string(),
            (_, Some(branch)) if branch != DEFAULT_BRANCH => branch.to_string(),
            _ => VERSION_SENTINEL.to_string(),
        };
        let commit = ctx.commit.clone().unwrap_or_default();

        debug!(version = %version, built_at, commit = %commit, "resolved version info");

        Self {
            version,
            built_at,
            commit,
        }
    }

    /// Assemble the `-ldflags` value embedding this triple
    ///
    /// `-w -s` strip DWARF and symbol tables from the release binary.
    pub fn ldflags(&self) -> String {
        format!(
            "-X {pkg}.Version={} -X {pkg}.BuiltAt={} -X {pkg}.Commit={} -w -s",
            self.version,
            self.built_at,
            self.commit,
            pkg = BUILDINFO_PACKAGE,
        )
    }
}

/// Strip the conventional `v` prefix from semver release tags
fn strip_tag_prefix(tag: &str) -> &str {
    match tag.strip_prefix('v') {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
        _ => tag,
    }
}
