//! The shared, mutable state a single build invocation runs against.
//!
//! Environment variables are inherently process-global for the subprocesses
//! we launch, but the orchestrator itself never touches `std::env` after
//! startup: the whole table is captured once into a [`BuildContext`] and
//! every stage reads and mutates that context instead. Subprocesses are
//! spawned with exactly this table, so unit tests can inject a fresh context
//! without process-wide side effects.

use std::collections::BTreeMap;
use std::path::PathBuf;

use ship_platform::Arch;

use crate::error::Result;

/// State threaded through every pipeline stage
///
/// One context serves exactly one build: mutations (PATH prepension, cross
/// compilation variables) are never rolled back, matching the one target per
/// process invocation model.
#[derive(Debug, Clone)]
pub struct BuildContext {
    env: BTreeMap<String, String>,
    /// Directory the toolchain runs in and the artifact tree is rooted at
    pub cwd: PathBuf,
    /// Invocation ref type (`tag` for tag builds), from `GITHUB_REF_TYPE`
    pub ref_type: Option<String>,
    /// Invocation ref name (tag or branch), from `GITHUB_REF_NAME`
    pub ref_name: Option<String>,
    /// Commit identifier, from `GITHUB_SHA`
    pub commit: Option<String>,
    /// Whether we are running in an automated pipeline (`CI` set)
    pub ci: bool,
    /// Architecture of the machine running the build, for cross-build flags
    pub host_arch: Option<Arch>,
}

impl BuildContext {
    /// Empty context rooted at `cwd`, with no invocation metadata
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            env: BTreeMap::new(),
            cwd: cwd.into(),
            ref_type: None,
            ref_name: None,
            commit: None,
            ci: false,
            host_arch: Arch::host(),
        }
    }

    /// Capture the current process environment and working directory
    ///
    /// Missing invocation-context variables are not an error: they degrade
    /// to `None` and the version resolver falls back to sentinel defaults.
    pub fn from_process() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let env: BTreeMap<String, String> = std::env::vars().collect();
        Ok(Self::from_parts(cwd, env))
    }

    /// Build a context from an explicit environment table
    pub fn from_parts(cwd: impl Into<PathBuf>, env: BTreeMap<String, String>) -> Self {
        let non_empty = |key: &str| env.get(key).filter(|v| !v.is_empty()).cloned();

        let ref_type = non_empty("GITHUB_REF_TYPE");
        let ref_name = non_empty("GITHUB_REF_NAME");
        let commit = non_empty("GITHUB_SHA");
        let ci = non_empty("CI").is_some();

        Self {
            env,
            cwd: cwd.into(),
            ref_type,
            ref_name,
            commit,
            ci,
            host_arch: Arch::host(),
        }
    }

    /// Value of an environment variable in this context
    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }

    /// Set an environment variable for all later subprocesses
    pub fn set_env(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.env.insert(key.into(), value.into());
    }

    /// The full environment table, as handed to subprocesses
    pub fn envs(&self) -> impl Iterator<Item = (&String, &String)> {
        self.env.iter()
    }

    /// Prepend `segment` to `PATH` using the given list separator
    ///
    /// Idempotent in content: if `segment` is already the leading entry the
    /// table is left untouched, so re-prepending the same matrix entry never
    /// produces a duplicate.
    pub fn prepend_path(&mut self, segment: &str, separator: char) {
        let current = self.env.get("PATH").cloned().unwrap_or_default();

        if current == segment || current.starts_with(&format!("{segment}{separator}")) {
            return;
        }

        let updated = if current.is_empty() {
            segment.to_string()
        } else {
            format!("{segment}{separator}{current}")
        };
        self.env.insert("PATH".to_string(), updated);
    }
}
