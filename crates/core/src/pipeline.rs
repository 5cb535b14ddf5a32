//! The sequential build pipeline.
//!
//! Stage order is fixed: resolve target, configure environment, resolve
//! version, compile, validate, sign, package, smoke-test. Each stage fully
//! completes (including any subprocess it launches) before the next begins,
//! and the first fatal error aborts the remainder.

use std::path::PathBuf;

use ship_platform::{Arch, Os};
use tracing::info;

use crate::context::BuildContext;
use crate::error::Result;
use crate::target::BuildTarget;
use crate::version::VersionInfo;
use crate::{build, envcfg, package, sign, smoke, validate};

/// Options derived once from the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Target OS override; host-detected when absent
    pub os: Option<Os>,
    /// Target architecture override; defaults to x86_64 when absent
    pub arch: Option<Arch>,
    /// Skip the signing stage entirely
    pub skip_signing: bool,
}

/// What a successful pipeline run produced
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub target: BuildTarget,
    pub version: VersionInfo,
    /// Final artifact path under `artifacts/<os>-<goarch>/`
    pub artifact: PathBuf,
}

/// Run the full build pipeline for one target
pub fn run(ctx: &mut BuildContext, options: &BuildOptions) -> Result<BuildSummary> {
    let target = stage("resolving platform", BuildTarget::resolve(options.os, options.arch))?;
    info!(target = %target.artifact_dir_key(), "building butler");

    stage("configuring environment", envcfg::configure(ctx, &target))?;

    // Sampled once here; stages after the compiler never recompute it
    let version = VersionInfo::resolve(ctx);

    stage("checking toolchain", build::preflight(ctx))?;
    let binary = stage("compiling", build::compile(ctx, &target, &version))?;
    stage(
        "validating binary",
        validate::post_build_check(ctx, &target, &binary),
    )?;
    stage(
        "signing",
        sign::sign(ctx, &target, &binary, options.skip_signing),
    )?;
    let artifact = stage("packaging", package::package(ctx, &target, &binary))?;
    stage("smoke testing", smoke::run_suite(ctx, &artifact))?;

    Ok(BuildSummary {
        target,
        version,
        artifact,
    })
}

/// Tag a stage's error with the stage name for the top-level report
fn stage<T>(name: &'static str, result: Result<T>) -> Result<T> {
    result.map_err(|err| err.in_stage(name))
}
