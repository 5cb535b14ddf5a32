//! End-to-end smoke test against the packaged binary.

use std::path::Path;

use tracing::info;

use crate::context::BuildContext;
use crate::error::Result;
use crate::exec;

/// Run the butlerd integration suite against the packaged artifact
///
/// This is the final gate before the artifact is considered release-ready.
/// The suite gets the absolute path of the binary, so it exercises exactly
/// what packaging produced.
pub fn run_suite(ctx: &BuildContext, artifact: &Path) -> Result<()> {
    let absolute = dunce::canonicalize(artifact)?;
    info!(butler = %absolute.display(), "running butlerd integration suite");

    let butler_path = format!("--butlerPath={}", absolute.display());
    exec::run(ctx, "go", &["test", "-v", "./butlerd/integrate", &butler_path])
}
