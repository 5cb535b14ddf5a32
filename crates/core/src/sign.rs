//! Platform-specific code signing.

use std::path::Path;

use ship_platform::Os;
use tracing::info;

use crate::context::BuildContext;
use crate::error::Result;
use crate::exec;
use crate::target::BuildTarget;

/// Relative path of the Windows signing utility checked into the repo
const SIGNTOOL: &str = "tools/signtool.exe";

/// Certificate subject name for Windows signing
const WINDOWS_SIGNER: &str = "itch corp";

/// RFC 3161 timestamp authority
const TIMESTAMP_URL: &str = "http://timestamp.comodoca.com/?td=sha256";

/// Signing identity for macOS codesign
const DARWIN_IDENTITY: &str = "Developer ID Application: itch corp. (AK2D34UDP2)";

/// Sign the built binary, or skip when asked to
///
/// Windows uses signtool against the MY certificate store with SHA-256 file
/// and timestamp digests. darwin signs with codesign and then verifies,
/// since codesign happily exits zero on some misconfigurations that only
/// `--verify` catches. Linux binaries ship unsigned. Any failure is fatal:
/// a binary is either fully signed and verified or the pipeline stops here.
pub fn sign(ctx: &BuildContext, target: &BuildTarget, binary: &Path, skip_signing: bool) -> Result<()> {
    if skip_signing {
        info!("signing skipped (--skip-signing)");
        return Ok(());
    }

    let binary = &binary.to_string_lossy();

    match target.os {
        Os::Windows => {
            info!("signing with signtool");
            exec::run(
                ctx,
                SIGNTOOL,
                &[
                    "sign",
                    "//v",
                    "//s",
                    "MY",
                    "//n",
                    WINDOWS_SIGNER,
                    "//fd",
                    "sha256",
                    "//tr",
                    TIMESTAMP_URL,
                    "//td",
                    "sha256",
                    "//a",
                    binary,
                ],
            )
        }
        Os::Darwin => {
            info!("signing with codesign");
            exec::run(
                ctx,
                "codesign",
                &[
                    "--deep",
                    "--force",
                    "--verbose",
                    "--sign",
                    DARWIN_IDENTITY,
                    binary,
                ],
            )?;
            // spctl -a is deliberately not run: Gatekeeper assessment
            // rejects command-line-only binaries even when correctly signed
            exec::run(ctx, "codesign", &["--verify", "-vvvv", binary])
        }
        Os::Linux => {
            info!("no signing on linux");
            Ok(())
        }
    }
}
