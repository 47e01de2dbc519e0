//! Running the linter as a subprocess and decoding its JSON report.

use std::path::Path;
use std::process::ExitStatus;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, error, warn};

use mandolin_core::Violation;

/// Flag selecting JSON output mode.
pub const JSON_FLAG: &str = "-j";

/// Flag selecting a custom rule-config file; its path follows as the next
/// argument.
pub const RULES_FLAG: &str = "-r";

/// Flag marking the next argument as literal source text.
const SOURCE_FLAG: &str = "-s";

/// Failure modes of a single linter invocation.
///
/// All of them are recoverable: the public entry point logs the cause and
/// degrades to an empty report. A decode failure fails the invocation's
/// whole batch, never single records.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The subprocess could not be spawned.
    #[error("Failed to spawn linter: {0}")]
    Spawn(#[from] std::io::Error),

    /// The subprocess exited non-zero.
    #[error("Linter exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    /// Stdout was not a JSON array of violations.
    #[error("Failed to decode linter output: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Runs `<executable> lint <rule_args...> -s <document_text>` and decodes
/// stdout strictly as a JSON array of violations.
///
/// `working_dir`, when given, is the rule-config directory, so relative
/// paths inside a rule-config file resolve against it. Stdout and stderr
/// are captured independently; stderr chatter on a successful exit is
/// logged but is not a failure.
pub async fn run_lint(
    executable: &Path,
    rule_args: &[String],
    document_text: &str,
    working_dir: Option<&Path>,
) -> Result<Vec<Violation>, InvokeError> {
    let mut command = Command::new(executable);
    command
        .arg("lint")
        .args(rule_args)
        .arg(SOURCE_FLAG)
        .arg(document_text);

    if let Some(dir) = working_dir {
        command.current_dir(dir);
    }

    debug!(
        "Invoking linter: {} lint {} {SOURCE_FLAG} <{} bytes>",
        executable.display(),
        rule_args.join(" "),
        document_text.len()
    );

    let output = command.output().await?;
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !output.status.success() {
        return Err(InvokeError::Failed {
            status: output.status,
            stderr: stderr.into_owned(),
        });
    }

    if !stderr.is_empty() {
        // The tool may emit warnings on stderr even when it succeeds.
        warn!("Linter stderr: {}", stderr.trim_end());
    }

    let violations: Vec<Violation> = serde_json::from_slice(&output.stdout)?;
    debug!("Parsed {} violations from the linter", violations.len());

    Ok(violations)
}

/// Like [`run_lint`] but never fails to the caller: any invocation failure
/// is logged and yields an empty report, leaving a second invocation with a
/// different rule source in the same cycle unaffected.
pub async fn invoke_lint(
    executable: &Path,
    rule_args: &[String],
    document_text: &str,
    working_dir: Option<&Path>,
) -> Vec<Violation> {
    match run_lint(executable, rule_args, document_text, working_dir).await {
        Ok(violations) => violations,
        Err(e) => {
            error!("Error calling the linter: {}", e);
            Vec::new()
        }
    }
}
