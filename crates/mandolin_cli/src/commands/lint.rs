//! Lint command implementation

use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result, miette};
use tracing::info;

use mandolin_toolchain::{
    JSON_FLAG, RULES_FLAG, ResolvedToolchain, invoke_lint, resolve_config_path, resolve_toolchain,
};

use crate::cli::OutputFormat;
use crate::output::{FileReport, output_reports};

pub fn run_lint(
    files: &[PathBuf],
    lute: Option<&Path>,
    rules: Option<&str>,
    format: OutputFormat,
) -> Result<bool> {
    let cwd = std::env::current_dir().into_diagnostic()?;

    let explicit = lute
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_default();
    let toolchain = resolve_toolchain(&explicit, std::slice::from_ref(&cwd)).ok_or_else(|| {
        miette!("No usable lute executable found; pass --lute or add a foreman.toml")
    })?;
    info!("Using linter: {}", toolchain.executable.display());

    let rules_path = rules.map(|raw| resolve_config_path(raw, Some(&cwd)));
    if let Some(ref path) = rules_path {
        info!("Using lint rules: {}", path.display());
    }

    let runtime = super::create_tokio_runtime()?;
    let mut reports = Vec::with_capacity(files.len());

    for file in files {
        let text = std::fs::read_to_string(file).into_diagnostic()?;
        let violations = runtime.block_on(lint_text(&toolchain, rules_path.as_deref(), &text));
        reports.push(FileReport {
            path: file.clone(),
            violations,
        });
    }

    output_reports(&reports, format)
}

/// Runs the base invocation and, when a rule file is set, the custom-rules
/// invocation; base violations come first, with no deduplication.
async fn lint_text(
    toolchain: &ResolvedToolchain,
    rules_path: Option<&Path>,
    text: &str,
) -> Vec<mandolin_core::Violation> {
    let working_dir = toolchain.rule_config_dir.as_deref();

    let mut violations = invoke_lint(
        &toolchain.executable,
        &[JSON_FLAG.to_string()],
        text,
        working_dir,
    )
    .await;

    if let Some(rules) = rules_path {
        let rule_violations = invoke_lint(
            &toolchain.executable,
            &[
                JSON_FLAG.to_string(),
                RULES_FLAG.to_string(),
                rules.to_string_lossy().into_owned(),
            ],
            text,
            working_dir,
        )
        .await;
        violations.extend(rule_violations);
    }

    violations
}
