//! Output formatting module

mod json;
mod text;

use std::path::PathBuf;

use miette::Result;

use mandolin_core::{Severity, Violation};

use crate::cli::OutputFormat;

/// Violations reported for one file.
pub struct FileReport {
    pub path: PathBuf,
    pub violations: Vec<Violation>,
}

impl FileReport {
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|violation| violation.severity == Severity::Error)
    }
}

pub fn output_reports(reports: &[FileReport], format: OutputFormat) -> Result<bool> {
    let has_errors = reports.iter().any(FileReport::has_errors);

    match format {
        OutputFormat::Json => json::output_json(reports)?,
        OutputFormat::Text => text::output_text(reports),
    }

    Ok(has_errors)
}
