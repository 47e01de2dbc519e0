//! Text output formatter

use mandolin_core::Severity;

use super::FileReport;

pub fn output_text(reports: &[FileReport]) {
    for report in reports {
        if report.violations.is_empty() {
            continue;
        }

        println!("\n{}:", report.path.display());
        for violation in &report.violations {
            let severity = match violation.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
                Severity::Information => "info",
                Severity::Hint => "hint",
            };
            println!(
                "  {}:{} {} [{}]: {}",
                violation.range.start.line + 1,
                violation.range.start.character + 1,
                severity,
                violation.code,
                violation.message
            );
        }
    }

    let total_files = reports.len();
    let total_issues: usize = reports.iter().map(|r| r.violations.len()).sum();

    println!();
    println!("Checked {} files, found {} issues", total_files, total_issues);
}
