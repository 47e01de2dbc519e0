//! Wire model for the linter's JSON violation reports.
//!
//! The linter emits a JSON array on stdout, one record per finding. Required
//! fields are decoded strictly: a record missing one fails the whole batch
//! rather than silently dropping findings from ambiguous data.

use serde::{Deserialize, Serialize};

use crate::range::Range;

/// Diagnostic severity as emitted by the linter, already normalized to the
/// editor's integer numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Severity {
    Error = 1,
    Warning = 2,
    Information = 3,
    Hint = 4,
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity as u8
    }
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, String> {
        match value {
            1 => Ok(Severity::Error),
            2 => Ok(Severity::Warning),
            3 => Ok(Severity::Information),
            4 => Ok(Severity::Hint),
            other => Err(format!("severity {other} is out of range")),
        }
    }
}

/// A literal text replacement attached to a violation. Its range may differ
/// from the violation's own range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedFix {
    /// The replacement text.
    pub fix: String,
    /// The span the replacement applies to.
    pub range: Range,
}

/// One finding reported by the linter for a single lint run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub range: Range,
    pub severity: Severity,
    /// Stable rule identifier.
    pub code: String,
    /// Documentation link for the rule, when the linter publishes one.
    #[serde(
        rename = "codeDescription",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub code_description: Option<String>,
    /// Constant string identifying the linter.
    pub source: String,
    pub message: String,
    /// Editor tag integers, copied through as-is; consumers map them to
    /// symbolic names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<u32>>,
    #[serde(rename = "suggestedfix", default, skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<SuggestedFix>,
}
