//! Editor-facing diagnostics and the violation translator.

use crate::range::Range;
use crate::violation::{Severity, Violation};

/// The editor-facing form of a violation. Derived 1:1; a publish fully
/// replaces the prior set for a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: Severity,
    pub code: String,
    /// Documentation URL the code should link to, when present.
    pub code_description: Option<String>,
    pub source: String,
    pub message: String,
    pub tags: Option<Vec<u32>>,
}

/// A document-scoped text replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextReplacement {
    pub range: Range,
    pub new_text: String,
}

/// An executable fix derived from a suggested fix.
///
/// `anchor` is the originating violation's range, not the edit's own span.
/// Range-intersection lookup goes through the anchor, so a fix stays
/// discoverable even when its edit applies somewhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAction {
    pub title: String,
    pub edit: TextReplacement,
    pub anchor: Range,
    pub preferred: bool,
}

/// Translates one violation into a diagnostic and, when the violation
/// carries a suggested fix, a stored action anchored at the violation's
/// range.
pub fn translate(violation: Violation) -> (Diagnostic, Option<StoredAction>) {
    let action = violation.suggested_fix.as_ref().map(|fix| StoredAction {
        title: format!("Fix: {}", violation.message),
        edit: TextReplacement {
            range: fix.range,
            new_text: fix.fix.clone(),
        },
        anchor: violation.range,
        preferred: true,
    });

    let diagnostic = Diagnostic {
        range: violation.range,
        severity: violation.severity,
        code: violation.code,
        code_description: violation.code_description,
        source: violation.source,
        message: violation.message,
        tags: violation.tags,
    };

    (diagnostic, action)
}
