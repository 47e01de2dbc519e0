//! Conversion between the core model and LSP types.

use std::collections::HashMap;

use tower_lsp::lsp_types::{
    CodeAction, CodeActionKind, CodeDescription, Diagnostic, DiagnosticSeverity, DiagnosticTag,
    NumberOrString, Position, Range, TextEdit, Url, WorkspaceEdit,
};
use tracing::warn;

use mandolin_core::{Severity, StoredAction};

/// Converts a core range to the LSP type.
pub fn to_lsp_range(range: mandolin_core::Range) -> Range {
    Range::new(
        Position::new(range.start.line, range.start.character),
        Position::new(range.end.line, range.end.character),
    )
}

/// Converts an LSP range to the core type.
pub fn from_lsp_range(range: Range) -> mandolin_core::Range {
    mandolin_core::Range::from_coords(
        range.start.line,
        range.start.character,
        range.end.line,
        range.end.character,
    )
}

fn to_lsp_severity(severity: Severity) -> DiagnosticSeverity {
    match severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Information => DiagnosticSeverity::INFORMATION,
        Severity::Hint => DiagnosticSeverity::HINT,
    }
}

/// Maps tag integers onto the editor's symbolic tags. Unknown values are
/// dropped with a log line rather than failing the diagnostic.
fn to_lsp_tags(tags: &[u32]) -> Vec<DiagnosticTag> {
    tags.iter()
        .filter_map(|tag| match tag {
            1 => Some(DiagnosticTag::UNNECESSARY),
            2 => Some(DiagnosticTag::DEPRECATED),
            other => {
                warn!("Ignoring unknown diagnostic tag {}", other);
                None
            }
        })
        .collect()
}

/// Converts a core diagnostic to the LSP type. The code is paired with a
/// clickable documentation link when the violation carried one.
pub fn to_lsp_diagnostic(diagnostic: &mandolin_core::Diagnostic) -> Diagnostic {
    let code_description = diagnostic
        .code_description
        .as_deref()
        .and_then(|url| match Url::parse(url) {
            Ok(href) => Some(CodeDescription { href }),
            Err(e) => {
                warn!("Ignoring unparsable documentation link {}: {}", url, e);
                None
            }
        });

    Diagnostic {
        range: to_lsp_range(diagnostic.range),
        severity: Some(to_lsp_severity(diagnostic.severity)),
        code: Some(NumberOrString::String(diagnostic.code.clone())),
        code_description,
        source: Some(diagnostic.source.clone()),
        message: diagnostic.message.clone(),
        tags: diagnostic.tags.as_deref().map(to_lsp_tags),
        ..Default::default()
    }
}

/// Converts a stored action into a quick-fix code action editing `uri`.
pub fn to_code_action(uri: &Url, action: &StoredAction) -> CodeAction {
    let edit = TextEdit {
        range: to_lsp_range(action.edit.range),
        new_text: action.edit.new_text.clone(),
    };

    CodeAction {
        title: action.title.clone(),
        kind: Some(CodeActionKind::QUICKFIX),
        edit: Some(WorkspaceEdit {
            changes: Some(HashMap::from([(uri.clone(), vec![edit])])),
            ..Default::default()
        }),
        is_preferred: Some(action.preferred),
        ..Default::default()
    }
}
