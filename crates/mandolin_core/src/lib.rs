//! # mandolin_core
//!
//! Data model and pure logic for the Mandolin lint integration:
//! - Positions and ranges in editor coordinates
//! - The serde wire model for the linter's JSON violation reports
//! - Translation from violations to editor-facing diagnostics and fix actions
//! - The per-document [`ActionRegistry`] answering fix-lookup queries by
//!   range intersection
//!
//! Nothing in this crate touches the filesystem or spawns processes; the
//! outward-facing pieces live in `mandolin_toolchain` and `mandolin_lsp`.

mod diagnostic;
mod range;
mod registry;
mod violation;

pub use diagnostic::{Diagnostic, StoredAction, TextReplacement, translate};
pub use range::{Position, Range};
pub use registry::ActionRegistry;
pub use violation::{Severity, SuggestedFix, Violation};
