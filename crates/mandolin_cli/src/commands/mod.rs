//! CLI command implementations.

mod lint;
mod lsp;

pub use lint::run_lint;
pub use lsp::run_lsp;

use miette::{IntoDiagnostic, Result};
use tokio::runtime::Runtime;

pub(crate) fn create_tokio_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()
}
