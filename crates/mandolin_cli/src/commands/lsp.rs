//! LSP command implementation

use miette::Result;

use super::create_tokio_runtime;

pub fn run_lsp() -> Result<()> {
    create_tokio_runtime()?.block_on(async {
        mandolin_lsp::run().await;
    });
    Ok(())
}
