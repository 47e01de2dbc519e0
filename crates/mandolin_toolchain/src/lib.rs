//! # mandolin_toolchain
//!
//! Everything that touches the outside world on behalf of the lint
//! integration:
//! - Resolving a usable `lute` executable through the explicit-setting /
//!   foreman-manifest / bundled fallback chain
//! - Normalizing user-supplied rule-config paths against a workspace root
//! - Running the linter as a subprocess and decoding its JSON report

mod config_path;
mod invoke;
mod resolve;

pub use config_path::{WORKSPACE_FOLDER_TOKEN, resolve_config_path};
pub use invoke::{InvokeError, JSON_FLAG, RULES_FLAG, invoke_lint, run_lint};
pub use resolve::{
    LINTER_BINARY, MANIFEST_FILE, ResolvedToolchain, bundled_linter, resolve_toolchain,
    resolve_toolchain_in,
};
