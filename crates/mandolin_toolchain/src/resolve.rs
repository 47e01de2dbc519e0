//! Locating a usable linter executable.
//!
//! Resolution walks a fallback chain: an explicit user setting wins, then a
//! `foreman.toml` manifest at a workspace root paired with the toolchain's
//! managed install path under the home directory. Every miss is an ordinary
//! outcome, logged rather than surfaced; the caller falls back to the
//! bundled executable.

use std::path::{Path, PathBuf};

use tracing::info;

/// Name of the linter executable managed by foreman.
#[cfg(not(windows))]
pub const LINTER_BINARY: &str = "lute";
#[cfg(windows)]
pub const LINTER_BINARY: &str = "lute.exe";

/// Name of the toolchain manifest searched for at workspace roots.
pub const MANIFEST_FILE: &str = "foreman.toml";

/// A usable linter executable plus the directory rule configuration
/// resolves against (the manifest's directory, later used as the subprocess
/// working directory).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedToolchain {
    pub executable: PathBuf,
    pub rule_config_dir: Option<PathBuf>,
}

/// Resolves the linter executable. First success wins:
///
/// 1. A non-empty explicit setting is returned verbatim, with no
///    rule-config directory change.
/// 2. Otherwise the workspace roots are scanned in declaration order for a
///    top-level `foreman.toml`; a hit points at the managed install under
///    `~/.foreman/bin`, returned together with the manifest's directory.
///
/// `None` means no usable executable was found.
pub fn resolve_toolchain(explicit: &str, workspace_roots: &[PathBuf]) -> Option<ResolvedToolchain> {
    resolve_toolchain_in(explicit, workspace_roots, dirs::home_dir())
}

/// Same as [`resolve_toolchain`] with the home directory injected, keeping
/// the foreman fallback testable against a temporary tree.
pub fn resolve_toolchain_in(
    explicit: &str,
    workspace_roots: &[PathBuf],
    home: Option<PathBuf>,
) -> Option<ResolvedToolchain> {
    if !explicit.is_empty() {
        return Some(ResolvedToolchain {
            executable: PathBuf::from(explicit),
            rule_config_dir: None,
        });
    }

    info!("Linter executable path is not set, checking for a foreman installation");

    if workspace_roots.is_empty() {
        info!("No workspace roots available to check for a `{MANIFEST_FILE}` manifest");
        return None;
    }

    let manifest = workspace_roots
        .iter()
        .map(|root| root.join(MANIFEST_FILE))
        .find(|candidate| candidate.is_file());

    let manifest = match manifest {
        Some(path) => path,
        None => {
            info!("No `{MANIFEST_FILE}` manifest found in any workspace root");
            return None;
        }
    };

    let home = match home {
        Some(path) => path,
        None => {
            info!("No home directory available to locate the foreman install path");
            return None;
        }
    };

    let executable = home.join(".foreman").join("bin").join(LINTER_BINARY);
    info!(
        "Found `{MANIFEST_FILE}` at {}, checking for the linter at {}",
        manifest.display(),
        executable.display()
    );

    if !executable.is_file() {
        info!(
            "Linter not found at the expected foreman path: {}",
            executable.display()
        );
        return None;
    }

    info!(
        "Linter found at the expected foreman path: {}",
        executable.display()
    );

    Some(ResolvedToolchain {
        rule_config_dir: manifest.parent().map(Path::to_path_buf),
        executable,
    })
}

/// Path of the bundled linter shipped next to the server binary, the last
/// resort when resolution fails.
pub fn bundled_linter() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(LINTER_BINARY)))
}
