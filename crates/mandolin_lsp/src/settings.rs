//! Editor-supplied settings.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Settings consumed from `initializationOptions` and
/// `workspace/didChangeConfiguration`. Empty strings mean unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Explicit linter executable path; wins over every fallback.
    pub lute_exec_path: String,
    /// Optional rule-config file selecting a custom rule set. May contain
    /// the workspace-folder placeholder or be workspace-relative.
    pub lint_rules: String,
    /// Manifest path recorded after a successful foreman resolution.
    pub foreman_toml_path: String,
}

impl Settings {
    /// Decodes settings from a JSON payload. Clients that forward scoped
    /// configuration nest the values under a `mandolin` key; both shapes
    /// are accepted. A malformed payload is ignored in favor of defaults.
    pub fn from_value(value: &Value) -> Self {
        let scoped = value.get("mandolin").unwrap_or(value);
        match serde_json::from_value(scoped.clone()) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring malformed settings payload: {}", e);
                Self::default()
            }
        }
    }
}
