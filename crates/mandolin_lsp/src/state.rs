//! Shared LSP backend state.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tower_lsp::lsp_types::Url;
use tracing::error;

use mandolin_core::ActionRegistry;
use mandolin_toolchain::ResolvedToolchain;

use crate::settings::Settings;

/// Document content and version cache.
#[derive(Debug)]
pub(crate) struct DocumentData {
    pub text: String,
    pub version: i32,
}

/// Shared backend state, partitioned by document where it matters.
///
/// Only the lint cycle writes the registry, and only via wholesale
/// replacement, so the synchronous code-action path never observes a
/// partially updated entry.
#[derive(Debug)]
pub(crate) struct BackendState {
    /// Document contents cache. Only documents in a linted language are
    /// tracked here; notifications for anything else are ignored.
    pub documents: RwLock<HashMap<Url, DocumentData>>,
    /// Current editor-supplied settings.
    pub settings: RwLock<Settings>,
    /// Toolchain resolved once per session; `None` until the first lint
    /// cycle needs it.
    pub toolchain: RwLock<Option<ResolvedToolchain>>,
    /// Workspace root paths, in declaration order.
    pub workspace_roots: RwLock<Vec<PathBuf>>,
    /// Fix actions from the last published lint cycle, per document.
    pub registry: ActionRegistry,
    /// Per-document lint generation; a finished cycle publishes only if its
    /// generation is still the newest, so a stale subprocess can never
    /// overwrite fresher results.
    pub generations: RwLock<HashMap<Url, u64>>,
}

impl BackendState {
    /// Creates a new empty state.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            settings: RwLock::new(Settings::default()),
            toolchain: RwLock::new(None),
            workspace_roots: RwLock::new(Vec::new()),
            registry: ActionRegistry::new(),
            generations: RwLock::new(HashMap::new()),
        }
    }

    /// Bumps the lint generation for a document, returning the new value.
    pub fn begin_generation(&self, uri: &Url) -> u64 {
        match self.generations.write() {
            Ok(mut map) => {
                let counter = map.entry(uri.clone()).or_insert(0);
                *counter += 1;
                *counter
            }
            Err(e) => {
                error!("Generations lock poisoned: {}", e);
                0
            }
        }
    }

    /// Whether `generation` is still the newest for the document.
    pub fn is_current_generation(&self, uri: &Url, generation: u64) -> bool {
        match self.generations.read() {
            Ok(map) => map.get(uri).copied() == Some(generation),
            Err(e) => {
                error!("Generations lock poisoned: {}", e);
                false
            }
        }
    }
}

impl Default for BackendState {
    fn default() -> Self {
        Self::new()
    }
}

/// Type alias for shared state.
pub(crate) type SharedState = Arc<BackendState>;
