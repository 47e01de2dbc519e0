//! Per-document index from diagnostic range to executable fix action.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::error;

use crate::diagnostic::StoredAction;
use crate::range::Range;

/// Range-indexed store of fix actions, keyed by canonical document URI.
///
/// Entries are replaced wholesale on every lint publish for a document, so
/// a query after two sequential publishes reflects only the second.
/// `query` is a pure read with no subprocess behind it, which keeps fix
/// lookup cheap and synchronous relative to the lint cycle.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    actions: RwLock<HashMap<String, Vec<StoredAction>>>,
}

impl ActionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored actions for a document. Not additive.
    pub fn publish(&self, document: &str, actions: Vec<StoredAction>) {
        match self.actions.write() {
            Ok(mut map) => {
                map.insert(document.to_string(), actions);
            }
            Err(e) => error!("Action registry lock poisoned: {}", e),
        }
    }

    /// Removes a document's entry, used when the document closes.
    pub fn clear(&self, document: &str) {
        match self.actions.write() {
            Ok(mut map) => {
                map.remove(document);
            }
            Err(e) => error!("Action registry lock poisoned: {}", e),
        }
    }

    /// Returns, in insertion order, every stored action whose anchor range
    /// intersects `range`. A document with no entry yields an empty list.
    pub fn query(&self, document: &str, range: Range) -> Vec<StoredAction> {
        let map = match self.actions.read() {
            Ok(guard) => guard,
            Err(e) => {
                error!("Action registry lock poisoned: {}", e);
                return Vec::new();
            }
        };

        map.get(document)
            .map(|stored| {
                stored
                    .iter()
                    .filter(|action| action.anchor.intersects(&range))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}
