//! Diagram persistence: a saved-document catalog over an abstract string
//! key-value store, plus JSON export/import.
//!
//! The storage backend is an external collaborator (browser key-value
//! storage in the original deployment); [`MemoryStore`] ships for tests
//! and embedding. Each save writes a fresh blob under a fresh id and
//! updates the catalog entry for the document's display name; blobs
//! orphaned by a same-name re-save are acceptable garbage and are not
//! collected.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{DiagramDocument, fresh_id};

const CATALOG_KEY: &str = "beaux:catalog";
const CURRENT_KEY: &str = "beaux:current";
const BLOB_PREFIX: &str = "beaux:diagram:";

/// Minimal string key-value contract, shaped after browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// In-memory backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// One catalog row for a saved document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub timestamp: DateTime<Utc>,
}

/// The saved-diagram catalog plus a distinguished current/last-open slot.
#[derive(Debug)]
pub struct DocumentStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> DocumentStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Saves the document under a fresh id, replaces the catalog entry for
    /// its display name, and mirrors it into the current slot.
    pub fn save(&mut self, document: &DiagramDocument) -> Result<String> {
        let id = fresh_id();
        let mut stamped = document.clone();
        stamped.last_saved = Utc::now();

        let blob = serde_json::to_string(&stamped)
            .map_err(|e| Error::Import(format!("failed to encode diagram: {e}")))?;
        self.store.set(&format!("{BLOB_PREFIX}{id}"), blob);

        let mut catalog = self.catalog();
        catalog.insert(
            stamped.name.clone(),
            CatalogEntry {
                id: id.clone(),
                name: stamped.name.clone(),
                timestamp: stamped.last_saved,
            },
        );
        self.write_catalog(&catalog);
        self.store.set(CURRENT_KEY, id.clone());

        debug!(document = %stamped.name, id = %id, "saved diagram");
        Ok(id)
    }

    pub fn load(&self, id: &str) -> Result<DiagramDocument> {
        let blob = self
            .store
            .get(&format!("{BLOB_PREFIX}{id}"))
            .ok_or_else(|| Error::UnknownDocument(id.to_string()))?;
        import_json(&blob)
    }

    /// Catalog entries in insertion order.
    pub fn list(&self) -> Vec<CatalogEntry> {
        self.catalog().into_values().collect()
    }

    /// Removes the blob and any catalog entries pointing at it; clears the
    /// current slot if it referenced the deleted id.
    pub fn delete(&mut self, id: &str) {
        self.store.remove(&format!("{BLOB_PREFIX}{id}"));
        let mut catalog = self.catalog();
        catalog.retain(|_, entry| entry.id != id);
        self.write_catalog(&catalog);
        if self.store.get(CURRENT_KEY).as_deref() == Some(id) {
            self.store.remove(CURRENT_KEY);
        }
    }

    /// The most recently saved document, if the current slot resolves.
    pub fn load_current(&self) -> Option<DiagramDocument> {
        let id = self.store.get(CURRENT_KEY)?;
        match self.load(&id) {
            Ok(document) => Some(document),
            Err(err) => {
                warn!(%id, error = %err, "current diagram slot did not resolve");
                None
            }
        }
    }

    fn catalog(&self) -> IndexMap<String, CatalogEntry> {
        let Some(raw) = self.store.get(CATALOG_KEY) else {
            return IndexMap::new();
        };
        match serde_json::from_str::<Vec<CatalogEntry>>(&raw) {
            Ok(entries) => entries.into_iter().map(|e| (e.name.clone(), e)).collect(),
            Err(err) => {
                warn!(error = %err, "diagram catalog was unreadable, starting fresh");
                IndexMap::new()
            }
        }
    }

    fn write_catalog(&mut self, catalog: &IndexMap<String, CatalogEntry>) {
        let entries: Vec<&CatalogEntry> = catalog.values().collect();
        if let Ok(raw) = serde_json::to_string(&entries) {
            self.store.set(CATALOG_KEY, raw);
        }
    }
}

/// Pretty-printed JSON for file export.
pub fn export_json(document: &DiagramDocument) -> Result<String> {
    serde_json::to_string_pretty(document)
        .map_err(|e| Error::Import(format!("failed to encode diagram: {e}")))
}

/// Parses a diagram document from JSON.
///
/// Validates top-level shape only: `nodes` and `connections` must be
/// present and array-typed. Missing `name`/`lastSaved` get defaults.
/// Referential integrity is not checked; successfully imported documents
/// are provisionally trusted and dangling endpoints degrade at render
/// time instead of failing here.
pub fn import_json(raw: &str) -> Result<DiagramDocument> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| Error::Import(format!("invalid JSON: {e}")))?;

    for field in ["nodes", "connections"] {
        match value.get(field) {
            Some(v) if v.is_array() => {}
            Some(_) => {
                return Err(Error::Import(format!("`{field}` must be an array")));
            }
            None => {
                return Err(Error::Import(format!("missing `{field}` array")));
            }
        }
    }

    serde_json::from_value(value).map_err(|e| Error::Import(format!("malformed diagram: {e}")))
}
