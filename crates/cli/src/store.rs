//! Diagram persistence.
//!
//! The translator itself never touches storage; the CLI translates before
//! saving and after loading. A record keeps both representations so either
//! side can be restored without re-running the translation.

use flowlang_parser::{Edge, Node, ParsedDiagram};
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by a [`DiagramStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no diagram stored under '{0}'")]
    NotFound(String),

    /// Keys are lowercase ASCII slugs; anything else could escape the store.
    #[error("invalid diagram key '{0}'")]
    InvalidKey(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corrupt diagram record: {0}")]
    Format(#[from] serde_json::Error),
}

/// A saved diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramRecord {
    pub title: String,
    pub flowlang_code: String,
    /// The natural-language request the code was generated from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_prompt: Option<String>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl DiagramRecord {
    /// Record for FlowLang source and the graph it parsed into.
    pub fn new(title: impl Into<String>, flowlang_code: impl Into<String>, diagram: ParsedDiagram) -> Self {
        Self {
            title: title.into(),
            flowlang_code: flowlang_code.into(),
            user_prompt: None,
            nodes: diagram.nodes,
            edges: diagram.edges,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.user_prompt = Some(prompt.into());
        self
    }

    /// Storage key derived from the title.
    pub fn key(&self) -> Result<String, StoreError> {
        let key = slugify(&self.title);
        if key.is_empty() {
            return Err(StoreError::InvalidKey(self.title.clone()));
        }
        Ok(key)
    }
}

/// Storage backend for diagrams.
///
/// Saving a record whose title slugifies to an existing key replaces it.
pub trait DiagramStore {
    /// Persist `record`; returns its key.
    fn save(&self, record: &DiagramRecord) -> Result<String, StoreError>;

    fn load(&self, key: &str) -> Result<DiagramRecord, StoreError>;

    /// Keys of all stored diagrams, sorted.
    fn list(&self) -> Result<Vec<String>, StoreError>;
}

/// `Order Pipeline (v2)` → `order-pipeline-v2`.
pub fn slugify(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn check_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

// ============================================================================
// File store
// ============================================================================

/// One pretty-printed JSON file per diagram: `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl DiagramStore for FileStore {
    fn save(&self, record: &DiagramRecord) -> Result<String, StoreError> {
        let key = record.key()?;
        fs::create_dir_all(&self.root).map_err(io_error(&self.root))?;

        let path = self.path_for(&key);
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json).map_err(io_error(&path))?;

        tracing::debug!(%key, path = %path.display(), "saved diagram");
        Ok(key)
    }

    fn load(&self, key: &str) -> Result<DiagramRecord, StoreError> {
        check_key(key)?;
        let path = self.path_for(key);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(key.to_string()));
            }
            Err(err) => return Err(io_error(&path)(err)),
        };
        Ok(serde_json::from_str(&json)?)
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(io_error(&self.root)(err)),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry.map_err(io_error(&self.root))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

// ============================================================================
// Memory store
// ============================================================================

/// In-process store, mainly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<IndexMap<String, DiagramRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl DiagramStore for MemoryStore {
    fn save(&self, record: &DiagramRecord) -> Result<String, StoreError> {
        let key = record.key()?;
        self.records.write().insert(key.clone(), record.clone());
        Ok(key)
    }

    fn load(&self, key: &str) -> Result<DiagramRecord, StoreError> {
        self.records
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = self.records.read().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(title: &str) -> DiagramRecord {
        let source = "A [type: event]\nB [type: activity]\nA > B\n";
        let diagram = flowlang_parser::parse(source).unwrap();
        DiagramRecord::new(title, source, diagram)
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Order Pipeline (v2)"), "order-pipeline-v2");
        assert_eq!(slugify("  spaced  "), "spaced");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_untitled_record_has_no_key() {
        assert!(matches!(record("???").key(), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("diagrams"));

        let saved = record("Order Flow").with_prompt("an order flow");
        let key = store.save(&saved).unwrap();
        assert_eq!(key, "order-flow");
        assert!(store.root().join("order-flow.json").exists());

        let loaded = store.load(&key).unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.nodes.len(), 2);
    }

    #[test]
    fn test_file_store_list_is_sorted_and_ignores_other_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.list().unwrap(), Vec::<String>::new());

        store.save(&record("Zeta")).unwrap();
        store.save(&record("Alpha")).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

        assert_eq!(store.list().unwrap(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_file_store_missing_and_invalid_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(store.load("nothing"), Err(StoreError::NotFound(_))));
        assert!(matches!(store.load("../etc/passwd"), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    fn test_file_store_corrupt_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        fs::write(dir.path().join("broken.json"), "{not json").unwrap();
        assert!(matches!(store.load("broken"), Err(StoreError::Format(_))));
    }

    #[test]
    fn test_memory_store_replaces_same_key() {
        let store = MemoryStore::new();
        store.save(&record("Flow")).unwrap();
        let mut updated = record("flow");
        updated.flowlang_code = "changed".to_string();
        store.save(&updated).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.load("flow").unwrap().flowlang_code, "changed");
        assert_eq!(store.list().unwrap(), vec!["flow"]);
    }
}
