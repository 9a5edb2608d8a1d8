//! The coordination store as seen by the backup tool.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{BackupError, BackupResult};

/// Metadata returned alongside a node's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stat {
    /// Number of writes the node has seen since it was created.
    pub version: i32,
}

/// Capability the backup tool needs from a hierarchical key store.
///
/// Keys are absolute, `/`-separated paths. `create` only succeeds when the
/// parent node exists; `ensure_path` creates every missing ancestor.
pub trait CoordinationStore {
    fn exists(&self, key: &str) -> BackupResult<bool>;

    /// Data (if any) and metadata of an existing node.
    fn get(&self, key: &str) -> BackupResult<(Option<Vec<u8>>, Stat)>;

    fn ensure_path(&mut self, path: &str) -> BackupResult<()>;

    /// Create `key` holding `value`; returns the stored value.
    fn create(&mut self, key: &str, value: &[u8]) -> BackupResult<Vec<u8>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
struct Node {
    #[serde(default)]
    data: Option<Vec<u8>>,
    #[serde(default)]
    stat: Stat,
}

/// In-memory store, optionally persisted as a JSON snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    nodes: BTreeMap<String, Node>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key` without any parent checks.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.nodes.insert(
            key.into(),
            Node {
                data: Some(value.into()),
                stat: Stat::default(),
            },
        );
    }

    /// Insert `key` with no data.
    pub fn insert_empty(&mut self, key: impl Into<String>) {
        self.nodes.insert(key.into(), Node::default());
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Read a snapshot written by [`MemoryStore::save`].
    pub fn load(path: impl AsRef<Path>) -> BackupResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> BackupResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn has_node(&self, key: &str) -> bool {
        key == "/" || self.nodes.contains_key(key)
    }
}

/// Parent path of `key`, or `None` for the root.
pub(crate) fn parent_of(key: &str) -> Option<&str> {
    let trimmed = key.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) if trimmed.len() > 1 => Some("/"),
        Some(0) | None => None,
        Some(idx) => Some(&trimmed[..idx]),
    }
}

impl CoordinationStore for MemoryStore {
    fn exists(&self, key: &str) -> BackupResult<bool> {
        Ok(self.has_node(key))
    }

    fn get(&self, key: &str) -> BackupResult<(Option<Vec<u8>>, Stat)> {
        if key == "/" {
            return Ok((None, Stat::default()));
        }
        self.nodes
            .get(key)
            .map(|node| (node.data.clone(), node.stat))
            .ok_or_else(|| BackupError::KeyNotFound(key.to_string()))
    }

    fn ensure_path(&mut self, path: &str) -> BackupResult<()> {
        let mut missing = Vec::new();
        let mut current = Some(path.trim_end_matches('/'));
        while let Some(p) = current {
            if p.is_empty() || self.has_node(p) {
                break;
            }
            missing.push(p.to_string());
            current = parent_of(p);
        }
        for p in missing.into_iter().rev() {
            self.insert_empty(p);
        }
        Ok(())
    }

    fn create(&mut self, key: &str, value: &[u8]) -> BackupResult<Vec<u8>> {
        if self.has_node(key) {
            return Err(BackupError::KeyAlreadyExists(key.to_string()));
        }
        if let Some(parent) = parent_of(key) {
            if !self.has_node(parent) {
                return Err(BackupError::NoParent(key.to_string()));
            }
        }
        self.insert(key, value.to_vec());
        Ok(value.to_vec())
    }
}
