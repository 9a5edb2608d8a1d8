//! Key backup and restore between a coordination store and dump files.
//!
//! Backup reads each key from the store and writes its bytes to a dump
//! file named after the key. Restore reads the dump file and creates the
//! key again. Each key is handled on its own and the first failure stops
//! the run; nothing is retried.
//!
//! | Sub-module | Contents |
//! |---|---|
//! | [`store`] | [`CoordinationStore`] trait, [`MemoryStore`] |
//! | [`storage`] | [`ByteSource`], [`ByteSink`], [`BackupFile`] |

pub mod storage;
pub mod store;

use std::path::Path;

use thiserror::Error;
use tracing::info;

pub use storage::{backup_path_for, BackupFile, ByteSink, ByteSource};
pub use store::{CoordinationStore, MemoryStore, Stat};

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("key {0} not found")]
    KeyNotFound(String),
    #[error("key {0} already exists")]
    KeyAlreadyExists(String),
    #[error("parent of key {0} does not exist")]
    NoParent(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type BackupResult<T> = Result<T, BackupError>;

/// Which direction to copy keys in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Backup,
    Restore,
}

/// Read `key` from the store. Fails if the key does not exist.
pub fn read_bytes<S: CoordinationStore + ?Sized>(
    store: &S,
    key: &str,
) -> BackupResult<Option<Vec<u8>>> {
    if !store.exists(key)? {
        return Err(BackupError::KeyNotFound(key.to_string()));
    }

    let (data, stat) = store.get(key)?;
    match data.as_deref() {
        Some(bytes) if !bytes.is_empty() => match std::str::from_utf8(bytes) {
            Ok(text) => info!(key, version = stat.version, data = text, "read key"),
            Err(_) => info!(key, version = stat.version, raw = ?bytes, "read key"),
        },
        _ => info!(key, version = stat.version, "read key with no data"),
    }
    Ok(data)
}

/// Create `key` in the store. Fails if the key already exists.
pub fn write_bytes<S: CoordinationStore + ?Sized>(
    store: &mut S,
    key: &str,
    value: &[u8],
) -> BackupResult<Vec<u8>> {
    if store.exists(key)? {
        return Err(BackupError::KeyAlreadyExists(key.to_string()));
    }

    if let Some(parent) = store::parent_of(key) {
        store.ensure_path(parent)?;
    }
    store.create(key, value)
}

/// Copy `key` into `sink`. Missing or empty data leaves the sink untouched.
pub fn backup_value<S, W>(store: &S, key: &str, sink: &W) -> BackupResult<Option<Vec<u8>>>
where
    S: CoordinationStore + ?Sized,
    W: ByteSink + ?Sized,
{
    let value = read_bytes(store, key)?;
    if let Some(bytes) = value.as_deref().filter(|b| !b.is_empty()) {
        sink.write_all(bytes)?;
    }
    Ok(value)
}

/// Create `key` from the bytes in `source`.
pub fn restore_value<S, R>(store: &mut S, key: &str, source: &R) -> BackupResult<Vec<u8>>
where
    S: CoordinationStore + ?Sized,
    R: ByteSource + ?Sized,
{
    let value = source.read_all()?;
    write_bytes(store, key, &value)
}

/// Back up `key` to its dump file in `dir`.
pub fn backup_key<S: CoordinationStore + ?Sized>(
    store: &S,
    dir: &Path,
    key: &str,
) -> BackupResult<Option<Vec<u8>>> {
    let file = BackupFile::for_key(dir, key);
    let value = backup_value(store, key, &file)?;
    info!(key, path = %file.path().display(), "backed up");
    Ok(value)
}

/// Restore `key` from its dump file in `dir`.
pub fn restore_key<S: CoordinationStore + ?Sized>(
    store: &mut S,
    dir: &Path,
    key: &str,
) -> BackupResult<Vec<u8>> {
    let file = BackupFile::for_key(dir, key);
    let value = restore_value(store, key, &file)?;
    info!(key, path = %file.path().display(), "restored");
    Ok(value)
}

/// Apply `task` to every key in order, stopping at the first error.
///
/// Returns one value per key; a backed-up key with no data yields `None`.
pub fn run_task<S, K>(
    task: Task,
    store: &mut S,
    dir: &Path,
    keys: &[K],
) -> BackupResult<Vec<Option<Vec<u8>>>>
where
    S: CoordinationStore + ?Sized,
    K: AsRef<str>,
{
    keys.iter()
        .map(|key| match task {
            Task::Backup => backup_key(store, dir, key.as_ref()),
            Task::Restore => restore_key(store, dir, key.as_ref()).map(Some),
        })
        .collect()
}
