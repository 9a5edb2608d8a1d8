//! Local dump files: one file per backed-up key.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Something that yields a key's bytes.
pub trait ByteSource {
    fn read_all(&self) -> io::Result<Vec<u8>>;
}

/// Something that stores a key's bytes.
pub trait ByteSink {
    fn write_all(&self, value: &[u8]) -> io::Result<()>;
}

/// Dump file location for `key` inside `dir`.
///
/// Path separators are flattened to `_` and `.dump` is appended, so
/// `/archives/1` becomes `_archives_1.dump`.
pub fn backup_path_for(dir: impl AsRef<Path>, key: &str) -> PathBuf {
    dir.as_ref().join(format!("{}.dump", key.replace('/', "_")))
}

/// A dump file on disk, usable as both source and sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFile {
    path: PathBuf,
}

impl BackupFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        BackupFile { path: path.into() }
    }

    /// The dump file for `key` inside `dir`.
    pub fn for_key(dir: impl AsRef<Path>, key: &str) -> Self {
        BackupFile::new(backup_path_for(dir, key))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSource for BackupFile {
    fn read_all(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }
}

impl ByteSink for BackupFile {
    fn write_all(&self, value: &[u8]) -> io::Result<()> {
        fs::write(&self.path, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_path_for() {
        assert_eq!(
            backup_path_for(".", "/archives/1"),
            Path::new("./_archives_1.dump")
        );
        assert_eq!(
            backup_path_for("/tmp/dumps", "plain"),
            Path::new("/tmp/dumps/plain.dump")
        );
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let file = BackupFile::for_key(dir.path(), "/archives/1");
        assert!(file.path().ends_with("_archives_1.dump"));

        file.write_all(b"\x00\xffraw").unwrap();
        assert_eq!(file.read_all().unwrap(), b"\x00\xffraw".to_vec());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = BackupFile::for_key(dir.path(), "/missing");
        let err = file.read_all().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
