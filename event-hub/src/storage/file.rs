//! FileStore - 文件键值存储
//!
//! ```text
//! {work_dir}/store/
//! ├── read_notifications_g1.json
//! └── read_notifications_a%2Fb.json     # key "read_notifications_a/b"
//! ```

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use super::{LocalStore, StorageError, validate_key};

/// One file per key under `dir`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", escape_key(key)))
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let path = self.path_for(key);
        // 先写临时文件再 rename，避免写一半的文件
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Percent-escape every byte outside `[A-Za-z0-9_.-]`
fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.') {
            out.push(b as char);
        } else {
            let _ = write!(out, "%{:02X}", b);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_get_remove() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("store")).unwrap();

        assert_eq!(store.get("read_notifications_g1").unwrap(), None);

        store.set("read_notifications_g1", r#"["n1"]"#).unwrap();
        assert_eq!(
            store.get("read_notifications_g1").unwrap().as_deref(),
            Some(r#"["n1"]"#)
        );

        store.set("read_notifications_g1", r#"["n1","n2"]"#).unwrap();
        assert_eq!(
            store.get("read_notifications_g1").unwrap().as_deref(),
            Some(r#"["n1","n2"]"#)
        );

        store.remove("read_notifications_g1").unwrap();
        assert_eq!(store.get("read_notifications_g1").unwrap(), None);
        // removing twice is fine
        store.remove("read_notifications_g1").unwrap();
    }

    #[test]
    fn test_keys_cannot_escape_directory() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.set("../outside", "x").unwrap();
        assert!(!dir.path().parent().unwrap().join("outside.json").exists());
        assert_eq!(store.get("../outside").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_escape_key() {
        assert_eq!(escape_key("read_notifications_g-1.a"), "read_notifications_g-1.a");
        assert_eq!(escape_key("a/b c"), "a%2Fb%20c");
        assert_eq!(escape_key("ả"), "%E1%BA%A3");
    }

    #[test]
    fn test_empty_key_rejected() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(store.get(""), Err(StorageError::InvalidKey(_))));
        assert!(matches!(store.set("", "x"), Err(StorageError::InvalidKey(_))));
    }
}
