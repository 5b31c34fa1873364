//! File-based session storage
//!
//! One `<key>.json` file per key under a directory, so a signed-in user
//! survives a process restart.

use super::SessionStorage;
use crate::error::{Result, RuntimeError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

pub struct FileSessionStorage {
    dir: PathBuf,
}

impl FileSessionStorage {
    /// Store session files under `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(RuntimeError::Storage(format!("invalid session key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait::async_trait]
impl SessionStorage for FileSessionStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RuntimeError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).await?;
        fs::write(&path, value).await.map_err(|e| {
            RuntimeError::Storage(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_roundtrip_on_disk() {
        let temp = TempDir::new().unwrap();
        let storage = FileSessionStorage::new(temp.path().join("sessions"));

        assert_eq!(storage.get("user").await.unwrap(), None);
        storage.set("user", r#"{"email":"a@b.c"}"#).await.unwrap();
        assert!(temp.path().join("sessions/user.json").exists());

        // A second instance over the same directory sees the record
        let reopened = FileSessionStorage::new(temp.path().join("sessions"));
        assert_eq!(
            reopened.get("user").await.unwrap().as_deref(),
            Some(r#"{"email":"a@b.c"}"#)
        );

        reopened.remove("user").await.unwrap();
        assert_eq!(storage.get("user").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let temp = TempDir::new().unwrap();
        let storage = FileSessionStorage::new(temp.path());

        for key in ["../etc", "a/b", ""] {
            assert!(matches!(
                storage.set(key, "x").await,
                Err(RuntimeError::Storage(_))
            ));
        }
    }
}
