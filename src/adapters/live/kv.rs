//! Live `KvStore` keeping one file per key below a root directory.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::PortError;
use crate::ports::{KvStore, PortFuture};

/// Directory-backed key-value store.
///
/// The key `services/a/b` is stored in the file `<root>/services/a/b`.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    root: PathBuf,
}

impl FileKvStore {
    /// Creates a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn file(&self, key: &str) -> Result<PathBuf, PortError> {
        let relative = Path::new(key);
        if key.is_empty() || !relative.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(format!("invalid kv key: {key:?}").into());
        }
        Ok(self.root.join(relative))
    }
}

impl KvStore for FileKvStore {
    fn get<'a>(&'a self, path: &'a str) -> PortFuture<'a, Option<Vec<u8>>> {
        Box::pin(async move {
            let file = self.file(path)?;
            match tokio::fs::read(&file).await {
                Ok(bytes) => Ok(Some(bytes)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(format!("cannot read {}: {e}", file.display()).into()),
            }
        })
    }

    fn put<'a>(&'a self, path: &'a str, value: Vec<u8>) -> PortFuture<'a, ()> {
        Box::pin(async move {
            let file = self.file(path)?;
            if let Some(parent) = file.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| format!("cannot create {}: {e}", parent.display()))?;
            }
            tokio::fs::write(&file, value)
                .await
                .map_err(|e| format!("cannot write {}: {e}", file.display()))?;
            Ok(())
        })
    }

    fn delete<'a>(&'a self, path: &'a str) -> PortFuture<'a, ()> {
        Box::pin(async move {
            let file = self.file(path)?;
            match tokio::fs::remove_file(&file).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(format!("cannot delete {}: {e}", file.display()).into()),
            }
        })
    }
}
