//! A JSON array persisted to a single file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::repository::{RepositoryError, Result};

/// In-memory copy of a JSON file, written back atomically on every update.
pub(crate) struct JsonCollection<T> {
    name: &'static str,
    path: PathBuf,
    items: RwLock<Vec<T>>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Loads `<dir>/<name>.json`.
    ///
    /// A missing file starts from `fallback` and is written immediately. An
    /// unreadable file is logged and replaced by `fallback` the same way.
    pub(crate) fn open(dir: &Path, name: &'static str, fallback: Vec<T>) -> Result<Self> {
        let path = dir.join(format!("{name}.json"));
        let (items, write_back) = match Self::load(name, &path) {
            Ok(Some(items)) => (items, false),
            Ok(None) => (fallback, true),
            Err(error) => {
                tracing::warn!(
                    collection = name,
                    path = %path.display(),
                    %error,
                    "Discarding unreadable collection"
                );
                (fallback, true)
            }
        };

        let collection = Self {
            name,
            path,
            items: RwLock::new(items),
        };
        if write_back {
            collection.read(|items| collection.persist(items))??;
        }
        Ok(collection)
    }

    fn load(name: &'static str, path: &Path) -> Result<Option<Vec<T>>> {
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(path)?;
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| RepositoryError::CorruptedData {
                collection: name,
                reason: e.to_string(),
            })
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&[T]) -> R) -> Result<R> {
        let items = self
            .items
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(f(&items))
    }

    /// Applies `f` and writes the collection back to disk.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> Result<R> {
        let mut items = self
            .items
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let out = f(&mut items);
        self.persist(&items)?;
        Ok(out)
    }

    fn persist(&self, items: &[T]) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(items)?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(
            collection = self.name,
            count = items.len(),
            "Saved collection to {}",
            self.path.display()
        );
        Ok(())
    }
}
