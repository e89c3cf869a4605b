//! Persistent kulture storage using RocksDB.
//!
//! Records are stored as their canonical JSON under `kulture:{id}`. Reads
//! decode through kulture validation, so a corrupted record surfaces as an
//! error instead of a malformed kulture.

use crate::error::{Error, Result};
use kulture_core::Kulture;
use rocksdb::{Options, DB};
use std::path::Path;

const KULTURE_PREFIX: &str = "kulture:";

fn kulture_key(id: &str) -> String {
    format!("{KULTURE_PREFIX}{id}")
}

/// Storage backend for kultures.
///
/// `insert`, `update` and `delete` check existence and then write; callers
/// that write concurrently serialize those calls themselves.
pub struct Storage {
    db: DB,
}

impl Storage {
    /// Open or create storage at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path)?;
        Ok(Self { db })
    }

    fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.db.get(kulture_key(id).as_bytes())?.is_some())
    }

    fn put(&self, kulture: &Kulture) -> Result<()> {
        let value = serde_json::to_vec(kulture)?;
        self.db.put(kulture_key(kulture.id()).as_bytes(), value)?;
        Ok(())
    }

    /// Get a kulture by id.
    pub fn fetch_by_id(&self, id: &str) -> Result<Option<Kulture>> {
        match self.db.get(kulture_key(id).as_bytes())? {
            Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
            None => Ok(None),
        }
    }

    /// Store a new kulture. Fails if the id is already stored.
    pub fn insert(&self, kulture: &Kulture) -> Result<String> {
        if self.exists(kulture.id())? {
            tracing::debug!(id = kulture.id(), "insert rejected, duplicate id");
            return Err(Error::Duplicate(kulture.id().to_string()));
        }
        self.put(kulture)?;
        tracing::debug!(id = kulture.id(), "inserted kulture");
        Ok(kulture.id().to_string())
    }

    /// Replace a stored kulture with the same id.
    pub fn update(&self, kulture: &Kulture) -> Result<String> {
        if !self.exists(kulture.id())? {
            return Err(Error::NotFound(kulture.id().to_string()));
        }
        self.put(kulture)?;
        tracing::debug!(id = kulture.id(), "updated kulture");
        Ok(kulture.id().to_string())
    }

    /// Delete a kulture by id.
    pub fn delete(&self, id: &str) -> Result<String> {
        if !self.exists(id)? {
            return Err(Error::NotFound(id.to_string()));
        }
        self.db.delete(kulture_key(id).as_bytes())?;
        tracing::debug!(id, "deleted kulture");
        Ok(id.to_string())
    }

    /// List all kultures.
    pub fn list(&self) -> Result<Vec<Kulture>> {
        let prefix = KULTURE_PREFIX.as_bytes();
        let mut kultures = Vec::new();

        let iter = self.db.prefix_iterator(prefix);
        for item in iter {
            let (key, value) = item?;
            if key.starts_with(prefix) {
                kultures.push(serde_json::from_slice(&value)?);
            } else {
                break;
            }
        }

        Ok(kultures)
    }

    /// Number of stored kultures.
    pub fn count(&self) -> Result<usize> {
        let prefix = KULTURE_PREFIX.as_bytes();
        let mut count = 0;

        for item in self.db.prefix_iterator(prefix) {
            let (key, _) = item?;
            if !key.starts_with(prefix) {
                break;
            }
            count += 1;
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn kulture(id: &str, x: i64, y: i64, z: i64) -> Kulture {
        Kulture::from_record(&json!({
            "id": id,
            "name": format!("I am {id}"),
            "location": { "x": x, "y": y, "z": z },
            "image": "unknown",
            "attributes": { "growth": {}, "invade": {}, "defense": {} },
            "status": { "energy": 100, "health": 200 }
        }))
        .unwrap()
    }

    #[test]
    fn storage_roundtrip() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();

        let k = kulture("13", 1, -1, 0);
        assert_eq!(storage.insert(&k).unwrap(), "13");

        let loaded = storage.fetch_by_id("13").unwrap().unwrap();
        assert_eq!(k, loaded);
        assert!(storage.fetch_by_id("14").unwrap().is_none());
    }

    #[test]
    fn insert_rejects_duplicate() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();

        storage.insert(&kulture("a", 0, 0, 0)).unwrap();
        let err = storage.insert(&kulture("a", 1, -1, 0)).unwrap_err();
        assert!(matches!(err, Error::Duplicate(id) if id == "a"));

        let kept = storage.fetch_by_id("a").unwrap().unwrap();
        assert_eq!(kept.location().x, 0);
    }

    #[test]
    fn update_requires_existing() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();

        let err = storage.update(&kulture("a", 0, 0, 0)).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        storage.insert(&kulture("a", 0, 0, 0)).unwrap();
        storage.update(&kulture("a", 2, -1, -1)).unwrap();
        let loaded = storage.fetch_by_id("a").unwrap().unwrap();
        assert_eq!(loaded.location().x, 2);
    }

    #[test]
    fn delete_requires_existing() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();

        storage.insert(&kulture("a", 0, 0, 0)).unwrap();
        assert_eq!(storage.delete("a").unwrap(), "a");
        assert!(storage.fetch_by_id("a").unwrap().is_none());
        assert!(matches!(storage.delete("a"), Err(Error::NotFound(_))));
    }

    #[test]
    fn list_and_count() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();

        storage.insert(&kulture("a", 0, 0, 0)).unwrap();
        storage.insert(&kulture("b", 1, -1, 0)).unwrap();

        let kultures = storage.list().unwrap();
        assert_eq!(kultures.len(), 2);
        assert_eq!(storage.count().unwrap(), 2);
    }

    #[test]
    fn corrupted_record_is_an_error() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();

        storage
            .db
            .put(kulture_key("bad").as_bytes(), br#"{"id":"bad"}"#)
            .unwrap();
        assert!(matches!(
            storage.fetch_by_id("bad"),
            Err(Error::Serialization(_))
        ));
    }
}
