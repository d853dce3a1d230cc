use std::path::PathBuf;

use rocksdb::IteratorMode;
use tracing::warn;

use crate::errors::StoreResult;

use super::{
    decode_height_key, height_key, NamespaceDb, USER_CHECKPOINT_PREFIX,
    VOLATILE_CHECKPOINT_PREFIX,
};

/// Operator-supplied checkpoints pinning a block hash at a height. Entries
/// survive restarts; height 0 is reserved as the "no checkpoints" sentinel.
pub struct UserCheckpointStore {
    inner: NamespaceDb,
}

impl UserCheckpointStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            inner: NamespaceDb::new(USER_CHECKPOINT_PREFIX, path),
        }
    }

    pub fn open_db(&self) -> StoreResult<()> {
        self.inner.open()
    }

    pub fn close_db(&self) {
        self.inner.close()
    }

    pub fn add(&self, height: i64, hash: &str) -> StoreResult<()> {
        self.inner
            .with_db(|db| Ok(db.put(height_key(height), hash.as_bytes())?))
    }

    pub fn delete(&self, height: i64) -> StoreResult<()> {
        self.inner.with_db(|db| Ok(db.delete(height_key(height))?))
    }

    /// Highest checkpointed height, or 0 when the namespace is empty. The
    /// fixed-width key encoding makes the engine's last key the highest
    /// height, so a single reverse step answers the query.
    pub fn max_checkpoint_height(&self) -> StoreResult<i64> {
        self.inner.with_db(|db| {
            let mut iter = db.iterator(IteratorMode::End);
            let Some(entry) = iter.next() else {
                return Ok(0);
            };
            let (key, _value) = entry?;
            match decode_height_key(&key) {
                Some(height) => Ok(height),
                None => {
                    warn!(key = %hex::encode(&key), "malformed checkpoint key, reporting no checkpoints");
                    Ok(0)
                }
            }
        })
    }
}

/// Session-scoped checkpoints. Same record shape as the user namespace, but
/// the whole table is droppable in one sweep between sessions.
pub struct VolatileCheckpointStore {
    inner: NamespaceDb,
}

impl VolatileCheckpointStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            inner: NamespaceDb::new(VOLATILE_CHECKPOINT_PREFIX, path),
        }
    }

    pub fn open_db(&self) -> StoreResult<()> {
        self.inner.open()
    }

    pub fn close_db(&self) {
        self.inner.close()
    }

    pub fn set(&self, height: i64, hash: &str) -> StoreResult<()> {
        self.inner
            .with_db(|db| Ok(db.put(height_key(height), hash.as_bytes())?))
    }

    /// Deletes every entry. Best effort: the first delete failure aborts the
    /// sweep and already-deleted entries stay deleted.
    pub fn clear_db(&self) -> StoreResult<()> {
        self.inner.with_db(|db| {
            for entry in db.iterator(IteratorMode::Start) {
                let (key, _value) = entry?;
                db.delete(&key)?;
            }
            Ok(())
        })
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        self.inner.with_db(|db| {
            Ok(db.iterator(IteratorMode::Start).next().transpose()?.is_none())
        })
    }
}
