use std::path::PathBuf;

use crate::errors::StoreResult;

use super::{NamespaceDb, DENY_ADDRESS_PREFIX};

// Presence is the whole record; the value is a fixed sentinel.
const DENY_SENTINEL: &[u8] = b"0";

/// Addresses excluded from node-level policy. An address that was never set
/// is indistinguishable from one that is explicitly allowed.
pub struct DenyAddressStore {
    inner: NamespaceDb,
}

impl DenyAddressStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            inner: NamespaceDb::new(DENY_ADDRESS_PREFIX, path),
        }
    }

    pub fn open_db(&self) -> StoreResult<()> {
        self.inner.open()
    }

    pub fn close_db(&self) {
        self.inner.close()
    }

    pub fn set(&self, address: &str) -> StoreResult<()> {
        self.inner
            .with_db(|db| Ok(db.put(address.as_bytes(), DENY_SENTINEL)?))
    }

    pub fn contains(&self, address: &str) -> StoreResult<bool> {
        self.inner
            .with_db(|db| Ok(db.get(address.as_bytes())?.is_some()))
    }
}
