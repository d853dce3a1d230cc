use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use rocksdb::{DBWithThreadMode, MultiThreaded, Options};
use tracing::{debug, warn};

use crate::chain::{net_dir_name, ChainParams};
use crate::errors::{StoreError, StoreResult};

mod alerts;
mod checkpoints;
mod denylist;

pub use alerts::AlertKeyStore;
pub use checkpoints::{UserCheckpointStore, VolatileCheckpointStore};
pub use denylist::DenyAddressStore;

pub(crate) type Db = DBWithThreadMode<MultiThreaded>;

pub const USER_CHECKPOINT_PREFIX: &str = "usercheckpoints";
pub const VOLATILE_CHECKPOINT_PREFIX: &str = "volatilecheckpoints";
pub const ALERT_KEY_PREFIX: &str = "alertkey";
pub const DENY_ADDRESS_PREFIX: &str = "denyaddress";

// Existing deployments write every namespace under a `*_leveldb` directory;
// the suffix is part of the on-disk compatibility contract and stays fixed.
const DB_TYPE: &str = "leveldb";

const HEIGHT_KEY_WIDTH: usize = 20;

/// On-disk location of one namespace:
/// `<data_dir>/<network dir>/<prefix>_leveldb`.
pub fn namespace_path(data_dir: &Path, params: &ChainParams, prefix: &str) -> PathBuf {
    data_dir
        .join(net_dir_name(params))
        .join(format!("{prefix}_{DB_TYPE}"))
}

/// Encodes a block height as fixed-width zero-padded decimal ASCII so the
/// engine's lexicographic key order matches numeric height order.
pub(crate) fn height_key(height: i64) -> Vec<u8> {
    format!("{height:0width$}", width = HEIGHT_KEY_WIDTH).into_bytes()
}

pub(crate) fn decode_height_key(key: &[u8]) -> Option<i64> {
    std::str::from_utf8(key).ok()?.parse().ok()
}

fn open_namespace(path: &Path) -> StoreResult<Db> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut opts = Options::default();
    opts.create_if_missing(true);
    let db = Db::open(&opts, path)?;
    Ok(db)
}

/// Lifecycle plumbing shared by the four namespace stores: a lazily opened
/// handle where `None` means "not open", an idempotent open, and a close that
/// leaves the store reopenable.
pub(crate) struct NamespaceDb {
    namespace: &'static str,
    path: PathBuf,
    db: RwLock<Option<Db>>,
}

impl NamespaceDb {
    pub(crate) fn new(namespace: &'static str, path: PathBuf) -> Self {
        Self {
            namespace,
            path,
            db: RwLock::new(None),
        }
    }

    pub(crate) fn open(&self) -> StoreResult<()> {
        let mut guard = self.db.write();
        if guard.is_some() {
            return Ok(());
        }
        let db = open_namespace(&self.path)?;
        debug!(
            namespace = self.namespace,
            path = %self.path.display(),
            "opened namespace store"
        );
        *guard = Some(db);
        Ok(())
    }

    pub(crate) fn close(&self) {
        let mut guard = self.db.write();
        if let Some(db) = guard.take() {
            if let Err(err) = db.flush() {
                warn!(namespace = self.namespace, %err, "flush on close failed");
            }
            debug!(namespace = self.namespace, "closed namespace store");
        }
    }

    pub(crate) fn with_db<T>(&self, op: impl FnOnce(&Db) -> StoreResult<T>) -> StoreResult<T> {
        let guard = self.db.read();
        match guard.as_ref() {
            Some(db) => op(db),
            None => Err(StoreError::NotOpen(self.namespace)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::chain::{MAINNET, SIMNET, TESTNET4};

    #[test]
    fn height_keys_are_fixed_width() {
        assert_eq!(height_key(0), b"00000000000000000000");
        assert_eq!(height_key(42), b"00000000000000000042");
        assert_eq!(height_key(i64::MAX), b"09223372036854775807");
    }

    #[test]
    fn height_key_order_matches_numeric_order() {
        let heights = [0, 1, 9, 10, 99, 100, 4_294_967_296, i64::MAX - 1, i64::MAX];
        for pair in heights.windows(2) {
            assert!(height_key(pair[0]) < height_key(pair[1]));
        }
    }

    #[test]
    fn height_keys_round_trip() {
        for height in [0, 1, 777, 1_000_000, i64::MAX] {
            assert_eq!(decode_height_key(&height_key(height)), Some(height));
        }
    }

    #[test]
    fn malformed_height_keys_decode_to_none() {
        assert_eq!(decode_height_key(b"not-a-height"), None);
        assert_eq!(decode_height_key(&[0xff, 0xfe]), None);
    }

    #[test]
    fn namespace_paths_follow_network_layout() {
        let root = Path::new("/var/lib/node/data");
        assert_eq!(
            namespace_path(root, &MAINNET, USER_CHECKPOINT_PREFIX),
            Path::new("/var/lib/node/data/mainnet/usercheckpoints_leveldb")
        );
        assert_eq!(
            namespace_path(root, &TESTNET4, ALERT_KEY_PREFIX),
            Path::new("/var/lib/node/data/testnet/alertkey_leveldb")
        );
        assert_eq!(
            namespace_path(root, &SIMNET, DENY_ADDRESS_PREFIX),
            Path::new("/var/lib/node/data/simnet/denyaddress_leveldb")
        );
    }
}
