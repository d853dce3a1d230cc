use std::path::PathBuf;

use tracing::warn;

use crate::chain::ChainParams;
use crate::errors::StoreResult;

use super::{NamespaceDb, ALERT_KEY_PREFIX};

const REVOKED: &[u8] = b"true";
const NOT_REVOKED: &[u8] = b"false";

/// Revocation flags for the network's two alert public keys, stored under the
/// raw key bytes as the literal strings "true" and "false".
pub struct AlertKeyStore {
    inner: NamespaceDb,
    params: &'static ChainParams,
}

impl AlertKeyStore {
    pub fn new(path: PathBuf, params: &'static ChainParams) -> Self {
        Self {
            inner: NamespaceDb::new(ALERT_KEY_PREFIX, path),
            params,
        }
    }

    pub fn open_db(&self) -> StoreResult<()> {
        self.inner.open()
    }

    pub fn close_db(&self) {
        self.inner.close()
    }

    /// Marks an alert key revoked. There is no unset path; once written the
    /// flag stays "true".
    pub fn revoke(&self, key: &[u8]) -> StoreResult<()> {
        self.inner.with_db(|db| Ok(db.put(key, REVOKED)?))
    }

    /// Two-of-two gate over the main and sub alert keys: true only while
    /// both flags read exactly "false". A key never seen before is
    /// materialized as "false" and counts as unrevoked; a failure of that
    /// initialization write is logged and ignored.
    pub fn is_valid(&self) -> StoreResult<bool> {
        let main = self.flag_value(self.params.alert_pub_main_key)?;
        let sub = self.flag_value(self.params.alert_pub_sub_key)?;
        Ok(main == NOT_REVOKED && sub == NOT_REVOKED)
    }

    fn flag_value(&self, key: &[u8]) -> StoreResult<Vec<u8>> {
        self.inner.with_db(|db| match db.get(key)? {
            Some(value) => Ok(value),
            None => {
                if let Err(err) = db.put(key, NOT_REVOKED) {
                    warn!(%err, "failed to initialize alert key flag");
                }
                Ok(NOT_REVOKED.to_vec())
            }
        })
    }
}
