use std::path::PathBuf;
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

use tracing::info;

use crate::chain::ChainParams;
use crate::storage::{
    namespace_path, AlertKeyStore, DenyAddressStore, UserCheckpointStore,
    VolatileCheckpointStore, ALERT_KEY_PREFIX, DENY_ADDRESS_PREFIX, USER_CHECKPOINT_PREFIX,
    VOLATILE_CHECKPOINT_PREFIX,
};

/// Pause before a namespace store is constructed for the first time, giving a
/// previous process instance time to release its database lock.
const STARTUP_DELAY: Duration = Duration::from_secs(1);

/// One instance of every auxiliary namespace store, built after configuration
/// has been loaded and handed by reference to whatever needs checkpoint,
/// alert, or deny-list access. Each store is constructed at most once; all
/// concurrent first callers block until that construction finishes.
pub struct AuxStores {
    data_dir: PathBuf,
    params: &'static ChainParams,
    user: OnceLock<UserCheckpointStore>,
    volatile: OnceLock<VolatileCheckpointStore>,
    alerts: OnceLock<AlertKeyStore>,
    deny: OnceLock<DenyAddressStore>,
}

impl AuxStores {
    pub fn new(data_dir: impl Into<PathBuf>, params: &'static ChainParams) -> Self {
        Self {
            data_dir: data_dir.into(),
            params,
            user: OnceLock::new(),
            volatile: OnceLock::new(),
            alerts: OnceLock::new(),
            deny: OnceLock::new(),
        }
    }

    pub fn params(&self) -> &'static ChainParams {
        self.params
    }

    pub fn user_checkpoints(&self) -> &UserCheckpointStore {
        self.user.get_or_init(|| {
            throttle_startup(USER_CHECKPOINT_PREFIX);
            UserCheckpointStore::new(self.namespace_path(USER_CHECKPOINT_PREFIX))
        })
    }

    pub fn volatile_checkpoints(&self) -> &VolatileCheckpointStore {
        self.volatile.get_or_init(|| {
            throttle_startup(VOLATILE_CHECKPOINT_PREFIX);
            VolatileCheckpointStore::new(self.namespace_path(VOLATILE_CHECKPOINT_PREFIX))
        })
    }

    pub fn alert_keys(&self) -> &AlertKeyStore {
        self.alerts.get_or_init(|| {
            throttle_startup(ALERT_KEY_PREFIX);
            AlertKeyStore::new(self.namespace_path(ALERT_KEY_PREFIX), self.params)
        })
    }

    pub fn deny_addresses(&self) -> &DenyAddressStore {
        self.deny.get_or_init(|| {
            throttle_startup(DENY_ADDRESS_PREFIX);
            DenyAddressStore::new(self.namespace_path(DENY_ADDRESS_PREFIX))
        })
    }

    /// Closes every store that was constructed. Stores that were never
    /// touched are skipped; closing an unopened store is a no-op.
    pub fn close_all(&self) {
        if let Some(store) = self.user.get() {
            store.close_db();
        }
        if let Some(store) = self.volatile.get() {
            store.close_db();
        }
        if let Some(store) = self.alerts.get() {
            store.close_db();
        }
        if let Some(store) = self.deny.get() {
            store.close_db();
        }
    }

    fn namespace_path(&self, prefix: &str) -> PathBuf {
        namespace_path(&self.data_dir, self.params, prefix)
    }
}

fn throttle_startup(namespace: &str) {
    info!(
        namespace,
        delay_ms = STARTUP_DELAY.as_millis() as u64,
        "throttling store construction"
    );
    thread::sleep(STARTUP_DELAY);
}
