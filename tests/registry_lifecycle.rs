use std::collections::HashSet;
use std::thread;
use std::time::{Duration, Instant};

use aux_store::chain::{MAINNET, TESTNET4};
use aux_store::registry::AuxStores;
use tempfile::tempdir;

#[test]
fn concurrent_first_access_yields_one_instance() {
    let dir = tempdir().expect("tempdir");
    let stores = AuxStores::new(dir.path(), &MAINNET);

    let mut addresses = HashSet::new();
    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| stores.user_checkpoints() as *const _ as usize))
            .collect();
        for handle in handles {
            addresses.insert(handle.join().expect("join worker"));
        }
    });
    assert_eq!(addresses.len(), 1);
}

#[test]
fn first_access_pays_the_startup_delay_once() {
    let dir = tempdir().expect("tempdir");
    let stores = AuxStores::new(dir.path(), &MAINNET);

    let first = Instant::now();
    stores.deny_addresses();
    assert!(first.elapsed() >= Duration::from_secs(1));

    let second = Instant::now();
    stores.deny_addresses();
    assert!(second.elapsed() < Duration::from_millis(100));
}

#[test]
fn stores_open_under_the_network_directory() {
    let dir = tempdir().expect("tempdir");
    let stores = AuxStores::new(dir.path(), &TESTNET4);

    let store = stores.user_checkpoints();
    store.open_db().expect("open store");
    store.close_db();

    // The fourth-generation test network keeps the legacy "testnet" name.
    assert!(dir
        .path()
        .join("testnet")
        .join("usercheckpoints_leveldb")
        .exists());
}

#[test]
fn close_all_skips_untouched_stores() {
    let dir = tempdir().expect("tempdir");
    let stores = AuxStores::new(dir.path(), &MAINNET);

    let store = stores.volatile_checkpoints();
    store.open_db().expect("open store");
    stores.close_all();

    // Close left the store reopenable.
    store.open_db().expect("reopen store");
    stores.close_all();
}
