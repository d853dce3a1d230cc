//! Persistent store for a full node's auxiliary consensus-adjacent data.
//!
//! Four independent key-value namespaces back the node's operator-supplied
//! block checkpoints, session-scoped (volatile) checkpoints, alert-key
//! revocation flags, and deny-listed address table. Each namespace is an
//! embedded database addressed by a path derived from the active network, so
//! mainnet and the test networks never share data.
//!
//! [`registry::AuxStores`] hands out one lazily constructed store per
//! namespace, [`config::StoreConfig`] selects the network and data directory,
//! and the stores themselves live in [`storage`].

pub mod chain;
pub mod config;
pub mod errors;
pub mod registry;
pub mod storage;
