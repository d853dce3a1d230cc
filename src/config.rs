use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::chain::{ChainParams, MAINNET, REGTEST, SIMNET, TESTNET4};
use crate::errors::{StoreError, StoreResult};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    #[serde(default)]
    pub testnet: bool,
    #[serde(default)]
    pub regtest: bool,
    #[serde(default)]
    pub simnet: bool,
}

impl StoreConfig {
    pub fn load(path: &Path) -> StoreResult<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|err| StoreError::Config(format!("unable to parse config: {err}")))
    }

    pub fn save(&self, path: &Path) -> StoreResult<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;
        let encoded = toml::to_string_pretty(self)
            .map_err(|err| StoreError::Config(format!("unable to encode config: {err}")))?;
        fs::write(path, encoded)?;
        Ok(())
    }

    /// Resolves the active network from the mutually exclusive flags. Must
    /// succeed before any store path is derived; selecting more than one
    /// network is a fatal configuration error.
    pub fn network(&self) -> StoreResult<&'static ChainParams> {
        let selected = [self.testnet, self.regtest, self.simnet]
            .iter()
            .filter(|flag| **flag)
            .count();
        if selected > 1 {
            return Err(StoreError::Config(
                "the testnet, regtest, and simnet params can't be used together -- choose at most one".to_string(),
            ));
        }
        if self.testnet {
            Ok(&TESTNET4)
        } else if self.regtest {
            Ok(&REGTEST)
        } else if self.simnet {
            Ok(&SIMNET)
        } else {
            Ok(&MAINNET)
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            testnet: false,
            regtest: false,
            simnet: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    use crate::chain::Network;

    #[test]
    fn default_config_selects_mainnet() {
        let config = StoreConfig::default();
        let params = config.network().expect("network");
        assert_eq!(params.network, Network::Mainnet);
    }

    #[test]
    fn conflicting_network_flags_are_rejected() {
        let config = StoreConfig {
            testnet: true,
            simnet: true,
            ..StoreConfig::default()
        };
        let err = config.network().expect_err("conflicting flags should fail");
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn single_network_flag_selects_its_params() {
        let config = StoreConfig {
            regtest: true,
            ..StoreConfig::default()
        };
        let params = config.network().expect("network");
        assert_eq!(params.network, Network::Regtest);
    }

    #[test]
    fn config_round_trips_through_disk() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("store.toml");
        let config = StoreConfig {
            data_dir: PathBuf::from("/var/lib/node/data"),
            testnet: true,
            ..StoreConfig::default()
        };
        config.save(&path).expect("save config");
        let loaded = StoreConfig::load(&path).expect("load config");
        assert_eq!(loaded.data_dir, config.data_dir);
        assert!(loaded.testnet);
        assert!(!loaded.simnet);
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("store.toml");
        fs::write(&path, "data_dir = [not toml").expect("write file");
        let err = StoreConfig::load(&path).expect_err("parse should fail");
        assert!(matches!(err, StoreError::Config(_)));
    }
}
