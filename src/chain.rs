use hex_literal::hex;

// Alert messages are signed with one of two network-wide keys. The pair below
// is shared by the test networks, matching the upstream parameter tables.
const ALERT_PUB_MAIN_KEY: [u8; 65] = hex!(
    "04fc9702847840aaf195de8442ebecedf5b095cdbb9bc716bda9110971b28a49e0ead8564ff0db22209e0374782c093bb899692d524e9d6a6956e7c5ecbcd68284"
);
const ALERT_PUB_SUB_KEY: [u8; 65] = hex!(
    "04302390343f91cc401d56d68b123028bf52e5fca1939df127f63c6467cdf9c8e2c14b61104cf817d0b780da337893ecc4aaff1309e536162dabbdb45200ca2b0a"
);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet4,
    Regtest,
    Simnet,
}

/// Static per-network parameters consumed by the store layer: the canonical
/// network name and the two alert public keys whose revocation flags live in
/// the alert key namespace.
pub struct ChainParams {
    pub name: &'static str,
    pub network: Network,
    pub alert_pub_main_key: &'static [u8],
    pub alert_pub_sub_key: &'static [u8],
}

pub static MAINNET: ChainParams = ChainParams {
    name: "mainnet",
    network: Network::Mainnet,
    alert_pub_main_key: &ALERT_PUB_MAIN_KEY,
    alert_pub_sub_key: &ALERT_PUB_SUB_KEY,
};

pub static TESTNET4: ChainParams = ChainParams {
    name: "testnet4",
    network: Network::Testnet4,
    alert_pub_main_key: &ALERT_PUB_MAIN_KEY,
    alert_pub_sub_key: &ALERT_PUB_SUB_KEY,
};

pub static REGTEST: ChainParams = ChainParams {
    name: "regtest",
    network: Network::Regtest,
    alert_pub_main_key: &ALERT_PUB_MAIN_KEY,
    alert_pub_sub_key: &ALERT_PUB_SUB_KEY,
};

pub static SIMNET: ChainParams = ChainParams {
    name: "simnet",
    network: Network::Simnet,
    alert_pub_main_key: &ALERT_PUB_MAIN_KEY,
    alert_pub_sub_key: &ALERT_PUB_SUB_KEY,
};

/// Directory name used for a network's data on disk. Historical deployments
/// wrote the fourth-generation test network under "testnet", not "testnet4",
/// so that name is pinned until a data-directory migration renames it.
pub fn net_dir_name(params: &ChainParams) -> &'static str {
    match params.network {
        Network::Testnet4 => "testnet",
        _ => params.name,
    }
}
