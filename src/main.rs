use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use aux_store::config::StoreConfig;
use aux_store::registry::AuxStores;

#[derive(Parser)]
#[command(author, version, about = "Auxiliary checkpoint, alert, and deny-list store for a full node")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/store.toml")]
    config: PathBuf,
    #[command(flatten)]
    overrides: Overrides,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Overrides {
    /// Location of the data directory
    #[arg(long)]
    datadir: Option<PathBuf>,
    /// Operate on the test network
    #[arg(long)]
    testnet: bool,
    /// Operate on the regression test network
    #[arg(long)]
    regtest: bool,
    /// Operate on the simulation test network
    #[arg(long)]
    simnet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage operator-supplied block checkpoints
    Checkpoint {
        #[command(subcommand)]
        action: CheckpointAction,
    },
    /// Manage session-scoped checkpoints
    Volatile {
        #[command(subcommand)]
        action: VolatileAction,
    },
    /// Inspect or revoke the network alert keys
    Alert {
        #[command(subcommand)]
        action: AlertAction,
    },
    /// Manage the deny-listed address table
    Deny {
        #[command(subcommand)]
        action: DenyAction,
    },
    /// Generate a default configuration file
    GenerateConfig {
        #[arg(short, long, default_value = "config/store.toml")]
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum CheckpointAction {
    /// Pin a block hash at the given height
    Add { height: i64, hash: String },
    /// Remove the checkpoint at the given height
    Delete { height: i64 },
    /// Print the highest checkpointed height (0 when none are recorded)
    Max,
}

#[derive(Subcommand)]
enum VolatileAction {
    /// Record a session checkpoint at the given height
    Set { height: i64, hash: String },
    /// Drop every session checkpoint
    Clear,
}

#[derive(Subcommand)]
enum AlertAction {
    /// Permanently mark one of the alert keys revoked
    Revoke {
        #[arg(value_enum)]
        slot: AlertKeySlot,
    },
    /// Report whether both alert keys are still unrevoked
    Status,
}

#[derive(Subcommand)]
enum DenyAction {
    /// Add an address to the deny list
    Add { address: String },
    /// Check whether an address is deny-listed
    Check { address: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum AlertKeySlot {
    Main,
    Sub,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    if let Commands::GenerateConfig { path } = &cli.command {
        return generate_config(path);
    }

    let config = load_config(&cli)?;
    // Network resolution is fatal on conflicting flags and must precede any
    // store path derivation.
    let params = config.network()?;
    let stores = AuxStores::new(config.data_dir.clone(), params);

    match cli.command {
        Commands::Checkpoint { action } => run_checkpoint(&stores, action)?,
        Commands::Volatile { action } => run_volatile(&stores, action)?,
        Commands::Alert { action } => run_alert(&stores, action)?,
        Commands::Deny { action } => run_deny(&stores, action)?,
        Commands::GenerateConfig { .. } => unreachable!("handled before store construction"),
    }

    stores.close_all();
    Ok(())
}

fn load_config(cli: &Cli) -> Result<StoreConfig> {
    let mut config = if cli.config.exists() {
        StoreConfig::load(&cli.config)?
    } else {
        StoreConfig::default()
    };
    if let Some(datadir) = &cli.overrides.datadir {
        config.data_dir = datadir.clone();
    }
    config.testnet |= cli.overrides.testnet;
    config.regtest |= cli.overrides.regtest;
    config.simnet |= cli.overrides.simnet;
    Ok(config)
}

fn generate_config(path: &PathBuf) -> Result<()> {
    let config = StoreConfig::default();
    config.save(path)?;
    info!(?path, "wrote default configuration");
    Ok(())
}

fn run_checkpoint(stores: &AuxStores, action: CheckpointAction) -> Result<()> {
    let store = stores.user_checkpoints();
    store.open_db()?;
    match action {
        CheckpointAction::Add { height, hash } => {
            store.add(height, &hash)?;
            info!(height, %hash, "recorded user checkpoint");
        }
        CheckpointAction::Delete { height } => {
            store.delete(height)?;
            info!(height, "deleted user checkpoint");
        }
        CheckpointAction::Max => {
            println!("{}", store.max_checkpoint_height()?);
        }
    }
    Ok(())
}

fn run_volatile(stores: &AuxStores, action: VolatileAction) -> Result<()> {
    let store = stores.volatile_checkpoints();
    store.open_db()?;
    match action {
        VolatileAction::Set { height, hash } => {
            store.set(height, &hash)?;
            info!(height, %hash, "recorded volatile checkpoint");
        }
        VolatileAction::Clear => {
            store.clear_db()?;
            info!("cleared volatile checkpoints");
        }
    }
    Ok(())
}

fn run_alert(stores: &AuxStores, action: AlertAction) -> Result<()> {
    let store = stores.alert_keys();
    store.open_db()?;
    match action {
        AlertAction::Revoke { slot } => {
            let params = stores.params();
            let key = match slot {
                AlertKeySlot::Main => params.alert_pub_main_key,
                AlertKeySlot::Sub => params.alert_pub_sub_key,
            };
            store.revoke(key)?;
            info!(network = params.name, "revoked alert key");
        }
        AlertAction::Status => {
            println!("{}", store.is_valid()?);
        }
    }
    Ok(())
}

fn run_deny(stores: &AuxStores, action: DenyAction) -> Result<()> {
    let store = stores.deny_addresses();
    store.open_db()?;
    match action {
        DenyAction::Add { address } => {
            store.set(&address)?;
            info!(%address, "deny-listed address");
        }
        DenyAction::Check { address } => {
            println!("{}", store.contains(&address)?);
        }
    }
    Ok(())
}
