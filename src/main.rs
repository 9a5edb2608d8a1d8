use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use minisim::backup::{self, MemoryStore, Task};
use minisim::config;

#[derive(Parser)]
#[command(name = "minisim", version, about = "Discrete-event simulation and key backup")]
struct Cli {
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a scenario file to completion.
    Simulate {
        /// Scenario TOML file.
        scenario: PathBuf,
    },
    /// Copy keys from the store snapshot into dump files.
    Backup(KeysArgs),
    /// Create keys in the store snapshot from dump files.
    Restore(KeysArgs),
}

#[derive(clap::Args)]
struct KeysArgs {
    /// JSON snapshot of the store.
    #[arg(long)]
    store: PathBuf,

    /// Directory holding the dump files.
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Keys to copy.
    #[arg(required = true)]
    keys: Vec<String>,
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Simulate { scenario } => {
            let config = config::load_config(&scenario)?;
            init_tracing(cli.log_level.as_deref().unwrap_or(&config.logging.level));
            tracing::info!(
                "Loaded {} job(s) from {}",
                config.jobs.len(),
                scenario.display()
            );

            let mut sim = config.build_simulator();
            let dispatched = sim.simulate()?;
            println!(
                "dispatched {} events, final time {}",
                dispatched,
                sim.current_time()
            );
        }
        Command::Backup(args) => {
            init_tracing(cli.log_level.as_deref().unwrap_or("info"));
            let mut store = MemoryStore::load(&args.store)?;
            backup::run_task(Task::Backup, &mut store, &args.dir, &args.keys)?;
        }
        Command::Restore(args) => {
            init_tracing(cli.log_level.as_deref().unwrap_or("info"));
            let mut store = MemoryStore::load(&args.store)?;
            backup::run_task(Task::Restore, &mut store, &args.dir, &args.keys)?;
            store.save(&args.store)?;
        }
    }

    Ok(())
}
