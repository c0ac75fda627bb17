//! Daolette command line
//!
//! Settles single rounds, queries limits and multipliers, and runs random-round
//! simulations against the in-process treasury.

use clap::{Args, Parser, Subcommand, ValueEnum};
use daolette::{
    common::types::{AccountKind, Address, TxContext},
    config::{generate_sample_config, ConfigLoader, DaoletteConfig},
    errors::DaoletteResult,
    factory::RuntimeFactory,
    simulator::{BetShape, SimulationConfig, Simulator},
    treasury::InMemoryTreasury,
    Runtime,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

/// Daolette wagering settlement engine
#[derive(Parser)]
#[command(name = "daolette")]
#[command(about = "Single-round wagering settlement against a pooled treasury")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Bet on a comma-separated list of numbers
    Numbers {
        /// Numbers between 1 and 20, e.g. "3,7,11"
        #[arg(short, long)]
        numbers: String,

        #[command(flatten)]
        bet: BetArgs,
    },

    /// Bet on red or black
    Color {
        #[arg(value_enum)]
        color: Color,

        #[command(flatten)]
        bet: BetArgs,
    },

    /// Bet on odd or even
    Parity {
        #[arg(value_enum)]
        parity: Parity,

        #[command(flatten)]
        bet: BetArgs,
    },

    /// Show the stake ceiling for a breadth (0 for color and parity bets)
    Limit {
        #[arg(short, long, default_value = "0")]
        breadth: usize,
    },

    /// Show the published multiplier table
    Multipliers,

    /// Play random rounds and print aggregate results
    Simulate {
        #[arg(short, long, default_value = "1000")]
        rounds: usize,

        /// RNG seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,

        /// Fixed stake for every round (random admissible stake otherwise)
        #[arg(long, value_parser = parse_amount)]
        stake: Option<u128>,

        /// Restrict rounds to these bet shapes
        #[arg(long, value_enum)]
        shape: Vec<ShapeArg>,
    },

    /// Write a sample configuration file
    InitConfig {
        #[arg(short, long, default_value = "daolette.toml")]
        output: PathBuf,
    },
}

#[derive(Args)]
struct BetArgs {
    /// Stake in the smallest currency unit (underscores allowed)
    #[arg(short = 'a', long, value_parser = parse_amount)]
    stake: u128,

    /// Bettor address (hx...); a fixed demo address when omitted
    #[arg(short, long)]
    from: Option<Address>,

    /// Caller-supplied seed mixed into the draw
    #[arg(short, long, default_value = "")]
    seed: String,

    /// Transaction hash as 64 hex digits; random when omitted
    #[arg(long, value_parser = parse_hash)]
    tx_hash: Option<[u8; 32]>,

    /// Block timestamp in microseconds; the current time when omitted
    #[arg(long)]
    timestamp: Option<u64>,

    /// Timestamp signed into the transaction; the block timestamp when omitted
    #[arg(long)]
    tx_timestamp: Option<u64>,
}

impl BetArgs {
    fn tx_context(&self) -> TxContext {
        let from = self
            .from
            .unwrap_or_else(|| Address::derive(AccountKind::EndUser, "daolette-cli"));
        let hash = self.tx_hash.unwrap_or_else(rand::random);
        let timestamp = self
            .timestamp
            .unwrap_or_else(|| chrono::Utc::now().timestamp_micros().max(0) as u64);
        let tx = TxContext::direct(hash, timestamp, from, self.stake);
        match self.tx_timestamp {
            Some(signed) => tx.with_tx_timestamp(signed),
            None => tx,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Color {
    Red,
    Black,
}

#[derive(Clone, Copy, ValueEnum)]
enum Parity {
    Odd,
    Even,
}

#[derive(Clone, Copy, ValueEnum)]
enum ShapeArg {
    Numbers,
    Color,
    Parity,
}

impl From<ShapeArg> for BetShape {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Numbers => BetShape::Numbers,
            ShapeArg::Color => BetShape::Color,
            ShapeArg::Parity => BetShape::Parity,
        }
    }
}

fn main() -> DaoletteResult<()> {
    let cli = Cli::parse();

    if let Commands::InitConfig { output } = &cli.command {
        let path = output.to_string_lossy();
        generate_sample_config(&path)?;
        println!("Sample configuration written to {}", path);
        return Ok(());
    }

    let loader = match &cli.config {
        Some(path) => ConfigLoader::new().with_path(path),
        None => ConfigLoader::new(),
    };
    let config = loader.load()?;
    init_tracing(&config, cli.verbose);

    let mut runtime = RuntimeFactory::from_config(&config)?;

    match cli.command {
        Commands::Numbers { numbers, bet } => {
            let tx = bet.tx_context();
            let receipt = runtime.bet_on_numbers(&tx, &numbers, &bet.seed)?;
            print_json(&receipt);
        }
        Commands::Color { color, bet } => {
            let tx = bet.tx_context();
            let receipt = runtime.bet_on_color(&tx, matches!(color, Color::Red), &bet.seed)?;
            print_json(&receipt);
        }
        Commands::Parity { parity, bet } => {
            let tx = bet.tx_context();
            let receipt = runtime.bet_on_parity(&tx, matches!(parity, Parity::Odd), &bet.seed)?;
            print_json(&receipt);
        }
        Commands::Limit { breadth } => {
            println!("{}", runtime.get_bet_limit(breadth)?);
        }
        Commands::Multipliers => {
            println!("{}", runtime.get_multipliers());
        }
        Commands::Simulate {
            rounds,
            seed,
            stake,
            shape,
        } => {
            let mut simulator = Simulator::new(SimulationConfig {
                rounds,
                shapes: shape.into_iter().map(BetShape::from).collect(),
                stake,
                seed,
                ..Default::default()
            });
            let report = simulator.run(&mut runtime)?;
            print_json(&report);
        }
        Commands::InitConfig { .. } => {}
    }

    if config.monitoring.json_events {
        print_events(&mut runtime);
    }

    Ok(())
}

fn init_tracing(config: &DaoletteConfig, verbose: bool) {
    let level = if verbose {
        "debug".to_string()
    } else {
        config.monitoring.log_level.to_string()
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("daolette={}", level).into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => warn!("Failed to render output: {}", e),
    }
}

fn print_events(runtime: &mut Runtime<InMemoryTreasury>) {
    for event in runtime.drain_events() {
        match serde_json::to_string(&event) {
            Ok(line) => println!("{}", line),
            Err(e) => warn!("Failed to render event: {}", e),
        }
    }
}

fn parse_amount(raw: &str) -> Result<u128, String> {
    raw.replace('_', "")
        .parse()
        .map_err(|e| format!("invalid amount '{}': {}", raw, e))
}

fn parse_hash(raw: &str) -> Result<[u8; 32], String> {
    let bytes = hex::decode(raw.trim_start_matches("0x")).map_err(|e| format!("invalid hash: {}", e))?;
    bytes
        .try_into()
        .map_err(|_| "transaction hash must be 32 bytes".to_string())
}
