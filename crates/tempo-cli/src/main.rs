//! Tempo CLI - Drive phased system runners from the command line

mod commands;
mod demo;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, phases, run};

#[derive(Parser)]
#[command(name = "tempo")]
#[command(about = "Phased, fault-isolated system dispatch", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the demo simulation for a number of frames
    Run {
        /// Path to a tempo.toml config file
        #[arg(long)]
        config: Option<String>,

        /// Number of frames to simulate
        #[arg(long, default_value_t = 120)]
        frames: u64,

        /// Simulated frame duration in seconds
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,

        /// Register a system that fails every few frames
        #[arg(long)]
        faulty: bool,
    },

    /// List frame-loop phases in execution order
    Phases,

    /// Print the effective configuration as TOML
    Config {
        /// Path to a tempo.toml config file
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            frames,
            dt,
            faulty,
        } => run::run(run::RunArgs {
            config,
            frames,
            dt,
            faulty,
        }),
        Commands::Phases => phases::run(),
        Commands::Config { config } => config::run(config.as_deref()),
    }
}
