//! Command line arguments

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Number of games to simulate.
    #[arg(short, long, default_value_t = 1000)]
    pub games: u32,

    /// Number of players at the table.
    #[arg(short, long, default_value_t = 2)]
    pub players: usize,

    /// Seed for the shuffle RNG, for reproducible runs.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Report output format.
    #[arg(short, long)]
    pub format: Option<Format>,

    /// Trace the first game hand by hand.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum Format {
    #[default]
    Text,
    Json,
}
