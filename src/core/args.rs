//! Core domain: command-line session options.

use clap::Parser;

use crate::core::SessionConfig;
use crate::movement::roster::MAX_PLAYERS;

/// Local multiplayer slime brawler
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(author, version, about, long_about = None)]
pub struct SessionArgs {
    /// Number of local players
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=MAX_PLAYERS as i64))]
    pub players: u8,
    /// Seed for ambient randomness; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,
}

impl From<SessionArgs> for SessionConfig {
    fn from(args: SessionArgs) -> Self {
        Self {
            players: usize::from(args.players),
            seed: args.seed,
        }
    }
}
