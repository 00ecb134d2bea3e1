//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "holdem",
    version,
    about = "Texas Hold'em rules engine CLI",
    arg_required_else_help = true
)]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deal one hand, check it down and show the result
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(2..=22))]
        players: Option<u8>,
    },
    /// Evaluate the best five-card hand out of 5 to 7 cards
    Eval {
        /// Cards such as "AS KS QS JS TS 2C 3D"
        #[arg(long)]
        cards: String,
        /// A second set of cards to compare against
        #[arg(long)]
        compare: Option<String>,
    },
    /// Estimate win probability by Monte-Carlo simulation
    Equity {
        /// Two hole cards, e.g. "AS AH"
        #[arg(long)]
        hole: String,
        /// Known community cards (0 to 5)
        #[arg(long, default_value = "")]
        board: String,
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=21))]
        opponents: u8,
        #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u32).range(1..))]
        sims: u32,
        #[arg(long)]
        seed: Option<u64>,
        /// Count a tie as half a win
        #[arg(long)]
        split_ties: bool,
    },
    /// Play hands against computer opponents
    Play {
        #[arg(long, value_enum, default_value_t = Vs::Ai)]
        vs: Vs,
        #[arg(long)]
        hands: Option<u32>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(2..=22))]
        players: Option<u8>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = Ai::Baseline)]
        ai: Ai,
        /// Append every finished hand to this JSONL file
        #[arg(long)]
        output: Option<String>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

/// Who sits in seat 0 during `play`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Vs {
    /// Seat 0 is played from stdin
    Human,
    /// Every seat is played by the computer
    Ai,
}

impl Vs {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vs::Human => "human",
            Vs::Ai => "ai",
        }
    }
}

/// Strategy used by computer-controlled seats.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Ai {
    /// Preflop chart and made-hand strength with pot odds
    Baseline,
    /// Bets by Monte-Carlo equity
    Equity,
    /// Checks or calls everything
    Station,
}
