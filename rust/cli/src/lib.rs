//! # holdem CLI Library
//!
//! Command-line driver for the `holdem-engine` rules engine. It deals and
//! plays hands through the engine's public API, evaluates hands and
//! estimates equity.
//!
//! ## Main Entry Point
//!
//! [`run`] parses arguments, dispatches to a subcommand and returns the
//! process exit code.
//!
//! ```
//! use std::io;
//! let args = vec!["holdem", "eval", "--cards", "AS KS QS JS TS"];
//! let code = holdem_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `deal`: Deal one hand and check it down
//! - `eval`: Evaluate (and optionally compare) 5 to 7 cards
//! - `equity`: Monte-Carlo win probability for two hole cards
//! - `play`: Play hands against computer opponents, optionally from stdin
//! - `cfg`: Display the resolved configuration

use std::io::Write;

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod policy;
pub mod ui;
pub mod validation;

use cli::{Commands, HoldemCli};
use commands::{
    EquityArgs, PlayOptions, handle_cfg_command, handle_deal_command, handle_equity_command,
    handle_eval_command, handle_play_command,
};

pub use cli::{Ai, Vs};
pub use error::CliError;

const COMMANDS: &[&str] = &["deal", "eval", "equity", "play", "cfg"];

/// Installs the stderr log subscriber. `RUST_LOG` overrides the default
/// `warn` level. Calling it twice is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Parses `args` and runs the selected command.
///
/// Returns `0` on success, `2` on any error and `130` when an interactive
/// session loses its input.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Eval { cards, compare } => handle_eval_command(&cards, compare.as_deref(), out),
        Commands::Equity {
            hole,
            board,
            opponents,
            sims,
            seed,
            split_ties,
        } => {
            let args = EquityArgs {
                hole: &hole,
                board: &board,
                opponents: usize::from(opponents),
                simulations: sims,
                seed,
                split_ties,
            };
            handle_equity_command(&args, out)
        }
        Commands::Deal { seed, players } => config::load_with_sources()
            .map_err(CliError::from)
            .and_then(|resolved| handle_deal_command(&resolved.config, seed, players, out)),
        Commands::Play {
            vs,
            hands,
            players,
            seed,
            ai,
            output,
        } => {
            let opts = PlayOptions {
                vs,
                hands,
                players: players.map(usize::from),
                seed,
                ai,
                output,
            };
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            config::load_with_sources()
                .map_err(CliError::from)
                .and_then(|resolved| {
                    handle_play_command(&resolved.config, &opts, out, err, &mut stdin_lock)
                })
        }
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // help and version go to stdout
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }
    let mut usage = || -> std::io::Result<()> {
        writeln!(err, "{}", e)?;
        writeln!(err)?;
        writeln!(err, "holdem - Texas Hold'em rules engine")?;
        writeln!(err, "Usage: holdem <command> [options]\n")?;
        writeln!(err, "Commands:")?;
        for c in COMMANDS {
            writeln!(err, "  {}", c)?;
        }
        writeln!(err, "\nFor full help, run: holdem --help")
    };
    let _ = usage();
    exit_code::ERROR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subcommand_parses() {
        let commands = [
            vec!["holdem", "cfg"],
            vec!["holdem", "deal", "--seed", "1", "--players", "6"],
            vec!["holdem", "eval", "--cards", "AS KS QS JS TS"],
            vec!["holdem", "equity", "--hole", "AS AH", "--sims", "10"],
            vec!["holdem", "play", "--vs", "human", "--ai", "station"],
        ];
        for args in commands {
            assert!(HoldemCli::try_parse_from(&args).is_ok(), "{:?}", args);
        }
    }

    #[test]
    fn table_size_is_bounded() {
        assert!(HoldemCli::try_parse_from(["holdem", "deal", "--players", "1"]).is_err());
        assert!(HoldemCli::try_parse_from(["holdem", "deal", "--players", "23"]).is_err());
        assert!(HoldemCli::try_parse_from(["holdem", "play", "--players", "22"]).is_ok());
    }

    #[test]
    fn equity_rejects_zero_sims_and_opponents() {
        assert!(
            HoldemCli::try_parse_from(["holdem", "equity", "--hole", "AS AH", "--sims", "0"])
                .is_err()
        );
        assert!(
            HoldemCli::try_parse_from(["holdem", "equity", "--hole", "AS AH", "--opponents", "0"])
                .is_err()
        );
    }

    #[test]
    fn unknown_command_prints_usage() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(["holdem", "shuffle"], &mut out, &mut err);
        assert_eq!(code, exit_code::ERROR);
        let text = String::from_utf8(err).unwrap();
        assert!(text.contains("Commands:"));
        assert!(text.contains("  equity"));
        assert!(out.is_empty());
    }

    #[test]
    fn init_tracing_twice_is_fine() {
        init_tracing();
        init_tracing();
    }
}
