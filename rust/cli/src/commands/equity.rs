//! Equity command: Monte-Carlo win probability for two hole cards.

use std::io::Write;

use holdem_engine::cards::{format_cards, parse_cards};
use holdem_engine::equity::{EquityEstimator, TiePolicy};

use crate::error::CliError;
use crate::formatters::format_equity;

#[derive(Debug, Clone)]
pub struct EquityArgs<'a> {
    pub hole: &'a str,
    pub board: &'a str,
    pub opponents: usize,
    pub simulations: u32,
    pub seed: Option<u64>,
    pub split_ties: bool,
}

pub fn handle_equity_command(args: &EquityArgs<'_>, out: &mut dyn Write) -> Result<(), CliError> {
    let hole = parse_cards(args.hole)?;
    let [first, second] = hole[..] else {
        return Err(CliError::InvalidInput(format!(
            "need exactly 2 hole cards, got {}",
            hole.len()
        )));
    };
    let board = parse_cards(args.board)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let policy = if args.split_ties {
        TiePolicy::Split
    } else {
        TiePolicy::Loss
    };
    let mut estimator = EquityEstimator::new(seed).with_policy(policy);
    let report = estimator.estimate([first, second], &board, args.opponents, args.simulations)?;

    writeln!(
        out,
        "equity: hole={} board={} opponents={} sims={} seed={}",
        format_cards(&hole),
        if board.is_empty() {
            "-".to_string()
        } else {
            format_cards(&board)
        },
        args.opponents,
        args.simulations,
        seed
    )?;
    writeln!(out, "{}", format_equity(&report))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args<'a>(hole: &'a str, board: &'a str) -> EquityArgs<'a> {
        EquityArgs {
            hole,
            board,
            opponents: 1,
            simulations: 300,
            seed: Some(11),
            split_ties: false,
        }
    }

    fn run(a: &EquityArgs<'_>) -> Result<String, CliError> {
        let mut out = Vec::new();
        handle_equity_command(a, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn reports_header_and_counts() {
        let output = run(&args("AS AH", "")).unwrap();
        assert!(output.starts_with("equity: hole=AS AH board=- opponents=1 sims=300 seed=11\n"));
        assert!(output.contains("over 300 simulations"));
    }

    #[test]
    fn seeded_runs_repeat() {
        let a = args("KS QS", "JS TS 2D");
        assert_eq!(run(&a).unwrap(), run(&a).unwrap());
    }

    #[test]
    fn wrong_hole_count_is_invalid_input() {
        assert!(matches!(
            run(&args("AS", "")),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(
            run(&args("AS AH KD", "")),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn duplicate_between_hole_and_board_is_rejected() {
        assert!(run(&args("AS AH", "AS 2D 3C")).is_err());
    }
}
