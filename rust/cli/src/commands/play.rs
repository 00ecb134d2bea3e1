//! # Play Command
//!
//! Runs a session of hands at one table. Computer seats use a [`Policy`];
//! with `--vs human` seat 0 is played from stdin instead.
//!
//! Finished hands can be appended to a JSONL file as engine
//! [`HandRecord`](holdem_engine::logger::HandRecord)s.

use std::io::{BufRead, Write};

use holdem_engine::engine::Engine;
use holdem_engine::events::EventLog;
use holdem_engine::logger::HandLogger;
use holdem_engine::player::PlayerAction;
use tracing::{info, warn};

use crate::cli::{Ai, Vs};
use crate::commands::print_streets;
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_action, format_board, format_result};
use crate::io_utils::read_stdin_line;
use crate::policy::{Decision, Policy, create_policy};
use crate::ui;
use crate::validation::{ParseResult, parse_player_action};

const HUMAN_SEAT: usize = 0;

#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub vs: Vs,
    pub hands: Option<u32>,
    /// Overrides the configured table size
    pub players: Option<usize>,
    /// Overrides the configured seed
    pub seed: Option<u64>,
    pub ai: Ai,
    pub output: Option<String>,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            vs: Vs::Ai,
            hands: None,
            players: None,
            seed: None,
            ai: Ai::Baseline,
            output: None,
        }
    }
}

enum Turn {
    Continue,
    Quit,
}

pub fn handle_play_command(
    config: &Config,
    opts: &PlayOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let hands = opts.hands.unwrap_or(1);
    if hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let players = opts.players.unwrap_or(config.players);

    let mut engine_config = config.engine_config();
    engine_config.seed = opts.seed.or(config.seed);
    let mut eng = Engine::with_stacks(engine_config, &vec![config.starting_stack; players])?;
    let seed = eng.seed();

    let log = EventLog::new();
    eng.add_listener(Box::new(log.clone()));
    let mut policies: Vec<Box<dyn Policy>> = (0..players)
        .map(|seat| create_policy(opts.ai, seed.wrapping_add(seat as u64 + 1)))
        .collect();
    let mut logger = match &opts.output {
        Some(path) => Some(HandLogger::create(path)?),
        None => None,
    };

    writeln!(
        out,
        "play: vs={} ai={} hands={} players={} seed={}",
        opts.vs.as_str(),
        policies.first().map(|p| p.name()).unwrap_or("none"),
        hands,
        players,
        seed
    )?;
    writeln!(
        out,
        "Blinds: SB={} BB={}",
        engine_config.small_blind, engine_config.big_blind
    )?;

    let mut played = 0u32;
    let mut quit = false;
    let mut eof = false;
    for i in 1..=hands {
        if eng.state().funded_count() < 2 {
            writeln!(out, "Only one player has chips left.")?;
            break;
        }
        writeln!(out, "Hand {}", i)?;
        log.clear();
        eng.start_new_round()?;
        log.clear();
        let state = eng.state();
        writeln!(
            out,
            "Button: seat {}  SB: seat {}  BB: seat {}",
            state.dealer().unwrap_or(0),
            state.small_blind_seat(),
            state.big_blind_seat()
        )?;
        if opts.vs == Vs::Human {
            if let Some(hole) = eng.players()[HUMAN_SEAT].hole_cards() {
                writeln!(out, "Your cards: {}", format_board(&hole))?;
            }
        }

        while let Some(seat) = eng.to_act() {
            let turn = if opts.vs == Vs::Human && seat == HUMAN_SEAT {
                human_turn(&mut eng, seat, out, err, stdin, &mut eof)?
            } else {
                computer_turn(&mut eng, seat, policies[seat].as_mut(), out)?;
                Turn::Continue
            };
            if let Turn::Quit = turn {
                quit = true;
                break;
            }
            print_streets(&log, out)?;
        }
        if quit {
            writeln!(out, "Hand abandoned with {} in the pot.", eng.pot())?;
            break;
        }

        if let Some(result) = eng.last_result() {
            for line in format_result(result) {
                writeln!(out, "{}", line)?;
            }
        }
        if let (Some(logger), Some(record)) = (logger.as_mut(), eng.last_record()) {
            logger.write(record)?;
        }
        played += 1;
    }

    let stacks: Vec<String> = eng
        .players()
        .iter()
        .enumerate()
        .map(|(seat, p)| format!("seat {}={}", seat, p.chips()))
        .collect();
    writeln!(out, "Stacks: {}", stacks.join(", "))?;
    if eng.pot() > 0 {
        writeln!(out, "Unsettled pot: {}", eng.pot())?;
    }
    writeln!(out, "Hands played: {}", played)?;
    info!(played, requested = hands, quit, "session finished");

    if eof {
        return Err(CliError::Interrupted("input closed".to_string()));
    }
    Ok(())
}

fn computer_turn(
    eng: &mut Engine,
    seat: usize,
    policy: &mut dyn Policy,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let fallback = if eng.to_call(seat) == 0 {
        PlayerAction::Check
    } else {
        PlayerAction::Fold
    };
    let action = match Decision::from_engine(eng, seat) {
        Some(decision) => policy.decide(&decision),
        None => fallback,
    };
    let taken = match eng.act(seat, action) {
        Ok(_) => action,
        Err(e) => {
            warn!(seat, policy = policy.name(), error = %e, "policy chose an illegal action");
            eng.act(seat, fallback)?;
            fallback
        }
    };
    writeln!(out, "Seat {}: {}", seat, format_action(&taken))?;
    Ok(())
}

fn human_turn(
    eng: &mut Engine,
    seat: usize,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
    eof: &mut bool,
) -> Result<Turn, CliError> {
    loop {
        let chips = eng.players()[seat].chips();
        writeln!(
            out,
            "Pot: {}  To call: {}  Min raise to: {}  Stack: {}",
            eng.pot(),
            eng.to_call(seat),
            eng.min_raise_to(),
            chips
        )?;
        write!(out, "Enter action (fold/check/call/raise N/allin/q): ")?;
        out.flush()?;

        let Some(line) = read_stdin_line(stdin) else {
            *eof = true;
            return Ok(Turn::Quit);
        };
        match parse_player_action(&line) {
            ParseResult::Action(action) => match eng.act(seat, action) {
                Ok(_) => {
                    writeln!(out, "Seat {}: {}", seat, format_action(&action))?;
                    return Ok(Turn::Continue);
                }
                Err(e) => ui::write_error(err, &format!("Invalid action: {}", e))?,
            },
            ParseResult::Quit => return Ok(Turn::Quit),
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn play(opts: &PlayOptions, input: &str) -> (Result<(), CliError>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(input.as_bytes().to_vec());
        let result = handle_play_command(&Config::default(), opts, &mut out, &mut err, &mut stdin);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn chips_in(output: &str) -> u32 {
        let line = output
            .lines()
            .find(|l| l.starts_with("Stacks: "))
            .expect("stacks line");
        line["Stacks: ".len()..]
            .split(", ")
            .map(|part| part.split('=').nth(1).unwrap().parse::<u32>().unwrap())
            .sum()
    }

    #[test]
    fn computer_session_conserves_chips() {
        let opts = PlayOptions {
            hands: Some(5),
            seed: Some(42),
            ..PlayOptions::default()
        };
        let (result, output, _) = play(&opts, "");
        assert!(result.is_ok());
        assert!(output.starts_with("play: vs=ai ai=baseline hands=5 players=4 seed=42\n"));
        assert!(output.contains("Hands played: 5") || output.contains("Only one player"));
        assert_eq!(chips_in(&output), 4_000);
    }

    #[test]
    fn every_policy_finishes_hands() {
        for ai in [Ai::Baseline, Ai::Equity, Ai::Station] {
            let opts = PlayOptions {
                hands: Some(2),
                players: Some(3),
                seed: Some(5),
                ai,
                ..PlayOptions::default()
            };
            let (result, output, _) = play(&opts, "");
            assert!(result.is_ok(), "{:?} failed", ai);
            assert_eq!(chips_in(&output), 3_000);
        }
    }

    #[test]
    fn zero_hands_is_rejected() {
        let opts = PlayOptions {
            hands: Some(0),
            ..PlayOptions::default()
        };
        let (result, _, err) = play(&opts, "");
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
        assert!(err.contains("hands must be >= 1"));
    }

    // the station calls from the small blind, so seat 0 always gets the option
    #[test]
    fn human_can_quit() {
        let opts = PlayOptions {
            vs: Vs::Human,
            players: Some(2),
            seed: Some(1),
            ai: Ai::Station,
            ..PlayOptions::default()
        };
        let (result, output, _) = play(&opts, "q\n");
        assert!(result.is_ok());
        assert!(output.contains("Your cards: "));
        // blinds stay in the middle of the abandoned hand
        assert!(output.contains("Hand abandoned with 20 in the pot."));
        assert!(output.contains("Unsettled pot: 20"));
        assert!(output.contains("Hands played: 0"));
        assert_eq!(chips_in(&output) + 20, 2_000);
    }

    #[test]
    fn human_bad_input_reprompts_then_eof_interrupts() {
        let opts = PlayOptions {
            vs: Vs::Human,
            players: Some(2),
            seed: Some(1),
            ai: Ai::Station,
            ..PlayOptions::default()
        };
        let (result, output, err) = play(&opts, "dance\nraise 1\n");
        assert!(matches!(result, Err(CliError::Interrupted(_))));
        assert!(err.contains("Unrecognized action 'dance'"));
        assert!(err.contains("Invalid action"));
        assert_eq!(output.matches("Enter action").count(), 3);
    }

    #[test]
    fn human_folding_loses_the_blind() {
        // heads-up the human sits on the button and posts the big blind
        let opts = PlayOptions {
            vs: Vs::Human,
            players: Some(2),
            seed: Some(3),
            ai: Ai::Station,
            ..PlayOptions::default()
        };
        let (result, output, _) = play(&opts, "fold\n");
        assert!(result.is_ok());
        assert!(output.contains("Hands played: 1"));
        assert_eq!(chips_in(&output), 2_000);
    }

    #[test]
    fn records_are_written_as_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("hands.jsonl");
        let opts = PlayOptions {
            hands: Some(3),
            players: Some(3),
            seed: Some(8),
            output: Some(path.to_string_lossy().to_string()),
            ..PlayOptions::default()
        };
        let (result, _, _) = play(&opts, "");
        assert!(result.is_ok());

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            let record: holdem_engine::logger::HandRecord = serde_json::from_str(line).unwrap();
            assert_eq!(record.seed, Some(8));
            assert!(record.ts.is_some());
            assert!(!record.payouts.is_empty());
        }
    }
}
