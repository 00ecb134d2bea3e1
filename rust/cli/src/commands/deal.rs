//! Deal command: one hand, checked down to showdown.
//!
//! Every seat checks or calls, so the hand always reaches the river and the
//! output shows each player's hole cards, the board street by street and
//! how the pot was paid.

use std::io::Write;

use holdem_engine::engine::Engine;
use holdem_engine::events::EventLog;

use crate::commands::print_streets;
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_board, format_result};

pub fn handle_deal_command(
    config: &Config,
    seed: Option<u64>,
    players: Option<u8>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let players = players.map(usize::from).unwrap_or(config.players);
    let mut engine_config = config.engine_config();
    engine_config.seed = seed.or(config.seed);

    let mut eng = Engine::with_stacks(engine_config, &vec![config.starting_stack; players])?;
    let log = EventLog::new();
    eng.add_listener(Box::new(log.clone()));

    writeln!(out, "deal: seed={} players={}", eng.seed(), players)?;
    eng.start_new_round()?;

    let state = eng.state();
    writeln!(
        out,
        "Button: seat {}  SB: seat {}  BB: seat {}",
        state.dealer().unwrap_or(0),
        state.small_blind_seat(),
        state.big_blind_seat()
    )?;
    for (seat, p) in eng.players().iter().enumerate() {
        if let Some(hole) = p.hole_cards() {
            writeln!(out, "Hole seat {}: {}", seat, format_board(&hole))?;
        }
    }

    log.clear();
    while let Some(seat) = eng.to_act() {
        if eng.to_call(seat) > 0 {
            eng.call(seat)?;
        } else {
            eng.check(seat)?;
        }
        print_streets(&log, out)?;
    }

    let result = eng
        .last_result()
        .ok_or_else(|| CliError::InvalidInput("hand did not finish".into()))?;
    writeln!(out, "Board: {}", format_board(&result.community))?;
    for line in format_result(result) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
