//! Command handlers for the holdem CLI.
//!
//! Each command lives in its own module and exposes
//! `handle_COMMAND_command(...) -> Result<(), CliError>`. Output streams are
//! passed in as `&mut dyn Write` so tests can capture them.

use std::io::Write;

use holdem_engine::events::{EventLog, GameEvent};
use holdem_engine::game::Stage;

use crate::formatters::{format_board, format_stage};

mod cfg;
mod deal;
mod equity;
mod eval;
mod play;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use equity::{EquityArgs, handle_equity_command};
pub use eval::handle_eval_command;
pub use play::{PlayOptions, handle_play_command};

/// Prints every street dealt since the last call and empties the log.
pub(crate) fn print_streets(log: &EventLog, out: &mut dyn Write) -> std::io::Result<()> {
    for event in log.events() {
        if let GameEvent::StageChanged { stage, community } = event {
            if matches!(stage, Stage::Flop | Stage::Turn | Stage::River) {
                writeln!(out, "{}: {}", format_stage(stage), format_board(&community))?;
            }
        }
    }
    log.clear();
    Ok(())
}
