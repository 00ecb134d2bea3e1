//! Configuration command handler.
//!
//! Prints every resolved setting with the layer it came from:
//!
//! ```json
//! {
//!   "small_blind": {
//!     "value": 5,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use std::io::Write;

use crate::config::{self, ConfigResolved};
use crate::error::CliError;
use crate::ui;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(e.into());
        }
    };
    write_resolved(&resolved, out)
}

pub(crate) fn write_resolved(resolved: &ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "small_blind": { "value": config.small_blind, "source": sources.small_blind },
        "big_blind": { "value": config.big_blind, "source": sources.big_blind },
        "starting_stack": { "value": config.starting_stack, "source": sources.starting_stack },
        "players": { "value": config.players, "source": sources.players },
        "seed": { "value": config.seed, "source": sources.seed },
        "pot_mode": { "value": config.pot_mode, "source": sources.pot_mode },
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&display)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_from;

    #[test]
    fn prints_value_and_source_for_every_key() {
        let lookup = |key: &str| match key {
            "HOLDEM_SEED" => Some("99".to_string()),
            "HOLDEM_POT_MODE" => Some("side".to_string()),
            _ => None,
        };
        let resolved = load_from(lookup).unwrap();
        let mut out = Vec::new();
        write_resolved(&resolved, &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["seed"]["value"], 99);
        assert_eq!(json["seed"]["source"], "env");
        assert_eq!(json["pot_mode"]["value"], "side_pots");
        assert_eq!(json["big_blind"]["value"], 10);
        assert_eq!(json["big_blind"]["source"], "default");
        for key in ["small_blind", "starting_stack", "players"] {
            assert!(json[key]["value"].is_number(), "{} missing", key);
        }
    }

    #[test]
    fn output_is_pretty_printed() {
        let resolved = load_from(|_| None).unwrap();
        let mut out = Vec::new();
        write_resolved(&resolved, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\n  \"players\""));
        assert!(text.contains("\"value\": null"));
    }
}
