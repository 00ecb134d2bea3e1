//! Eval command: best five-card hand out of 5 to 7 cards.

use std::cmp::Ordering;
use std::io::Write;

use holdem_engine::cards::{format_cards, parse_cards};
use holdem_engine::hand::{BestHand, best_hand, compare_hands};

use crate::error::CliError;

fn evaluate(label: &str, text: &str, out: &mut dyn Write) -> Result<BestHand, CliError> {
    let cards = parse_cards(text)?;
    let best = best_hand(&cards)?;
    writeln!(out, "{}: {}", label, format_cards(&cards))?;
    writeln!(out, "  Hand: {}", best.strength.describe())?;
    writeln!(
        out,
        "  Category: {:?} ({})",
        best.strength.category,
        best.strength.rank()
    )?;
    writeln!(out, "  Best five: {}", format_cards(&best.cards))?;
    writeln!(out, "  Code: {}", best.strength.code())?;
    Ok(best)
}

pub fn handle_eval_command(
    cards: &str,
    compare: Option<&str>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let first = evaluate("Cards", cards, out)?;
    let Some(other) = compare else {
        return Ok(());
    };
    let second = evaluate("Versus", other, out)?;
    let verdict = match compare_hands(&first.strength, &second.strength) {
        Ordering::Greater => "first hand wins",
        Ordering::Less => "second hand wins",
        Ordering::Equal => "tie",
    };
    writeln!(out, "Result: {}", verdict)?;
    Ok(())
}
