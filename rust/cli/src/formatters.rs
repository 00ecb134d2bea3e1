//! Card, board, action and result formatters for terminal display.
//!
//! Suits render as Unicode symbols where the terminal is known to support
//! them and fall back to the engine's letters (`S H C D`) otherwise.
//!
//! ```rust
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_cli::formatters::{format_board, format_card};
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "AS");
//! assert!(format_board(&[ace_spades]).starts_with("[A"));
//! ```

use holdem_engine::cards::{Card, Suit};
use holdem_engine::engine::RoundResult;
use holdem_engine::equity::EquityReport;
use holdem_engine::game::Stage;
use holdem_engine::player::PlayerAction;

/// Whether card suits can be drawn with Unicode symbols.
///
/// On Windows this looks for Windows Terminal, a `TERM_PROGRAM` or VS Code;
/// other platforms are assumed to cope.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        suit.letter().to_string()
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.symbol(), format_suit(card.suit))
}

/// Cards in bracket notation, `[]` when empty.
pub fn format_board(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// ```rust
/// use holdem_engine::player::PlayerAction;
/// use holdem_cli::formatters::format_action;
///
/// assert_eq!(format_action(&PlayerAction::Fold), "fold");
/// assert_eq!(format_action(&PlayerAction::Raise(100)), "raise to 100");
/// assert_eq!(format_action(&PlayerAction::AllIn), "all-in");
/// ```
pub fn format_action(action: &PlayerAction) -> String {
    match action {
        PlayerAction::Fold => "fold".to_string(),
        PlayerAction::Check => "check".to_string(),
        PlayerAction::Call => "call".to_string(),
        PlayerAction::Raise(amount) => format!("raise to {}", amount),
        PlayerAction::AllIn => "all-in".to_string(),
    }
}

pub fn format_stage(stage: Stage) -> &'static str {
    match stage {
        Stage::Idle => "Idle",
        Stage::PreFlop => "Preflop",
        Stage::Flop => "Flop",
        Stage::Turn => "Turn",
        Stage::River => "River",
        Stage::Showdown => "Showdown",
    }
}

/// One line per showdown hand followed by one line per pot award.
pub fn format_result(result: &RoundResult) -> Vec<String> {
    let mut lines = Vec::new();
    for hand in &result.showdown {
        lines.push(format!(
            "Seat {} shows {}: {}",
            hand.seat,
            format_board(&hand.hole),
            hand.description
        ));
    }
    for (i, award) in result.awards.iter().enumerate() {
        let label = if i == 0 {
            "Main pot".to_string()
        } else {
            format!("Side pot {}", i)
        };
        let seats: Vec<String> = award.winners.iter().map(|s| s.to_string()).collect();
        let mut line = format!(
            "{} {} -> seat {}",
            label,
            award.amount,
            seats.join(", ")
        );
        if award.winners.len() > 1 {
            line.push_str(&format!(" ({} each", award.share));
            if award.remainder > 0 {
                line.push_str(&format!(", +{} to seat {}", award.remainder, award.winners[0]));
            }
            line.push(')');
        }
        if result.uncontested {
            line.push_str(" uncontested");
        }
        lines.push(line);
    }
    lines
}

pub fn format_equity(report: &EquityReport) -> String {
    format!(
        "Equity: {:.1}% (wins {}, ties {}, losses {} over {} simulations)",
        report.equity() * 100.0,
        report.wins,
        report.ties,
        report.losses,
        report.simulations()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::cards::Rank;
    use holdem_engine::equity::TiePolicy;
    use holdem_engine::pot::PotAward;

    #[test]
    fn suit_is_symbol_or_letter() {
        let hearts = format_suit(Suit::Hearts);
        assert!(hearts == "♥" || hearts == "H");
        let spades = format_suit(Suit::Spades);
        assert!(spades == "♠" || spades == "S");
    }

    #[test]
    fn empty_board_is_brackets() {
        assert_eq!(format_board(&[]), "[]");
    }

    #[test]
    fn board_lists_cards_in_order() {
        let board = [
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::Ten, Suit::Hearts),
        ];
        let formatted = format_board(&board);
        assert!(formatted.starts_with("[A"));
        assert!(formatted.contains(" T"));
        assert!(formatted.ends_with(']'));
    }

    #[test]
    fn actions_read_naturally() {
        assert_eq!(format_action(&PlayerAction::Check), "check");
        assert_eq!(format_action(&PlayerAction::Call), "call");
        assert_eq!(format_action(&PlayerAction::Raise(40)), "raise to 40");
    }

    #[test]
    fn split_pot_shows_share_and_odd_chip() {
        let result = RoundResult {
            hand_no: 1,
            pot: 25,
            awards: vec![PotAward::split(25, vec![1, 3])],
            showdown: Vec::new(),
            community: Vec::new(),
            uncontested: false,
        };
        let lines = format_result(&result);
        assert_eq!(lines, vec!["Main pot 25 -> seat 1, 3 (12 each, +1 to seat 1)"]);
    }

    #[test]
    fn equity_line_reports_percentage() {
        let report = EquityReport {
            wins: 3,
            ties: 0,
            losses: 1,
            policy: TiePolicy::Loss,
        };
        assert_eq!(
            format_equity(&report),
            "Equity: 75.0% (wins 3, ties 0, losses 1 over 4 simulations)"
        );
    }
}
