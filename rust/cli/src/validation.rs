//! Parsing of interactive player input.

use holdem_engine::player::PlayerAction;

/// Outcome of parsing one line typed at the action prompt.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Action(PlayerAction),
    /// `q` or `quit`
    Quit,
    /// Unusable input, with a message for the user
    Invalid(String),
}

/// Parses a prompt line into an action (case-insensitive).
///
/// Accepts `f`/`fold`, `x`/`check`, `c`/`call`, `r N`/`raise N` (raise the
/// table bet to a total of N), `a`/`allin`/`all-in` and `q`/`quit`.
///
/// ```rust
/// use holdem_cli::validation::{parse_player_action, ParseResult};
/// use holdem_engine::player::PlayerAction;
///
/// assert_eq!(parse_player_action("fold"), ParseResult::Action(PlayerAction::Fold));
/// assert_eq!(parse_player_action("raise 100"), ParseResult::Action(PlayerAction::Raise(100)));
/// assert_eq!(parse_player_action("q"), ParseResult::Quit);
/// ```
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&verb) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    match verb {
        "q" | "quit" => ParseResult::Quit,
        "fold" | "f" => ParseResult::Action(PlayerAction::Fold),
        "check" | "x" => ParseResult::Action(PlayerAction::Check),
        "call" | "c" => ParseResult::Action(PlayerAction::Call),
        "allin" | "all-in" | "a" => ParseResult::Action(PlayerAction::AllIn),
        "raise" | "r" | "bet" => {
            let Some(amount) = parts.get(1) else {
                return ParseResult::Invalid(
                    "Raise requires a total amount (e.g., 'raise 40')".to_string(),
                );
            };
            match amount.parse::<u32>() {
                Ok(0) => ParseResult::Invalid("Raise amount must be positive".to_string()),
                Ok(n) => ParseResult::Action(PlayerAction::Raise(n)),
                Err(_) => ParseResult::Invalid(format!("Invalid raise amount '{}'", amount)),
            }
        }
        other => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: fold, check, call, raise <total>, allin, q",
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_forms() {
        assert_eq!(parse_player_action("f"), ParseResult::Action(PlayerAction::Fold));
        assert_eq!(parse_player_action("x"), ParseResult::Action(PlayerAction::Check));
        assert_eq!(parse_player_action("c"), ParseResult::Action(PlayerAction::Call));
        assert_eq!(parse_player_action("a"), ParseResult::Action(PlayerAction::AllIn));
        assert_eq!(parse_player_action("r 30"), ParseResult::Action(PlayerAction::Raise(30)));
    }

    #[test]
    fn case_and_whitespace_are_ignored() {
        assert_eq!(
            parse_player_action("  CHECK \n"),
            ParseResult::Action(PlayerAction::Check)
        );
        assert_eq!(parse_player_action("QUIT"), ParseResult::Quit);
    }

    #[test]
    fn bet_is_an_opening_raise() {
        assert_eq!(
            parse_player_action("bet 25"),
            ParseResult::Action(PlayerAction::Raise(25))
        );
    }

    #[test]
    fn raise_needs_a_positive_number() {
        assert!(matches!(parse_player_action("raise"), ParseResult::Invalid(_)));
        assert!(matches!(parse_player_action("raise 0"), ParseResult::Invalid(_)));
        assert!(matches!(parse_player_action("raise lots"), ParseResult::Invalid(_)));
        assert!(matches!(parse_player_action("raise -5"), ParseResult::Invalid(_)));
    }

    #[test]
    fn unknown_and_empty_input() {
        match parse_player_action("limp") {
            ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert_eq!(
            parse_player_action("   "),
            ParseResult::Invalid("Empty input".to_string())
        );
    }
}
