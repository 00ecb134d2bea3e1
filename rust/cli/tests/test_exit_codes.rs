//! Exit codes and stream discipline of `holdem_cli::run`.

fn run(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = holdem_cli::run(args.iter().copied(), &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
fn help_goes_to_stdout_with_zero() {
    let (code, out, err) = run(&["holdem", "--help"]);
    assert_eq!(code, 0);
    assert!(out.contains("Usage"));
    assert!(err.is_empty());
}

#[test]
fn version_goes_to_stdout_with_zero() {
    let (code, out, _) = run(&["holdem", "--version"]);
    assert_eq!(code, 0);
    assert!(out.starts_with("holdem "));
}

#[test]
fn missing_command_is_an_error() {
    let (code, out, err) = run(&["holdem"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(!err.is_empty());
}

#[test]
fn bad_cards_exit_two_with_message_on_stderr() {
    let (code, out, err) = run(&["holdem", "eval", "--cards", "AS KS QS"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.starts_with("Error: Invalid input: need 5 to 7 cards, got 3"));
}

#[test]
fn unparseable_card_exits_two() {
    let (code, _, err) = run(&["holdem", "equity", "--hole", "AS 1X"]);
    assert_eq!(code, 2);
    assert!(err.contains("Error: Invalid input"));
}

#[test]
fn too_many_board_cards_exit_two() {
    let (code, _, err) = run(&[
        "holdem", "equity", "--hole", "AS AH", "--board", "2C 3C 4C 5C 6C 7C",
    ]);
    assert_eq!(code, 2);
    assert!(err.contains("at most 5 community cards"));
}

#[test]
fn zero_hands_exit_two() {
    let (code, _, err) = run(&["holdem", "play", "--hands", "0"]);
    assert_eq!(code, 2);
    assert!(err.contains("hands must be >= 1"));
}

#[test]
fn unknown_flag_lists_commands() {
    let (code, _, err) = run(&["holdem", "deal", "--level", "3"]);
    assert_eq!(code, 2);
    assert!(err.contains("Usage: holdem <command> [options]"));
    for command in ["deal", "eval", "equity", "play", "cfg"] {
        assert!(err.contains(&format!("  {}", command)));
    }
}
