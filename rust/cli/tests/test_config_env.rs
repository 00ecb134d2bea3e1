//! Configuration resolution through the real process environment.
//!
//! Every test here mutates environment variables, so all of them run
//! serially and clean up after themselves.

use std::io::Write;

use serde_json::Value;
use serial_test::serial;

const VARS: &[&str] = &[
    "HOLDEM_CONFIG",
    "HOLDEM_SMALL_BLIND",
    "HOLDEM_BIG_BLIND",
    "HOLDEM_STARTING_STACK",
    "HOLDEM_PLAYERS",
    "HOLDEM_SEED",
    "HOLDEM_POT_MODE",
];

struct EnvGuard;

impl EnvGuard {
    fn clean() -> Self {
        for var in VARS {
            unsafe { std::env::remove_var(var) };
        }
        EnvGuard
    }

    fn set(&self, key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for var in VARS {
            unsafe { std::env::remove_var(var) };
        }
    }
}

fn run(args: &[&str]) -> (i32, String, String) {
    let mut argv = vec!["holdem"];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = holdem_cli::run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
#[serial]
fn cfg_shows_defaults() {
    let _env = EnvGuard::clean();
    let (code, out, _) = run(&["cfg"]);
    assert_eq!(code, 0);
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["small_blind"]["value"], 5);
    assert_eq!(json["big_blind"]["value"], 10);
    assert_eq!(json["starting_stack"]["value"], 1000);
    assert_eq!(json["pot_mode"]["value"], "single_pool");
    assert!(json["seed"]["value"].is_null());
    assert_eq!(json["seed"]["source"], "default");
}

#[test]
#[serial]
fn env_beats_file() {
    let env = EnvGuard::clean();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "small_blind = 25\nbig_blind = 50\nseed = 1").unwrap();
    env.set("HOLDEM_CONFIG", &file.path().to_string_lossy());
    env.set("HOLDEM_SEED", "2");

    let (code, out, _) = run(&["cfg"]);
    assert_eq!(code, 0);
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["big_blind"]["value"], 50);
    assert_eq!(json["big_blind"]["source"], "file");
    assert_eq!(json["seed"]["value"], 2);
    assert_eq!(json["seed"]["source"], "env");
}

#[test]
#[serial]
fn flags_beat_env() {
    let env = EnvGuard::clean();
    env.set("HOLDEM_SEED", "5");
    env.set("HOLDEM_PLAYERS", "6");

    let (code, out, _) = run(&["deal", "--seed", "9", "--players", "3"]);
    assert_eq!(code, 0);
    assert!(out.starts_with("deal: seed=9 players=3\n"));

    let (_, out, _) = run(&["deal"]);
    assert!(out.starts_with("deal: seed=5 players=6\n"));
}

#[test]
#[serial]
fn configured_blinds_reach_the_table() {
    let env = EnvGuard::clean();
    env.set("HOLDEM_SMALL_BLIND", "50");
    env.set("HOLDEM_BIG_BLIND", "100");
    env.set("HOLDEM_PLAYERS", "2");

    let (code, out, _) = run(&["deal", "--seed", "3"]);
    assert_eq!(code, 0);
    assert!(out.contains("Main pot 200 -> seat"));
}

#[test]
#[serial]
fn invalid_config_fails_every_table_command() {
    let env = EnvGuard::clean();
    env.set("HOLDEM_BIG_BLIND", "3");

    let (code, _, err) = run(&["cfg"]);
    assert_eq!(code, 2);
    assert!(err.contains("Invalid configuration"));

    let (code, _, err) = run(&["deal"]);
    assert_eq!(code, 2);
    assert!(err.contains("Configuration error"));

    // eval never reads the configuration
    let (code, _, _) = run(&["eval", "--cards", "AS KS QS JS TS"]);
    assert_eq!(code, 0);
}

#[test]
#[serial]
fn malformed_file_is_reported() {
    let env = EnvGuard::clean();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "small_blind = \"lots\"").unwrap();
    env.set("HOLDEM_CONFIG", &file.path().to_string_lossy());

    let (code, _, err) = run(&["cfg"]);
    assert_eq!(code, 2);
    assert!(err.contains("cannot parse config file"));
}
