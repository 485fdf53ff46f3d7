use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::KeyCode;
use stage_shooter::config::{Config, LOG_ENV, SCORES_ENV};
use stage_shooter::input::{Intents, KeyTracker, HOLD_WINDOW};

use pretty_assertions::assert_eq;

// ── Key tracking ──────────────────────────────────────────────────────────────

#[test]
fn press_stays_held_for_the_window() {
    let mut keys = KeyTracker::new();
    keys.press(KeyCode::Left, 1);
    assert!(keys.is_held(KeyCode::Left, 1));
    assert!(keys.is_held(KeyCode::Left, 1 + HOLD_WINDOW));
    assert!(!keys.is_held(KeyCode::Left, 2 + HOLD_WINDOW));
}

#[test]
fn repeats_extend_the_hold() {
    let mut keys = KeyTracker::new();
    keys.press(KeyCode::Right, 1);
    keys.press(KeyCode::Right, 4);
    assert!(keys.is_held(KeyCode::Right, 8));
}

#[test]
fn release_drops_key_immediately() {
    let mut keys = KeyTracker::new();
    keys.press(KeyCode::Char(' '), 10);
    keys.release(KeyCode::Char(' '));
    assert!(!keys.is_held(KeyCode::Char(' '), 10));
}

#[test]
fn letters_alias_arrows() {
    let mut keys = KeyTracker::new();
    keys.press(KeyCode::Char('a'), 3);
    keys.press(KeyCode::Char('D'), 3);
    assert_eq!(
        keys.intents(3),
        Intents {
            left: true,
            right: true,
            fire: false
        }
    );
    keys.release(KeyCode::Left);
    assert!(!keys.intents(3).left);
}

#[test]
fn space_is_fire() {
    let mut keys = KeyTracker::new();
    keys.press(KeyCode::Char(' '), 7);
    keys.press(KeyCode::Char('x'), 7);
    assert_eq!(
        keys.intents(7),
        Intents {
            fire: true,
            ..Intents::default()
        }
    );
}

#[test]
fn no_keys_no_intents() {
    let keys = KeyTracker::new();
    let intents = keys.intents(100);
    assert_eq!(intents, Intents::default());
    assert!(!intents.any_direction());
}

// ── Config ────────────────────────────────────────────────────────────────────

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn config_defaults_to_home() {
    let config = Config::from_lookup(lookup(&[("HOME", "/home/pilot")]));
    assert_eq!(config.score_path, PathBuf::from("/home/pilot/.stage_shooter_scores"));
    assert_eq!(config.log_path, PathBuf::from("/home/pilot/.stage_shooter.log"));
    assert_eq!(config.frame, Duration::from_millis(20));
}

#[test]
fn config_env_overrides() {
    let config = Config::from_lookup(lookup(&[
        ("HOME", "/home/pilot"),
        (SCORES_ENV, "/tmp/scores"),
        (LOG_ENV, "/tmp/game.log"),
    ]));
    assert_eq!(config.score_path, PathBuf::from("/tmp/scores"));
    assert_eq!(config.log_path, PathBuf::from("/tmp/game.log"));
}

#[test]
fn config_without_home_uses_working_dir() {
    let config = Config::from_lookup(lookup(&[]));
    assert_eq!(config.score_path, PathBuf::from("./.stage_shooter_scores"));
}
