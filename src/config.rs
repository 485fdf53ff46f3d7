/// Runtime settings, read from the environment.
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::FRAME;

pub const SCORES_ENV: &str = "STAGE_SHOOTER_SCORES";
pub const LOG_ENV: &str = "STAGE_SHOOTER_LOG";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub score_path: PathBuf,
    pub log_path: PathBuf,
    pub frame: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to files in `$HOME`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let home = PathBuf::from(lookup("HOME").unwrap_or_else(|| ".".to_string()));
        Config {
            score_path: lookup(SCORES_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| home.join(".stage_shooter_scores")),
            log_path: lookup(LOG_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| home.join(".stage_shooter.log")),
            frame: FRAME,
        }
    }
}
