//! Running score, time-decayed bonuses and the persisted top-3 table.
//!
//! The ledger lives for the whole process. The current run claims at most one
//! slot in the table and moves that slot up as its score grows, so a single run
//! never fills more than one row.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::constants::{BOSS_BASE_SCORE, ENEMY_BASE_SCORE, SCORE_DECAY_MS};
use crate::error::PersistenceError;

pub const HIGH_SCORE_SLOTS: usize = 3;

pub type HighScores = [u64; HIGH_SCORE_SLOTS];

// ── Bonus formulas ────────────────────────────────────────────────────────────

fn decayed(base: i64, elapsed_ms: u64) -> u64 {
    let decay = i64::try_from(elapsed_ms / SCORE_DECAY_MS).unwrap_or(i64::MAX);
    base.saturating_sub(decay).max(0) as u64
}

/// Points for shooting an enemy `elapsed_ms` after the stage started.
pub fn enemy_bonus(elapsed_ms: u64) -> u64 {
    decayed(ENEMY_BASE_SCORE, elapsed_ms)
}

/// Completion bonus for bringing the boss down.
pub fn boss_bonus(elapsed_ms: u64) -> u64 {
    decayed(BOSS_BASE_SCORE, elapsed_ms)
}

// ── Persistence ───────────────────────────────────────────────────────────────

/// Load/save of exactly three integers.
pub trait HighScoreStore {
    fn load(&self) -> Result<HighScores, PersistenceError>;
    fn save(&self, scores: &HighScores) -> Result<(), PersistenceError>;
}

/// Three-line text file, one score per line.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse the first three lines of a score file.
pub fn parse_scores(text: &str) -> Result<HighScores, PersistenceError> {
    let lines: Vec<&str> = text.lines().take(HIGH_SCORE_SLOTS).collect();
    if lines.len() < HIGH_SCORE_SLOTS {
        return Err(PersistenceError::MissingLines(lines.len()));
    }

    let mut scores = [0; HIGH_SCORE_SLOTS];
    for (i, line) in lines.iter().enumerate() {
        scores[i] = line.trim().parse().map_err(|_| PersistenceError::Corrupt {
            line: i + 1,
            content: line.to_string(),
        })?;
    }
    Ok(scores)
}

pub fn format_scores(scores: &HighScores) -> String {
    scores.iter().map(u64::to_string).collect::<Vec<_>>().join("\n")
}

impl HighScoreStore for FileStore {
    fn load(&self) -> Result<HighScores, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => parse_scores(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let empty = [0; HIGH_SCORE_SLOTS];
                fs::write(&self.path, format_scores(&empty))?;
                Ok(empty)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, scores: &HighScores) -> Result<(), PersistenceError> {
        fs::write(&self.path, format_scores(scores))?;
        Ok(())
    }
}

/// In-process store. Clones share the same record.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    record: Rc<RefCell<Option<HighScores>>>,
}

impl MemoryStore {
    pub fn with_scores(scores: HighScores) -> Self {
        MemoryStore {
            record: Rc::new(RefCell::new(Some(scores))),
        }
    }

    pub fn saved(&self) -> Option<HighScores> {
        *self.record.borrow()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<HighScores, PersistenceError> {
        Ok(self.record.borrow().unwrap_or([0; HIGH_SCORE_SLOTS]))
    }

    fn save(&self, scores: &HighScores) -> Result<(), PersistenceError> {
        *self.record.borrow_mut() = Some(*scores);
        Ok(())
    }
}

// ── Ledger ────────────────────────────────────────────────────────────────────

pub struct ScoreLedger {
    score: u64,
    high_scores: HighScores,
    /// Table row owned by the current run, once it has made the list.
    run_slot: Option<usize>,
    store: Box<dyn HighScoreStore>,
}

impl ScoreLedger {
    /// Load the table, falling back to zeros if the record is unreadable.
    pub fn new(store: Box<dyn HighScoreStore>) -> Self {
        let mut high_scores = store.load().unwrap_or_else(|error| {
            warn!(%error, "Could not load high scores, starting from zero");
            [0; HIGH_SCORE_SLOTS]
        });
        high_scores.sort_unstable_by(|a, b| b.cmp(a));

        ScoreLedger {
            score: 0,
            high_scores,
            run_slot: None,
            store,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn best(&self) -> u64 {
        self.high_scores[0].max(self.score)
    }

    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Zero the score and release the run's table slot.
    pub fn start_new_run(&mut self) {
        self.score = 0;
        self.run_slot = None;
    }

    /// Fold the current score into the table, saving when it changed.
    pub fn check_high_score(&mut self) -> bool {
        let changed = match self.run_slot {
            Some(slot) => self.raise_slot(slot),
            None => self.try_insert(),
        };
        if changed {
            debug!(score = self.score, table = ?self.high_scores, "High score table updated");
            self.persist();
        }
        changed
    }

    fn raise_slot(&mut self, slot: usize) -> bool {
        if self.high_scores[slot] == self.score {
            return false;
        }
        self.high_scores[slot] = self.score;
        let mut i = slot;
        while i > 0 && self.high_scores[i - 1] < self.high_scores[i] {
            self.high_scores.swap(i - 1, i);
            i -= 1;
        }
        self.run_slot = Some(i);
        true
    }

    fn try_insert(&mut self) -> bool {
        let score = self.score;
        let Some(pos) = self.high_scores.iter().position(|&s| score > s) else {
            return false;
        };
        for j in (pos + 1..HIGH_SCORE_SLOTS).rev() {
            self.high_scores[j] = self.high_scores[j - 1];
        }
        self.high_scores[pos] = score;
        self.run_slot = Some(pos);
        true
    }

    fn persist(&self) {
        if let Err(error) = self.store.save(&self.high_scores) {
            warn!(%error, "Could not save high scores");
        }
    }
}

impl std::fmt::Debug for ScoreLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreLedger")
            .field("score", &self.score)
            .field("high_scores", &self.high_scores)
            .field("run_slot", &self.run_slot)
            .finish()
    }
}
