//! Screen state machine.
//!
//! Each screen's `update` returns a [`Transition`]; the [`Game`] driver performs
//! the swap between frames and owns the state that outlives any one screen.
//!
//! ```text
//! Title ──fire(New Game)──► Stage(1) ──boss down──► Stage(2) … Stage(6)
//!   │  ▲                       │ game over / clear, then fire │
//!   │  └───────────────────────┴──────────────────────────────┘
//!   └─fire(Score Ranking)──► HighScore ──fire──► Title
//! ```

use std::rc::Rc;

use rand::Rng;
use tracing::info;

use crate::entities::Starfield;
use crate::input::{FrameInput, Intents};
use crate::run_state::RunState;
use crate::score::ScoreLedger;
use crate::sprites::SpriteSizes;
use crate::stage::StageSim;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenKind {
    Title,
    Stage(u8),
    HighScore,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Stay,
    GoTo(ScreenKind),
}

// ── Menu confirm gate ─────────────────────────────────────────────────────────

/// Fire only confirms after it has been seen released once on this screen,
/// and never on a frame where a direction is also held.
#[derive(Clone, Copy, Debug, Default)]
struct ConfirmGate {
    armed: bool,
}

impl ConfirmGate {
    fn confirmed(&mut self, intents: Intents) -> bool {
        if !intents.fire {
            self.armed = true;
            return false;
        }
        self.armed && !intents.any_direction()
    }
}

// ── Title ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TitleChoice {
    NewGame,
    ScoreRanking,
}

pub struct TitleScreen {
    pub choice: TitleChoice,
    pub starfield: Starfield,
    gate: ConfirmGate,
}

impl TitleScreen {
    pub fn new(rng: &mut impl Rng) -> Self {
        TitleScreen {
            choice: TitleChoice::NewGame,
            starfield: Starfield::new(rng),
            gate: ConfirmGate::default(),
        }
    }

    /// 0 for New Game, 1 for Score Ranking.
    pub fn cursor(&self) -> usize {
        match self.choice {
            TitleChoice::NewGame => 0,
            TitleChoice::ScoreRanking => 1,
        }
    }

    pub fn update(&mut self, intents: Intents, rng: &mut impl Rng) -> Transition {
        self.starfield.update(rng);

        if intents.left {
            self.choice = TitleChoice::NewGame;
        } else if intents.right {
            self.choice = TitleChoice::ScoreRanking;
        }

        if !self.gate.confirmed(intents) {
            return Transition::Stay;
        }
        match self.choice {
            TitleChoice::NewGame => Transition::GoTo(ScreenKind::Stage(1)),
            TitleChoice::ScoreRanking => Transition::GoTo(ScreenKind::HighScore),
        }
    }
}

// ── High scores ───────────────────────────────────────────────────────────────

pub struct HighScoreScreen {
    pub starfield: Starfield,
    gate: ConfirmGate,
}

impl HighScoreScreen {
    pub fn new(rng: &mut impl Rng) -> Self {
        HighScoreScreen {
            starfield: Starfield::new(rng),
            gate: ConfirmGate::default(),
        }
    }

    pub fn update(&mut self, intents: Intents, rng: &mut impl Rng) -> Transition {
        self.starfield.update(rng);
        if self.gate.confirmed(intents) {
            Transition::GoTo(ScreenKind::Title)
        } else {
            Transition::Stay
        }
    }
}

// ── Driver ────────────────────────────────────────────────────────────────────

pub enum Screen {
    Title(TitleScreen),
    Stage(Box<StageSim>),
    HighScore(HighScoreScreen),
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Title(_) => ScreenKind::Title,
            Screen::Stage(sim) => ScreenKind::Stage(sim.stage),
            Screen::HighScore(_) => ScreenKind::HighScore,
        }
    }
}

/// Owns the current screen plus the run state and ledger shared across screens.
pub struct Game<R: Rng> {
    screen: Screen,
    run: RunState,
    ledger: ScoreLedger,
    sizes: Rc<dyn SpriteSizes>,
    rng: R,
}

impl<R: Rng> Game<R> {
    /// Start on the title screen.
    pub fn new(ledger: ScoreLedger, sizes: Rc<dyn SpriteSizes>, mut rng: R) -> Self {
        let screen = Screen::Title(TitleScreen::new(&mut rng));
        Game {
            screen,
            run: RunState::new(),
            ledger,
            sizes,
            rng,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    /// Run one frame on the current screen, then swap screens if it asked to.
    pub fn update(&mut self, input: FrameInput) -> Transition {
        let transition = match &mut self.screen {
            Screen::Title(title) => title.update(input.intents, &mut self.rng),
            Screen::HighScore(scores) => scores.update(input.intents, &mut self.rng),
            Screen::Stage(sim) => sim.update(&mut self.run, &mut self.ledger, input, &mut self.rng),
        };
        if let Transition::GoTo(kind) = transition {
            self.enter(kind);
        }
        transition
    }

    /// Replace the current screen. Leaving the title for a stage starts a new run.
    pub fn enter(&mut self, kind: ScreenKind) {
        info!(from = ?self.screen.kind(), to = ?kind, "Screen change");
        self.screen = match kind {
            ScreenKind::Title => {
                self.run.clear_terminal();
                Screen::Title(TitleScreen::new(&mut self.rng))
            }
            ScreenKind::HighScore => Screen::HighScore(HighScoreScreen::new(&mut self.rng)),
            ScreenKind::Stage(stage) => {
                if matches!(self.screen, Screen::Title(_)) {
                    self.run.start_new_run();
                    self.ledger.start_new_run();
                }
                self.run.stage = stage;
                self.run.start_stage();
                let sim = StageSim::new(stage, &self.run, Rc::clone(&self.sizes), &mut self.rng);
                Screen::Stage(Box::new(sim))
            }
        };
    }
}
