#![allow(dead_code)]

use std::rc::Rc;

use rand::rngs::mock::StepRng;
use stage_shooter::input::{FrameInput, Intents};
use stage_shooter::run_state::RunState;
use stage_shooter::score::{MemoryStore, ScoreLedger};
use stage_shooter::sprites::{SpriteSizes, SpriteTable};
use stage_shooter::stage::StageSim;

/// Every Bernoulli draw comes up false; ranges land mid-way.
pub fn quiet_rng() -> StepRng {
    StepRng::new(0x8000_0000_8000_0000, 0)
}

/// Every Bernoulli draw comes up true; ranges land on their low end.
pub fn eager_rng() -> StepRng {
    StepRng::new(0, 0)
}

pub fn sizes() -> Rc<dyn SpriteSizes> {
    Rc::new(SpriteTable)
}

pub fn ledger() -> ScoreLedger {
    ScoreLedger::new(Box::new(MemoryStore::default()))
}

/// A stage ready to play on the next update.
pub fn stage(stage: u8, run: &RunState) -> StageSim {
    StageSim::new(stage, run, sizes(), &mut quiet_rng()).without_intro()
}

pub fn idle(now_ms: u64) -> FrameInput {
    FrameInput::new(Intents::default(), now_ms)
}

pub fn firing(now_ms: u64) -> FrameInput {
    FrameInput::new(
        Intents {
            fire: true,
            ..Intents::default()
        },
        now_ms,
    )
}

pub fn holding(left: bool, right: bool, fire: bool) -> FrameInput {
    FrameInput::new(Intents { left, right, fire }, 0)
}
