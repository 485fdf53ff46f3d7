/// Per-stage layout and difficulty, kept as data so all six stages read the same.
use tracing::warn;

use crate::constants::FINAL_STAGE;
use crate::error::{GameError, GameResult};
use crate::sprites::SpriteKey;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageProfile {
    pub stage: u8,
    /// Enemies per row.
    pub grid_width: usize,
    /// Rows of enemies.
    pub grid_height: usize,
    /// Sprite per row, cycled when there are more rows than keys.
    pub enemy_sprites: &'static [SpriteKey],
    pub boss_sprite: SpriteKey,
    /// Per-frame chance that one enemy (or the boss) fires.
    pub fire_chance: f64,
}

const STAGES: [StageProfile; FINAL_STAGE as usize] = [
    StageProfile {
        stage: 1,
        grid_width: 6,
        grid_height: 2,
        enemy_sprites: &[SpriteKey::Enemy1],
        boss_sprite: SpriteKey::Boss1,
        fire_chance: 0.0030,
    },
    StageProfile {
        stage: 2,
        grid_width: 7,
        grid_height: 2,
        enemy_sprites: &[SpriteKey::Enemy2, SpriteKey::Enemy1],
        boss_sprite: SpriteKey::Boss2,
        fire_chance: 0.0035,
    },
    StageProfile {
        stage: 3,
        grid_width: 7,
        grid_height: 3,
        enemy_sprites: &[SpriteKey::Enemy3, SpriteKey::Enemy2],
        boss_sprite: SpriteKey::Boss3,
        fire_chance: 0.0040,
    },
    StageProfile {
        stage: 4,
        grid_width: 8,
        grid_height: 3,
        enemy_sprites: &[SpriteKey::Enemy4, SpriteKey::Enemy3],
        boss_sprite: SpriteKey::Boss4,
        fire_chance: 0.0045,
    },
    StageProfile {
        stage: 5,
        grid_width: 8,
        grid_height: 4,
        enemy_sprites: &[SpriteKey::Enemy5, SpriteKey::Enemy4],
        boss_sprite: SpriteKey::Boss5,
        fire_chance: 0.0050,
    },
    StageProfile {
        stage: 6,
        grid_width: 9,
        grid_height: 4,
        enemy_sprites: &[SpriteKey::Enemy6, SpriteKey::Enemy5, SpriteKey::Enemy4],
        boss_sprite: SpriteKey::Boss6,
        fire_chance: 0.0055,
    },
];

/// Look up a stage, failing for anything outside `1..=6`.
pub fn profile(stage: u8) -> GameResult<&'static StageProfile> {
    match stage {
        1..=FINAL_STAGE => Ok(&STAGES[stage as usize - 1]),
        _ => Err(GameError::StageOutOfRange(stage)),
    }
}

/// Look up a stage, clamping out-of-range numbers to the nearest defined stage.
pub fn profile_clamped(stage: u8) -> &'static StageProfile {
    match profile(stage) {
        Ok(profile) => profile,
        Err(error) => {
            let clamped = stage.clamp(1, FINAL_STAGE);
            warn!(%error, clamped, "Clamping stage number");
            &STAGES[clamped as usize - 1]
        }
    }
}

impl StageProfile {
    pub fn enemy_count(&self) -> usize {
        self.grid_width * self.grid_height
    }

    pub fn sprite_for_row(&self, row: usize) -> SpriteKey {
        self.enemy_sprites[row % self.enemy_sprites.len()]
    }

    pub fn is_final(&self) -> bool {
        self.stage >= FINAL_STAGE
    }
}
