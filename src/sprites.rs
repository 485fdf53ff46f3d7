/// Sprite identities and the size lookup the simulation needs for hit boxes.
///
/// Image decoding and scaling live outside the core; the simulation only ever
/// asks how wide and tall a sprite is.
use strum_macros::{Display, EnumIter, IntoStaticStr};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum SpriteKey {
    Player,
    Missile,
    EnemyMissile,
    Enemy1,
    Enemy2,
    Enemy3,
    Enemy4,
    Enemy5,
    Enemy6,
    Boss1,
    Boss2,
    Boss3,
    Boss4,
    Boss5,
    Boss6,
    ItemScoreUp,
    ItemLifeUp,
    ItemSpeedUp,
    ItemMissileUpgrade,
}

/// `width(key)` / `height(key)` lookups, in logical pixels.
pub trait SpriteSizes {
    fn width(&self, key: SpriteKey) -> i32;
    fn height(&self, key: SpriteKey) -> i32;
}

/// Built-in dimensions matching the bundled artwork at 1024×768.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpriteTable;

impl SpriteTable {
    fn size(key: SpriteKey) -> (i32, i32) {
        match key {
            SpriteKey::Player => (48, 48),
            SpriteKey::Missile => (6, 16),
            SpriteKey::EnemyMissile => (6, 12),
            SpriteKey::Enemy1
            | SpriteKey::Enemy2
            | SpriteKey::Enemy3
            | SpriteKey::Enemy4
            | SpriteKey::Enemy5
            | SpriteKey::Enemy6 => (40, 32),
            SpriteKey::Boss1 => (160, 120),
            SpriteKey::Boss2 => (176, 128),
            SpriteKey::Boss3 => (192, 136),
            SpriteKey::Boss4 => (208, 144),
            SpriteKey::Boss5 => (224, 160),
            SpriteKey::Boss6 => (240, 180),
            SpriteKey::ItemScoreUp
            | SpriteKey::ItemLifeUp
            | SpriteKey::ItemSpeedUp
            | SpriteKey::ItemMissileUpgrade => (32, 32),
        }
    }
}

impl SpriteSizes for SpriteTable {
    fn width(&self, key: SpriteKey) -> i32 {
        Self::size(key).0
    }

    fn height(&self, key: SpriteKey) -> i32 {
        Self::size(key).1
    }
}
