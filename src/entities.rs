/// Every entity on the field: plain state plus its own movement and hit rules.
use rand::Rng;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};

use crate::collision::{Bounded, Rect};
use crate::constants::{
    BOSS_BANG_FRAMES, BOSS_BOTTOM_MARGIN, BOSS_HP, BOSS_SPEED_X, BOSS_SPEED_Y, BOSS_TOP,
    ENEMY_BANG_FRAMES, ENEMY_DROP_STEP, ENEMY_MISSILE_SPEED, ITEM_FALL_SPEED, MISSILE_SPEED,
    PLAYER_BANG_FRAMES, PLAYER_BOTTOM_MARGIN, SCREEN_HEIGHT, SCREEN_WIDTH, STAR_COUNT,
    STAR_MAX_INTERVAL, STAR_MAX_SPEED,
};
use crate::sprites::{SpriteKey, SpriteSizes};

// ── Shared capability ─────────────────────────────────────────────────────────

/// A sprite that can be shot down and then shows an explosion for a while.
///
/// Enemies and the boss share this instead of one extending the other.
pub trait Destructible: Bounded {
    fn is_alive(&self) -> bool;
    fn bang(&self) -> u32;
    fn bang_mut(&mut self) -> &mut u32;

    /// Apply one hit. Returns true when this hit destroyed the sprite.
    fn hit(&mut self) -> bool;

    /// Still showing the explosion.
    fn is_exploding(&self) -> bool {
        self.bang() > 0
    }

    fn can_be_hit(&self) -> bool {
        self.is_alive() && !self.is_exploding()
    }

    /// Destroyed and done exploding.
    fn is_finished(&self) -> bool {
        !self.is_alive() && self.bang() == 0
    }

    fn tick_bang(&mut self) {
        let bang = self.bang_mut();
        *bang = bang.saturating_sub(1);
    }

    /// Where enemy missiles leave from: the lower centre of the sprite.
    fn muzzle(&self) -> (i32, i32) {
        let r = self.bounds();
        (r.center_x(), r.bottom())
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub speed: i32,
    pub lives: u32,
    pub alive: bool,
    /// Frames left on the "hit" flash.
    pub bang: u32,
}

impl Player {
    /// Place a player bottom-centre with the given carried-over stats.
    pub fn new(sizes: &dyn SpriteSizes, lives: u32, speed: i32) -> Self {
        let w = sizes.width(SpriteKey::Player);
        let h = sizes.height(SpriteKey::Player);
        Player {
            x: (SCREEN_WIDTH - w) / 2,
            y: SCREEN_HEIGHT - h - PLAYER_BOTTOM_MARGIN,
            w,
            h,
            speed,
            lives,
            alive: lives > 0,
            bang: 0,
        }
    }

    /// Moves only if the whole step stays on screen.
    pub fn move_left(&mut self) {
        if self.x - self.speed >= 0 {
            self.x -= self.speed;
        }
    }

    pub fn move_right(&mut self) {
        if self.x + self.speed + self.w <= SCREEN_WIDTH {
            self.x += self.speed;
        }
    }

    /// Lose a life. The last life flips `alive`; hits after that change nothing.
    pub fn hit(&mut self) {
        if self.lives == 0 {
            return;
        }
        self.lives -= 1;
        self.bang = PLAYER_BANG_FRAMES;
        if self.lives == 0 {
            self.alive = false;
        }
    }

    pub fn tick_bang(&mut self) {
        self.bang = self.bang.saturating_sub(1);
    }

    pub fn center_x(&self) -> i32 {
        self.bounds().center_x()
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    /// Signed horizontal speed; flips at either edge.
    pub speed: i32,
    pub alive: bool,
    pub bang: u32,
    pub sprite: SpriteKey,
}

impl Enemy {
    pub fn new(sprite: SpriteKey, x: i32, y: i32, speed: i32, sizes: &dyn SpriteSizes) -> Self {
        Enemy {
            x,
            y,
            w: sizes.width(sprite),
            h: sizes.height(sprite),
            speed,
            alive: true,
            bang: 0,
            sprite,
        }
    }

    /// Slide sideways; at an edge drop one step and turn around instead.
    pub fn step(&mut self) {
        if self.is_exploding() {
            return;
        }
        let next = self.x + self.speed;
        if next < 0 || next + self.w > SCREEN_WIDTH {
            self.y += ENEMY_DROP_STEP;
            self.speed = -self.speed;
        } else {
            self.x = next;
        }
    }

    pub fn is_below_screen(&self) -> bool {
        self.y > SCREEN_HEIGHT
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

impl Destructible for Enemy {
    fn is_alive(&self) -> bool {
        self.alive
    }

    fn bang(&self) -> u32 {
        self.bang
    }

    fn bang_mut(&mut self) -> &mut u32 {
        &mut self.bang
    }

    fn hit(&mut self) -> bool {
        if !self.can_be_hit() {
            return false;
        }
        self.alive = false;
        self.bang = ENEMY_BANG_FRAMES;
        true
    }
}

// ── Boss ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Boss {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub vx: i32,
    pub vy: i32,
    pub hp: u32,
    pub alive: bool,
    pub bang: u32,
    pub sprite: SpriteKey,
}

impl Boss {
    /// A fresh boss, horizontally centred at the top of the field.
    pub fn new(sprite: SpriteKey, sizes: &dyn SpriteSizes) -> Self {
        let w = sizes.width(sprite);
        let h = sizes.height(sprite);
        Boss {
            x: (SCREEN_WIDTH - w) / 2,
            y: BOSS_TOP,
            w,
            h,
            vx: BOSS_SPEED_X,
            vy: BOSS_SPEED_Y,
            hp: BOSS_HP,
            alive: true,
            bang: 0,
            sprite,
        }
    }

    /// Lowest `y` the boss may reach.
    pub fn y_limit(&self) -> i32 {
        SCREEN_HEIGHT - self.h - BOSS_BOTTOM_MARGIN
    }

    /// Figure-eight bounce: each axis reverses independently at its own bound.
    pub fn step(&mut self) {
        let nx = self.x + self.vx;
        if nx < 0 || nx + self.w > SCREEN_WIDTH {
            self.vx = -self.vx;
        } else {
            self.x = nx;
        }

        let ny = self.y + self.vy;
        if ny < 0 || ny > self.y_limit() {
            self.vy = -self.vy;
        } else {
            self.y = ny;
        }
    }
}

impl Bounded for Boss {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

impl Destructible for Boss {
    fn is_alive(&self) -> bool {
        self.alive
    }

    fn bang(&self) -> u32 {
        self.bang
    }

    fn bang_mut(&mut self) -> &mut u32 {
        &mut self.bang
    }

    fn hit(&mut self) -> bool {
        if !self.can_be_hit() {
            return false;
        }
        self.hp = self.hp.saturating_sub(1);
        if self.hp == 0 {
            self.alive = false;
            self.bang = BOSS_BANG_FRAMES;
            return true;
        }
        false
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Player missile, travelling up.
#[derive(Clone, Debug)]
pub struct Missile {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub speed: i32,
    pub visible: bool,
}

impl Missile {
    /// Spawn just above `top`, centred on `center_x`.
    pub fn new(center_x: i32, top: i32, sizes: &dyn SpriteSizes) -> Self {
        let w = sizes.width(SpriteKey::Missile);
        let h = sizes.height(SpriteKey::Missile);
        Missile {
            x: center_x - w / 2,
            y: top - h,
            w,
            h,
            speed: MISSILE_SPEED,
            visible: true,
        }
    }

    pub fn step(&mut self) {
        self.y -= self.speed;
    }

    pub fn is_off_screen(&self) -> bool {
        self.y < 0
    }
}

impl Bounded for Missile {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// Enemy or boss missile, travelling down.
#[derive(Clone, Debug)]
pub struct EnemyMissile {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub speed: i32,
    pub visible: bool,
}

impl EnemyMissile {
    /// Spawn with its top edge at `(center_x, top)`.
    pub fn new((center_x, top): (i32, i32), sizes: &dyn SpriteSizes) -> Self {
        let w = sizes.width(SpriteKey::EnemyMissile);
        EnemyMissile {
            x: center_x - w / 2,
            y: top,
            w,
            h: sizes.height(SpriteKey::EnemyMissile),
            speed: ENEMY_MISSILE_SPEED,
            visible: true,
        }
    }

    pub fn step(&mut self) {
        self.y += self.speed;
    }

    pub fn is_off_screen(&self) -> bool {
        self.y > SCREEN_HEIGHT
    }
}

impl Bounded for EnemyMissile {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

// ── Items ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, EnumCountMacro)]
pub enum ItemKind {
    ScoreUp,
    LifeUp,
    SpeedUp,
    MissileUpgrade,
}

impl ItemKind {
    pub fn sprite(self) -> SpriteKey {
        match self {
            ItemKind::ScoreUp => SpriteKey::ItemScoreUp,
            ItemKind::LifeUp => SpriteKey::ItemLifeUp,
            ItemKind::SpeedUp => SpriteKey::ItemSpeedUp,
            ItemKind::MissileUpgrade => SpriteKey::ItemMissileUpgrade,
        }
    }

    /// Uniformly random kind.
    pub fn random(rng: &mut impl Rng) -> Self {
        ItemKind::iter()
            .nth(rng.gen_range(0..ItemKind::COUNT))
            .unwrap_or(ItemKind::ScoreUp)
    }
}

#[derive(Clone, Debug)]
pub struct Item {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub kind: ItemKind,
    pub speed: i32,
    pub alive: bool,
}

impl Item {
    /// A new item just above the top edge.
    pub fn new(kind: ItemKind, x: i32, sizes: &dyn SpriteSizes) -> Self {
        let h = sizes.height(kind.sprite());
        Item {
            x,
            y: -h,
            w: sizes.width(kind.sprite()),
            h,
            kind,
            speed: ITEM_FALL_SPEED,
            alive: true,
        }
    }

    pub fn step(&mut self) {
        self.y += self.speed;
    }

    pub fn is_below_screen(&self) -> bool {
        self.y > SCREEN_HEIGHT
    }
}

impl Bounded for Item {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

// ── Background ────────────────────────────────────────────────────────────────

/// Star brightness, derived from how fast it falls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StarColor {
    Dim,
    Mid,
    Bright,
}

impl StarColor {
    pub fn for_speed(speed: i32) -> Self {
        match speed {
            i32::MIN..=1 => StarColor::Dim,
            2 => StarColor::Mid,
            _ => StarColor::Bright,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Star {
    pub x: i32,
    pub y: i32,
    pub speed: i32,
    /// Moves once every `interval` frames.
    pub interval: u32,
    pub color: StarColor,
    age: u32,
}

impl Star {
    pub fn new(x: i32, y: i32, speed: i32, interval: u32) -> Self {
        Star {
            x,
            y,
            speed,
            interval: interval.max(1),
            color: StarColor::for_speed(speed),
            age: 0,
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Star::new(
            rng.gen_range(0..SCREEN_WIDTH),
            rng.gen_range(0..SCREEN_HEIGHT),
            rng.gen_range(1..=STAR_MAX_SPEED),
            rng.gen_range(1..=STAR_MAX_INTERVAL),
        )
    }

    /// Advance one frame; past the bottom, reappear at the top in a new column.
    pub fn update(&mut self, rng: &mut impl Rng) {
        self.age = self.age.wrapping_add(1);
        if self.age % self.interval == 0 {
            self.y += self.speed;
        }
        if self.y >= SCREEN_HEIGHT {
            self.y = 0;
            self.x = rng.gen_range(0..SCREEN_WIDTH);
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    pub fn new(rng: &mut impl Rng) -> Self {
        Starfield {
            stars: (0..STAR_COUNT).map(|_| Star::random(rng)).collect(),
        }
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        for star in &mut self.stars {
            star.update(rng);
        }
    }
}
