/// Fixed tuning values shared by the simulation and the front end.
use std::time::Duration;

// ── Logical field ─────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: i32 = 1024;
pub const SCREEN_HEIGHT: i32 = 768;

/// One logical frame (≈50 Hz).
pub const FRAME: Duration = Duration::from_millis(20);

pub const FINAL_STAGE: u8 = 6;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_LIVES: u32 = 5;
pub const PLAYER_SPEED: i32 = 5;
/// Gap between the player sprite and the bottom edge.
pub const PLAYER_BOTTOM_MARGIN: i32 = 40;
pub const PLAYER_BANG_FRAMES: u32 = 30;

/// Starting missile cooldown; each MissileUpgrade shortens it by `MISSILE_UPGRADE_MS`.
pub const MISSILE_INTERVAL_MS: i64 = 1000;
pub const MISSILE_UPGRADE_MS: i64 = 100;

// ── Projectiles & items ───────────────────────────────────────────────────────

pub const MISSILE_SPEED: i32 = 10;
pub const ENEMY_MISSILE_SPEED: i32 = 5;
pub const ITEM_FALL_SPEED: i32 = 3;
/// Per-frame chance of a new item appearing.
pub const ITEM_SPAWN_CHANCE: f64 = 0.004;

// ── Enemies & boss ────────────────────────────────────────────────────────────

pub const ENEMY_SPEED: i32 = 2;
pub const ENEMY_DROP_STEP: i32 = 20;
pub const ENEMY_BANG_FRAMES: u32 = 20;
pub const ENEMY_GRID_LEFT: i32 = 80;
pub const ENEMY_GRID_TOP: i32 = 60;
pub const ENEMY_GRID_GAP_X: i32 = 40;
pub const ENEMY_GRID_GAP_Y: i32 = 30;

pub const BOSS_HP: u32 = 10;
pub const BOSS_SPEED_X: i32 = 4;
pub const BOSS_SPEED_Y: i32 = 2;
pub const BOSS_TOP: i32 = 40;
/// Keeps the boss's figure-eight out of the player's band.
pub const BOSS_BOTTOM_MARGIN: i32 = 150;
pub const BOSS_BANG_FRAMES: u32 = 60;

// ── Scoring ───────────────────────────────────────────────────────────────────

pub const ENEMY_BASE_SCORE: i64 = 1000;
pub const BOSS_BASE_SCORE: i64 = 6000;
/// Elapsed milliseconds per point of bonus decay.
pub const SCORE_DECAY_MS: u64 = 100;
pub const SCORE_UP_POINTS: u64 = 1000;

// ── Screen timers ─────────────────────────────────────────────────────────────

/// Frames the "STAGE N" banner holds the simulation.
pub const STAGE_INTRO_FRAMES: u32 = 100;
/// Frames GAME OVER / GAME CLEAR stays up before fire is accepted.
pub const TERMINAL_HOLD_FRAMES: u32 = 100;

// ── Background ────────────────────────────────────────────────────────────────

pub const STAR_COUNT: usize = 60;
pub const STAR_MAX_SPEED: i32 = 3;
pub const STAR_MAX_INTERVAL: u32 = 4;
