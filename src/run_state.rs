/// State that outlives a single screen: which stage we are on, the end-of-run
/// flags, the missile cooldown, and the player stats carried between stages.
use crate::constants::{MISSILE_INTERVAL_MS, MISSILE_UPGRADE_MS, PLAYER_LIVES, PLAYER_SPEED};
use crate::entities::Player;

/// Player stats handed from one stage to the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerCarry {
    pub lives: u32,
    pub speed: i32,
}

impl Default for PlayerCarry {
    fn default() -> Self {
        PlayerCarry {
            lives: PLAYER_LIVES,
            speed: PLAYER_SPEED,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunState {
    /// Current stage, 1..=6.
    pub stage: u8,
    pub game_over: bool,
    pub game_clear: bool,
    /// Minimum time between player missiles. May reach zero or below.
    pub missile_interval_ms: i64,
    pub last_fire_ms: Option<u64>,
    pub carry: PlayerCarry,
}

impl Default for RunState {
    fn default() -> Self {
        RunState {
            stage: 1,
            game_over: false,
            game_clear: false,
            missile_interval_ms: MISSILE_INTERVAL_MS,
            last_fire_ms: None,
            carry: PlayerCarry::default(),
        }
    }
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset everything for a brand-new game.
    pub fn start_new_run(&mut self) {
        *self = RunState::default();
    }

    /// Per-stage reset point: the cooldown clock restarts, upgrades stay.
    pub fn start_stage(&mut self) {
        self.last_fire_ms = None;
    }

    pub fn is_terminal(&self) -> bool {
        self.game_over || self.game_clear
    }

    pub fn clear_terminal(&mut self) {
        self.game_over = false;
        self.game_clear = false;
    }

    pub fn can_fire(&self, now_ms: u64) -> bool {
        match self.last_fire_ms {
            None => true,
            Some(last) => self.missile_interval_ms <= 0 || now_ms.saturating_sub(last) as i64 >= self.missile_interval_ms,
        }
    }

    pub fn record_fire(&mut self, now_ms: u64) {
        self.last_fire_ms = Some(now_ms);
    }

    pub fn upgrade_missile(&mut self) {
        self.missile_interval_ms -= MISSILE_UPGRADE_MS;
    }

    /// Remember the player's stats for the next stage.
    pub fn store_carry(&mut self, player: &Player) {
        self.carry = PlayerCarry {
            lives: player.lives,
            speed: player.speed,
        };
    }
}
