//! One stage of play: the enemy wave, the boss, every projectile and item.
//!
//! `StageSim::update` advances exactly one logical frame. The passes run in a
//! fixed order, and anything spawned during a frame is held back and only joins
//! the field once the frame is over, so it is not moved or collided until the
//! next one.

use std::rc::Rc;

use rand::Rng;
use tracing::{debug, info};

use crate::collision::Bounded;
use crate::constants::{
    ENEMY_GRID_GAP_X, ENEMY_GRID_GAP_Y, ENEMY_GRID_LEFT, ENEMY_GRID_TOP, ENEMY_SPEED,
    FINAL_STAGE, ITEM_SPAWN_CHANCE, SCORE_UP_POINTS, SCREEN_WIDTH, STAGE_INTRO_FRAMES,
    TERMINAL_HOLD_FRAMES,
};
use crate::entities::{
    Boss, Destructible, Enemy, EnemyMissile, Item, ItemKind, Missile, Player, Starfield,
};
use crate::input::FrameInput;
use crate::run_state::RunState;
use crate::score::{boss_bonus, enemy_bonus, ScoreLedger};
use crate::screen::{ScreenKind, Transition};
use crate::sprites::SpriteSizes;
use crate::stages::{profile_clamped, StageProfile};

/// Entities created during the current frame.
#[derive(Default)]
struct Spawned {
    missiles: Vec<Missile>,
    enemy_missiles: Vec<EnemyMissile>,
    items: Vec<Item>,
}

pub struct StageSim {
    pub stage: u8,
    pub profile: &'static StageProfile,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    pub missiles: Vec<Missile>,
    pub enemy_missiles: Vec<EnemyMissile>,
    pub items: Vec<Item>,
    pub starfield: Starfield,
    /// Frames left on the "STAGE N" banner.
    pub intro_frames: u32,
    /// Frames left before GAME OVER / GAME CLEAR accepts fire.
    pub terminal_hold: u32,
    /// Clock reading on the first frame of actual play.
    pub started_at_ms: Option<u64>,
    sizes: Rc<dyn SpriteSizes>,
}

impl StageSim {
    /// Build a stage with its enemy wave, using the player stats carried in `run`.
    pub fn new(stage: u8, run: &RunState, sizes: Rc<dyn SpriteSizes>, rng: &mut impl Rng) -> Self {
        let profile = profile_clamped(stage);
        let player = Player::new(&*sizes, run.carry.lives, run.carry.speed);
        let enemies = spawn_wave(profile, &*sizes);
        info!(stage = profile.stage, enemies = enemies.len(), "Stage start");

        StageSim {
            stage: profile.stage,
            profile,
            player,
            enemies,
            boss: None,
            missiles: Vec::new(),
            enemy_missiles: Vec::new(),
            items: Vec::new(),
            starfield: Starfield::new(rng),
            intro_frames: STAGE_INTRO_FRAMES,
            terminal_hold: TERMINAL_HOLD_FRAMES,
            started_at_ms: None,
            sizes,
        }
    }

    /// Skip the banner and start playing on the next update.
    pub fn without_intro(mut self) -> Self {
        self.intro_frames = 0;
        self
    }

    pub fn sizes(&self) -> &dyn SpriteSizes {
        &*self.sizes
    }

    pub fn in_intro(&self) -> bool {
        self.intro_frames > 0
    }

    /// Advance one frame.
    pub fn update(
        &mut self,
        run: &mut RunState,
        ledger: &mut ScoreLedger,
        input: FrameInput,
        rng: &mut impl Rng,
    ) -> Transition {
        if self.intro_frames > 0 {
            self.intro_frames -= 1;
            return Transition::Stay;
        }

        if run.is_terminal() {
            if self.terminal_hold > 0 {
                self.terminal_hold -= 1;
            } else if input.intents.fire {
                return Transition::GoTo(ScreenKind::Title);
            }
            return Transition::Stay;
        }

        let now = input.now_ms;
        let started = *self.started_at_ms.get_or_insert(now);
        let elapsed = now.saturating_sub(started);
        let mut spawned = Spawned::default();

        self.control_player(run, input, &mut spawned);
        self.roll_item(rng, &mut spawned);
        for item in &mut self.items {
            item.step();
        }
        self.advance_missiles();
        for enemy in &mut self.enemies {
            enemy.step();
        }
        self.enemy_fire(rng, &mut spawned);
        self.boss_fire(rng, &mut spawned);
        self.advance_enemy_missiles();
        if let Some(boss) = self.boss.as_mut().filter(|b| b.can_be_hit()) {
            boss.step();
        }
        self.resolve_missile_hits(ledger, elapsed);
        self.resolve_body_contact();
        self.cleanup();
        self.spawn_boss_when_clear();

        let mut transition = Transition::Stay;
        if !self.player.alive {
            if !run.game_over {
                info!(stage = self.stage, score = ledger.score(), "Game over");
            }
            run.game_over = true;
            run.stage = 1;
        }
        if !run.is_terminal() && self.boss.as_ref().is_some_and(|b| b.is_finished()) {
            if self.stage < FINAL_STAGE {
                run.stage = self.stage + 1;
                info!(cleared = self.stage, next = run.stage, "Stage clear");
                transition = Transition::GoTo(ScreenKind::Stage(run.stage));
            } else {
                info!(score = ledger.score(), "Game clear");
                run.game_clear = true;
            }
        }

        self.collect_items(run, ledger);
        self.starfield.update(rng);
        ledger.check_high_score();

        self.missiles.append(&mut spawned.missiles);
        self.enemy_missiles.append(&mut spawned.enemy_missiles);
        self.items.append(&mut spawned.items);

        if matches!(transition, Transition::GoTo(ScreenKind::Stage(_))) {
            run.store_carry(&self.player);
        }
        transition
    }

    // ── Passes ───────────────────────────────────────────────────────────────

    fn control_player(&mut self, run: &mut RunState, input: FrameInput, spawned: &mut Spawned) {
        if !self.player.alive {
            return;
        }
        if input.intents.left {
            self.player.move_left();
        }
        if input.intents.right {
            self.player.move_right();
        }
        if input.intents.fire && run.can_fire(input.now_ms) {
            spawned
                .missiles
                .push(Missile::new(self.player.center_x(), self.player.y, &*self.sizes));
            run.record_fire(input.now_ms);
        }
    }

    fn roll_item(&mut self, rng: &mut impl Rng, spawned: &mut Spawned) {
        if !rng.gen_bool(ITEM_SPAWN_CHANCE) {
            return;
        }
        let kind = ItemKind::random(rng);
        let max_x = SCREEN_WIDTH - self.sizes.width(kind.sprite());
        let x = rng.gen_range(0..=max_x);
        spawned.items.push(Item::new(kind, x, &*self.sizes));
    }

    /// Drop missiles that already left the top, then move the rest.
    fn advance_missiles(&mut self) {
        self.missiles.retain(|m| m.visible && !m.is_off_screen());
        for missile in &mut self.missiles {
            missile.step();
        }
    }

    fn enemy_fire(&mut self, rng: &mut impl Rng, spawned: &mut Spawned) {
        let chance = self.profile.fire_chance;
        for enemy in self.enemies.iter().filter(|e| e.can_be_hit()) {
            if rng.gen_bool(chance) {
                spawned
                    .enemy_missiles
                    .push(EnemyMissile::new(enemy.muzzle(), &*self.sizes));
            }
        }
    }

    fn boss_fire(&mut self, rng: &mut impl Rng, spawned: &mut Spawned) {
        let Some(boss) = self.boss.as_ref().filter(|b| b.can_be_hit()) else {
            return;
        };
        if rng.gen_bool(self.profile.fire_chance) {
            spawned
                .enemy_missiles
                .push(EnemyMissile::new(boss.muzzle(), &*self.sizes));
        }
    }

    fn advance_enemy_missiles(&mut self) {
        self.enemy_missiles.retain(|m| m.visible && !m.is_off_screen());
        for missile in &mut self.enemy_missiles {
            missile.step();
            if self.player.alive && missile.collides_with(&self.player) {
                missile.visible = false;
                self.player.hit();
            }
        }
    }

    /// Player missiles against the wave first, then the boss. One target each.
    fn resolve_missile_hits(&mut self, ledger: &mut ScoreLedger, elapsed_ms: u64) {
        for missile in self.missiles.iter_mut().filter(|m| m.visible) {
            for enemy in &mut self.enemies {
                if enemy.can_be_hit() && missile.collides_with(&*enemy) {
                    missile.visible = false;
                    enemy.hit();
                    ledger.add_score(enemy_bonus(elapsed_ms));
                    break;
                }
            }
            if !missile.visible {
                continue;
            }

            if let Some(boss) = self.boss.as_mut() {
                if boss.can_be_hit() && missile.collides_with(&*boss) {
                    missile.visible = false;
                    if boss.hit() {
                        info!(stage = self.stage, elapsed_ms, "Boss destroyed");
                        ledger.add_score(boss_bonus(elapsed_ms));
                    }
                }
            }
        }
    }

    fn resolve_body_contact(&mut self) {
        if !self.player.alive {
            return;
        }
        for enemy in &self.enemies {
            if enemy.can_be_hit() && self.player.collides_with(enemy) {
                self.player.hit();
            }
        }
        if let Some(boss) = &self.boss {
            if boss.can_be_hit() && self.player.collides_with(boss) {
                self.player.hit();
            }
        }
    }

    fn cleanup(&mut self) {
        for enemy in &mut self.enemies {
            enemy.tick_bang();
        }
        self.enemies
            .retain(|e| !e.is_below_screen() && !e.is_finished());
        self.items.retain(|i| i.alive && !i.is_below_screen());
        if let Some(boss) = self.boss.as_mut() {
            boss.tick_bang();
        }
        self.player.tick_bang();
    }

    fn spawn_boss_when_clear(&mut self) {
        if self.enemies.is_empty() && self.boss.is_none() {
            let boss = Boss::new(self.profile.boss_sprite, &*self.sizes);
            info!(stage = self.stage, sprite = %boss.sprite, "Boss appears");
            self.boss = Some(boss);
        }
    }

    fn collect_items(&mut self, run: &mut RunState, ledger: &mut ScoreLedger) {
        if !self.player.alive {
            return;
        }
        for item in &mut self.items {
            if !item.alive || !item.collides_with(&self.player) {
                continue;
            }
            debug!(kind = %item.kind, "Item collected");
            match item.kind {
                ItemKind::ScoreUp => ledger.add_score(SCORE_UP_POINTS),
                ItemKind::LifeUp => self.player.lives += 1,
                ItemKind::SpeedUp => self.player.speed += 1,
                ItemKind::MissileUpgrade => run.upgrade_missile(),
            }
            item.alive = false;
        }
        self.items.retain(|i| i.alive);
    }
}

/// Lay out the stage's enemy grid. Alternate rows start moving in opposite directions.
pub fn spawn_wave(profile: &StageProfile, sizes: &dyn SpriteSizes) -> Vec<Enemy> {
    let mut enemies = Vec::with_capacity(profile.enemy_count());
    for row in 0..profile.grid_height {
        let sprite = profile.sprite_for_row(row);
        let (w, h) = (sizes.width(sprite), sizes.height(sprite));
        let speed = if row % 2 == 0 { ENEMY_SPEED } else { -ENEMY_SPEED };
        for col in 0..profile.grid_width {
            let x = ENEMY_GRID_LEFT + col as i32 * (w + ENEMY_GRID_GAP_X);
            let y = ENEMY_GRID_TOP + row as i32 * (h + ENEMY_GRID_GAP_Y);
            enemies.push(Enemy::new(sprite, x, y, speed, sizes));
        }
    }
    enemies
}
