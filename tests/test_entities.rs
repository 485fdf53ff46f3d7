use stage_shooter::collision::Bounded;
use stage_shooter::constants::*;
use stage_shooter::entities::*;
use stage_shooter::sprites::{SpriteKey, SpriteSizes, SpriteTable};

use pretty_assertions::assert_eq;
use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

const SIZES: SpriteTable = SpriteTable;

fn player() -> Player {
    Player::new(&SIZES, PLAYER_LIVES, PLAYER_SPEED)
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_starts_bottom_centre() {
    let p = player();
    assert_eq!(p.w, 48);
    assert_eq!(p.x, (SCREEN_WIDTH - 48) / 2);
    assert_eq!(p.y, SCREEN_HEIGHT - 48 - PLAYER_BOTTOM_MARGIN);
    assert_eq!(p.lives, 5);
    assert!(p.alive);
}

#[test]
fn player_move_left_stops_at_edge() {
    let mut p = player();
    p.x = 5;
    p.move_left();
    assert_eq!(p.x, 0);
    p.x = 3;
    p.move_left();
    assert_eq!(p.x, 3); // 3 - 5 < 0, step refused
}

#[test]
fn player_move_right_stops_at_edge() {
    let mut p = player();
    p.x = SCREEN_WIDTH - p.w - 5;
    p.move_right();
    assert_eq!(p.x, SCREEN_WIDTH - p.w);
    p.x = SCREEN_WIDTH - p.w - 4;
    p.move_right();
    assert_eq!(p.x, SCREEN_WIDTH - p.w - 4);
}

#[test]
fn player_hit_costs_one_life() {
    let mut p = player();
    p.hit();
    assert_eq!(p.lives, 4);
    assert!(p.alive);
    assert_eq!(p.bang, PLAYER_BANG_FRAMES);
}

#[test]
fn player_dies_on_hit_with_last_life() {
    let mut p = player();
    p.lives = 2;
    p.hit();
    assert!(p.alive);
    p.hit();
    assert_eq!(p.lives, 0);
    assert!(!p.alive);
}

#[test]
fn player_hit_with_no_lives_is_noop() {
    let mut p = player();
    p.lives = 0;
    p.alive = false;
    p.hit();
    assert_eq!(p.lives, 0);
    assert!(!p.alive);
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[test]
fn enemy_moves_by_its_speed() {
    let mut e = Enemy::new(SpriteKey::Enemy1, 100, 100, -2, &SIZES);
    e.step();
    assert_eq!(e.x, 98);
    assert_eq!(e.y, 100);
}

#[test]
fn enemy_drops_and_turns_at_right_edge() {
    let mut e = Enemy::new(SpriteKey::Enemy1, SCREEN_WIDTH - 41, 100, 2, &SIZES);
    e.step();
    assert_eq!(e.x, SCREEN_WIDTH - 41);
    assert_eq!(e.y, 100 + ENEMY_DROP_STEP);
    assert_eq!(e.speed, -2);
    e.step();
    assert_eq!(e.x, SCREEN_WIDTH - 43);
}

#[test]
fn enemy_drops_and_turns_at_left_edge() {
    let mut e = Enemy::new(SpriteKey::Enemy2, 1, 100, -2, &SIZES);
    e.step();
    assert_eq!(e.y, 100 + ENEMY_DROP_STEP);
    assert_eq!(e.speed, 2);
}

#[test]
fn exploding_enemy_holds_still() {
    let mut e = Enemy::new(SpriteKey::Enemy1, 100, 100, 2, &SIZES);
    assert!(e.hit());
    e.step();
    assert_eq!(e.x, 100);
}

#[test]
fn enemy_hit_starts_explosion_then_finishes() {
    let mut e = Enemy::new(SpriteKey::Enemy1, 100, 100, 2, &SIZES);
    assert!(e.hit());
    assert!(!e.alive);
    assert!(e.is_exploding());
    assert!(!e.hit(), "already destroyed");
    for _ in 0..ENEMY_BANG_FRAMES {
        assert!(!e.is_finished());
        e.tick_bang();
    }
    assert!(e.is_finished());
}

#[test]
fn enemy_muzzle_is_lower_centre() {
    let e = Enemy::new(SpriteKey::Enemy1, 100, 100, 2, &SIZES);
    assert_eq!(e.muzzle(), (120, 132));
}

// ── Boss ──────────────────────────────────────────────────────────────────────

#[test]
fn boss_spawns_centred_at_top() {
    let b = Boss::new(SpriteKey::Boss1, &SIZES);
    assert_eq!(b.x, (SCREEN_WIDTH - 160) / 2);
    assert_eq!(b.y, BOSS_TOP);
    assert_eq!(b.hp, BOSS_HP);
}

#[test]
fn boss_takes_ten_hits() {
    let mut b = Boss::new(SpriteKey::Boss3, &SIZES);
    for remaining in (1..BOSS_HP).rev() {
        assert!(!b.hit());
        assert_eq!(b.hp, remaining);
        assert!(b.alive);
    }
    assert!(b.hit());
    assert!(!b.alive);
    assert_eq!(b.bang, BOSS_BANG_FRAMES);
    assert!(!b.hit());
    assert_eq!(b.hp, 0);
}

#[test]
fn boss_bounces_on_each_axis_independently() {
    let mut b = Boss::new(SpriteKey::Boss1, &SIZES);
    b.x = SCREEN_WIDTH - b.w - 2;
    b.y = 100;
    b.step();
    assert_eq!(b.vx, -BOSS_SPEED_X);
    assert_eq!(b.x, SCREEN_WIDTH - b.w - 2);
    assert_eq!(b.y, 100 + BOSS_SPEED_Y);

    b.y = b.y_limit() - 1;
    b.step();
    assert_eq!(b.vy, -BOSS_SPEED_Y);
    assert_eq!(b.y_limit(), SCREEN_HEIGHT - b.h - BOSS_BOTTOM_MARGIN);
}

#[test]
fn boss_bounces_off_top() {
    let mut b = Boss::new(SpriteKey::Boss1, &SIZES);
    b.y = 1;
    b.vy = -2;
    b.step();
    assert_eq!(b.vy, 2);
    assert_eq!(b.y, 1);
}

// ── Projectiles & items ───────────────────────────────────────────────────────

#[test]
fn missile_spawns_centred_above_origin() {
    let m = Missile::new(512, 680, &SIZES);
    assert_eq!(m.h, SIZES.height(SpriteKey::Missile));
    assert_eq!(m.bounds().center_x(), 512);
    assert_eq!(m.y, 680 - m.h);
}

#[test]
fn missile_flies_up_and_leaves_top() {
    let mut m = Missile::new(512, 16, &SIZES);
    assert_eq!(m.y, 0);
    assert!(!m.is_off_screen());
    m.step();
    assert_eq!(m.y, -MISSILE_SPEED);
    assert!(m.is_off_screen());
}

#[test]
fn enemy_missile_falls_and_leaves_bottom() {
    let mut m = EnemyMissile::new((100, SCREEN_HEIGHT - 2), &SIZES);
    m.step();
    assert_eq!(m.y, SCREEN_HEIGHT - 2 + ENEMY_MISSILE_SPEED);
    assert!(m.is_off_screen());
}

#[test]
fn item_starts_above_screen_and_falls() {
    let mut item = Item::new(ItemKind::LifeUp, 100, &SIZES);
    assert_eq!(item.y, -32);
    item.step();
    assert_eq!(item.y, -32 + ITEM_FALL_SPEED);
}

#[test]
fn item_kind_sprites_are_distinct() {
    assert_eq!(ItemKind::ScoreUp.sprite(), SpriteKey::ItemScoreUp);
    assert_eq!(ItemKind::MissileUpgrade.sprite(), SpriteKey::ItemMissileUpgrade);
}

#[test]
fn random_item_kind_covers_every_kind() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut seen = Vec::new();
    for _ in 0..200 {
        let kind = ItemKind::random(&mut rng);
        if !seen.contains(&kind) {
            seen.push(kind);
        }
    }
    assert_eq!(seen.len(), 4);
}

#[test]
fn lowest_draw_picks_first_kind() {
    let mut rng = StepRng::new(0, 0);
    assert_eq!(ItemKind::random(&mut rng), ItemKind::ScoreUp);
}

// ── Stars ─────────────────────────────────────────────────────────────────────

#[test]
fn star_color_follows_speed() {
    assert_eq!(StarColor::for_speed(1), StarColor::Dim);
    assert_eq!(StarColor::for_speed(2), StarColor::Mid);
    assert_eq!(StarColor::for_speed(3), StarColor::Bright);
}

#[test]
fn star_moves_on_its_interval() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut star = Star::new(10, 100, 2, 3);
    star.update(&mut rng);
    star.update(&mut rng);
    assert_eq!(star.y, 100);
    star.update(&mut rng);
    assert_eq!(star.y, 102);
}

#[test]
fn star_wraps_to_top() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut star = Star::new(10, SCREEN_HEIGHT - 1, 3, 1);
    star.update(&mut rng);
    assert_eq!(star.y, 0);
    assert!((0..SCREEN_WIDTH).contains(&star.x));
}

#[test]
fn starfield_is_populated_on_screen() {
    let field = Starfield::new(&mut StdRng::seed_from_u64(3));
    assert_eq!(field.stars.len(), STAR_COUNT);
    assert!(field
        .stars
        .iter()
        .all(|s| (0..SCREEN_WIDTH).contains(&s.x) && (0..SCREEN_HEIGHT).contains(&s.y)));
}
