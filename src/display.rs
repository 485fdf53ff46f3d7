/// Terminal front end for the shooter.
///
/// Draws whichever screen the game is on. The 1024×768 logical field is
/// scaled onto the terminal grid, so several logical pixels share a cell.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use rand::Rng;
use stage_shooter::{
    constants::{SCREEN_HEIGHT, SCREEN_WIDTH},
    entities::{Boss, Destructible, Enemy, Item, ItemKind, StarColor, Starfield},
    run_state::RunState,
    score::ScoreLedger,
    screen::{Game, HighScoreScreen, Screen, TitleScreen},
    sprites::SpriteKey,
    stage::StageSim,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_STAGE: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_PLAYER_HIT: Color = Color::Red;
const C_ENEMY_A: Color = Color::Green;
const C_ENEMY_B: Color = Color::Red;
const C_BOSS: Color = Color::Magenta;
const C_BANG: Color = Color::Yellow;
const C_MISSILE: Color = Color::Cyan;
const C_ENEMY_MISSILE: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps logical coordinates onto the bordered play area of the terminal.
#[derive(Clone, Copy)]
struct Viewport {
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn field_cols(&self) -> i32 {
        (self.cols as i32 - 2).max(1)
    }

    fn field_rows(&self) -> i32 {
        (self.rows as i32 - 4).max(1)
    }

    /// Terminal cell for a logical point, or `None` if it is off the field.
    fn cell(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if !(0..SCREEN_WIDTH).contains(&x) || !(0..SCREEN_HEIGHT).contains(&y) {
            return None;
        }
        let col = 1 + x * self.field_cols() / SCREEN_WIDTH;
        let row = 2 + y * self.field_rows() / SCREEN_HEIGHT;
        Some((col as u16, row as u16))
    }

    /// Width of a logical span in cells, at least one.
    fn span(&self, w: i32) -> usize {
        (w * self.field_cols() / SCREEN_WIDTH).max(1) as usize
    }

    fn span_rows(&self, h: i32) -> u16 {
        (h * self.field_rows() / SCREEN_HEIGHT).max(1) as u16
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write, R: Rng>(out: &mut W, game: &Game<R>, (cols, rows): (u16, u16)) -> std::io::Result<()> {
    let view = Viewport { cols, rows };
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match game.screen() {
        Screen::Title(title) => draw_title(out, view, title, game.ledger())?,
        Screen::HighScore(scores) => draw_high_scores(out, view, scores, game.ledger())?,
        Screen::Stage(sim) => draw_stage(out, view, sim, game.run(), game.ledger())?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn print_centered<W: Write>(out: &mut W, view: Viewport, row: u16, text: &str, color: Color) -> std::io::Result<()> {
    let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

fn draw_stars<W: Write>(out: &mut W, view: Viewport, field: &Starfield) -> std::io::Result<()> {
    for star in &field.stars {
        let Some((col, row)) = view.cell(star.x, star.y) else {
            continue;
        };
        let color = match star.color {
            StarColor::Dim => Color::DarkGrey,
            StarColor::Mid => Color::Grey,
            StarColor::Bright => Color::White,
        };
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print("."))?;
    }
    Ok(())
}

// ── Title & ranking ───────────────────────────────────────────────────────────

fn draw_title<W: Write>(out: &mut W, view: Viewport, title: &TitleScreen, ledger: &ScoreLedger) -> std::io::Result<()> {
    draw_stars(out, view, &title.starfield)?;

    let cy = view.rows / 2;
    print_centered(out, view, cy.saturating_sub(5), "★  STAGE  SHOOTER  ★", Color::Cyan)?;
    let best = format!("Best Score: {}", ledger.high_scores()[0]);
    print_centered(out, view, cy.saturating_sub(4), &best, Color::Yellow)?;

    let options = ["New Game", "Score Ranking"];
    for (i, label) in options.iter().enumerate() {
        let selected = title.cursor() == i;
        let text = if selected { format!("▶ {label} ◀") } else { format!("  {label}  ") };
        let color = if selected { Color::White } else { Color::DarkGrey };
        print_centered(out, view, cy.saturating_sub(1) + i as u16 * 2, &text, color)?;
    }

    print_centered(out, view, cy + 5, "← → : Select   SPACE : Confirm   Q : Quit", C_HINT)
}

fn draw_high_scores<W: Write>(
    out: &mut W,
    view: Viewport,
    screen: &HighScoreScreen,
    ledger: &ScoreLedger,
) -> std::io::Result<()> {
    draw_stars(out, view, &screen.starfield)?;

    let cy = view.rows / 2;
    print_centered(out, view, cy.saturating_sub(4), "SCORE RANKING", Color::Cyan)?;
    let medals = [Color::Yellow, Color::Grey, Color::DarkYellow];
    for (i, (score, color)) in ledger.high_scores().iter().zip(medals).enumerate() {
        let line = format!("{}.  {:>8}", i + 1, score);
        print_centered(out, view, cy.saturating_sub(2) + i as u16, &line, color)?;
    }
    print_centered(out, view, cy + 3, "SPACE : Back", C_HINT)
}

// ── Stage ─────────────────────────────────────────────────────────────────────

fn draw_stage<W: Write>(
    out: &mut W,
    view: Viewport,
    sim: &StageSim,
    run: &RunState,
    ledger: &ScoreLedger,
) -> std::io::Result<()> {
    draw_stars(out, view, &sim.starfield)?;
    draw_border(out, view)?;
    draw_hud(out, view, sim, ledger)?;

    for enemy in &sim.enemies {
        draw_enemy(out, view, enemy)?;
    }
    if let Some(boss) = &sim.boss {
        draw_boss(out, view, boss)?;
    }
    for item in &sim.items {
        draw_item(out, view, item)?;
    }
    for missile in sim.missiles.iter().filter(|m| m.visible) {
        if let Some((col, row)) = view.cell(missile.x, missile.y) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_MISSILE))?;
            out.queue(Print("║"))?;
        }
    }
    for missile in sim.enemy_missiles.iter().filter(|m| m.visible) {
        if let Some((col, row)) = view.cell(missile.x, missile.y) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_ENEMY_MISSILE))?;
            out.queue(Print("↓"))?;
        }
    }
    draw_player(out, view, sim)?;

    if sim.in_intro() {
        print_centered(out, view, view.rows / 2, &format!("STAGE {}", sim.stage), Color::White)?;
    }
    if run.game_over {
        draw_banner(out, view, "GAME  OVER", Color::Red, ledger, sim.terminal_hold == 0)?;
    } else if run.game_clear {
        draw_banner(out, view, "GAME  CLEAR", Color::Green, ledger, sim.terminal_hold == 0)?;
    }

    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

fn draw_border<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

fn draw_hud<W: Write>(out: &mut W, view: Viewport, sim: &StageSim, ledger: &ScoreLedger) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>7}  Hi:{:>7}", ledger.score(), ledger.best())))?;

    let stage_str = match &sim.boss {
        Some(boss) if boss.alive => format!("[ STAGE {} · BOSS {:>2} ]", sim.stage, boss.hp),
        _ => format!("[ STAGE {} ]", sim.stage),
    };
    let sx = (view.cols / 2).saturating_sub(stage_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_STAGE))?;
    out.queue(Print(&stage_str))?;

    let lives_str = format!("Lives:{}", "♥".repeat(sim.player.lives as usize));
    let rx = view.cols.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, view: Viewport, sim: &StageSim) -> std::io::Result<()> {
    //   ▲       ← tip
    //  /█\      ← fuselage + wings
    let p = &sim.player;
    let Some((col, row)) = view.cell(p.center_x(), p.y) else {
        return Ok(());
    };
    let color = if p.bang > 0 { C_PLAYER_HIT } else { C_PLAYER };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print("▲"))?;
    if row + 1 < view.rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row + 1))?;
        out.queue(Print("/█\\"))?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, view: Viewport, enemy: &Enemy) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(enemy.x, enemy.y) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(col, row))?;
    if enemy.is_exploding() {
        out.queue(style::SetForegroundColor(C_BANG))?;
        out.queue(Print("✶"))?;
        return Ok(());
    }
    let (glyph, color) = match enemy.sprite {
        SpriteKey::Enemy1 | SpriteKey::Enemy3 | SpriteKey::Enemy5 => ("«▼»", C_ENEMY_A),
        _ => ("(◎)", C_ENEMY_B),
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_boss<W: Write>(out: &mut W, view: Viewport, boss: &Boss) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(boss.x, boss.y) else {
        return Ok(());
    };
    let width = view.span(boss.w);
    let (fill, color) = if boss.is_exploding() { ("✶", C_BANG) } else { ("▓", C_BOSS) };
    out.queue(style::SetForegroundColor(color))?;
    for dy in 0..view.span_rows(boss.h) {
        out.queue(cursor::MoveTo(col, row + dy))?;
        out.queue(Print(fill.repeat(width)))?;
    }
    Ok(())
}

/// Falling items:
///   $  (yellow)  ScoreUp
///   ♥  (magenta) LifeUp
///   »  (green)   SpeedUp
///   !  (cyan)    MissileUpgrade
fn draw_item<W: Write>(out: &mut W, view: Viewport, item: &Item) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(item.x, item.y) else {
        return Ok(());
    };
    let (glyph, color) = match item.kind {
        ItemKind::ScoreUp => ("$", Color::Yellow),
        ItemKind::LifeUp => ("♥", Color::Magenta),
        ItemKind::SpeedUp => ("»", Color::Green),
        ItemKind::MissileUpgrade => ("!", Color::Cyan),
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── End-of-run overlay ────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    view: Viewport,
    title: &str,
    color: Color,
    ledger: &ScoreLedger,
    ready: bool,
) -> std::io::Result<()> {
    let start_row = (view.rows / 2).saturating_sub(3);
    print_centered(out, view, start_row, "╔════════════════════╗", color)?;
    print_centered(out, view, start_row + 1, &format!("║{title:^20}║"), color)?;
    print_centered(out, view, start_row + 2, "╚════════════════════╝", color)?;
    print_centered(out, view, start_row + 3, &format!("Final Score: {:>7}", ledger.score()), Color::Yellow)?;
    print_centered(out, view, start_row + 4, &format!("Best Score:  {:>7}", ledger.best()), Color::DarkGrey)?;
    if ready {
        print_centered(out, view, start_row + 5, "SPACE - Title   Q - Quit", Color::White)?;
    }
    Ok(())
}
