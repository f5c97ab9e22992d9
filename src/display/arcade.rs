/// Arcade board rendering.
///
/// Every board tile is `TILE_WIDTH` × `TILE_HEIGHT` terminal cells.  Entity
/// glyphs sit on the first line of their tile, centred.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use crossing_games::entities::{
    ArcadeState, BoardHeight, BoardWidth, CollectibleKind, GameStatus, Layout,
};

use super::{draw_modal, finish_frame};

pub const TILE_WIDTH: u16 = 8;
pub const TILE_HEIGHT: u16 = 2;

/// Board's top-left terminal cell (inside the border).
const ORIGIN_X: u16 = 1;
const ORIGIN_Y: u16 = 2;

const C_BORDER: Color = Color::DarkBlue;
const C_WATER: Color = Color::Blue;
const C_STONE: Color = Color::DarkGrey;
const C_GRASS: Color = Color::DarkGreen;
const C_ENEMY: Color = Color::Red;
const C_GOAL: Color = Color::Yellow;
const C_HUD_POINTS: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_CLOCK: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

const CHARACTERS: [(&str, Color); 5] = [
    ("Boy", Color::White),
    ("Horn girl", Color::Magenta),
    ("Pink girl", Color::Red),
    ("Princess", Color::Yellow),
    ("Cat girl", Color::Cyan),
];

/// Pick the largest board that fits the terminal, mirroring how the browser
/// version sized its canvas from the window.
pub fn board_for_terminal(width: u16, height: u16) -> (BoardWidth, BoardHeight) {
    let wide = Layout::new(BoardWidth::Wide, BoardHeight::Tall);
    let board_width = if width >= wide.columns as u16 * TILE_WIDTH + 2 {
        BoardWidth::Wide
    } else {
        BoardWidth::Narrow
    };
    let fits = |h: BoardHeight| {
        let rows = Layout::new(board_width, h).rows as u16;
        height >= rows * TILE_HEIGHT + ORIGIN_Y + 2
    };
    let board_height = if fits(BoardHeight::Tall) {
        BoardHeight::Tall
    } else if fits(BoardHeight::Medium) {
        BoardHeight::Medium
    } else {
        BoardHeight::Short
    };
    (board_width, board_height)
}

fn board_width(layout: &Layout) -> u16 {
    layout.columns as u16 * TILE_WIDTH
}

fn board_height(layout: &Layout) -> u16 {
    layout.rows as u16 * TILE_HEIGHT
}

/// Terminal cell at which a glyph of `len` chars is centred in tile (x, y).
fn tile_anchor(x: i32, y: i32, len: u16) -> (u16, u16) {
    let col = ORIGIN_X + x.max(0) as u16 * TILE_WIDTH + (TILE_WIDTH - len) / 2;
    let row = ORIGIN_Y + y.max(0) as u16 * TILE_HEIGHT;
    (col, row)
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete arcade frame.
pub fn render<W: Write>(out: &mut W, state: &ArcadeState) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &state.layout)?;
    draw_tiles(out, &state.layout)?;
    draw_special_tiles(out, &state.layout)?;
    draw_hud(out, state)?;

    draw_glyph(out, state.goal.x, state.goal.y, "★", C_GOAL)?;
    let (gem, gem_color) = collectible_glyph(state.active.kind);
    draw_glyph(out, state.active.x, state.active.y, gem, gem_color)?;

    for enemy in &state.enemies {
        draw_enemy(out, &state.layout, enemy.x, enemy.y)?;
    }

    let (_, player_color) = CHARACTERS[state.player.sprite % CHARACTERS.len()];
    draw_glyph(out, state.player.x, state.player.y, "☻", player_color)?;

    draw_controls_hint(out, &state.layout)?;

    match state.status {
        GameStatus::Playing => {}
        GameStatus::ShowingInfo => draw_info(out, &state.layout)?,
        status => draw_summary(out, state, status)?,
    }

    finish_frame(out, ORIGIN_Y + board_height(&state.layout) + 2)
}

// ── Board ─────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    let w = board_width(layout) as usize;
    let bottom = ORIGIN_Y + board_height(layout);

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, ORIGIN_Y - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;
    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    for row in ORIGIN_Y..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(ORIGIN_X + w as u16, row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

fn draw_tiles<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    let line_width = board_width(layout) as usize;
    for y in 0..layout.rows {
        let (fill, color) = if y == layout.water_row() {
            ("≈", C_WATER)
        } else if layout.lane_rows().contains(&y) {
            ("░", C_STONE)
        } else {
            ("\"", C_GRASS)
        };
        out.queue(style::SetForegroundColor(color))?;
        for line in 0..TILE_HEIGHT {
            out.queue(cursor::MoveTo(ORIGIN_X, ORIGIN_Y + y as u16 * TILE_HEIGHT + line))?;
            out.queue(Print(fill.repeat(line_width)))?;
        }
    }
    Ok(())
}

fn draw_special_tiles<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    let (sx, sy) = layout.selector_cell();
    draw_glyph(out, sx, sy, "[  ]", Color::White)?;
    let (ix, iy) = layout.info_cell();
    draw_glyph(out, ix, iy, "(?)", Color::Cyan)
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn collectible_glyph(kind: CollectibleKind) -> (&'static str, Color) {
    match kind {
        CollectibleKind::BlueGem => ("◆", Color::Blue),
        CollectibleKind::OrangeGem => ("◆", Color::DarkYellow),
        CollectibleKind::GreenGem => ("◆", Color::Green),
        CollectibleKind::Heart => ("♥", Color::Red),
    }
}

fn draw_glyph<W: Write>(
    out: &mut W,
    x: i32,
    y: i32,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let (col, row) = tile_anchor(x, y, glyph.chars().count() as u16);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

/// Bugs move continuously, so they are placed by fractional tile and
/// clipped to the board.
fn draw_enemy<W: Write>(out: &mut W, layout: &Layout, x: f32, y: i32) -> std::io::Result<()> {
    const SPRITE: &str = "<ж>";
    let sprite_len = SPRITE.chars().count() as i32;
    let left = (x * TILE_WIDTH as f32).round() as i32 + (TILE_WIDTH as i32 - sprite_len) / 2;
    let right = left + sprite_len;
    if right <= 0 || left >= board_width(layout) as i32 {
        return Ok(());
    }

    let visible: String = SPRITE
        .chars()
        .enumerate()
        .filter(|(i, _)| {
            let col = left + *i as i32;
            col >= 0 && col < board_width(layout) as i32
        })
        .map(|(_, c)| c)
        .collect();
    let col = ORIGIN_X + left.max(0) as u16;
    out.queue(cursor::MoveTo(col, ORIGIN_Y + y as u16 * TILE_HEIGHT))?;
    out.queue(style::SetForegroundColor(C_ENEMY))?;
    out.queue(Print(visible))?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &ArcadeState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(format!("{:<4}", "♥".repeat(state.player.lives as usize))))?;

    out.queue(style::SetForegroundColor(C_HUD_POINTS))?;
    out.queue(Print(format!("  Points: {:<5}", state.player.points)))?;

    let (name, color) = CHARACTERS[state.player.sprite % CHARACTERS.len()];
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(format!(" {}", name)))?;

    let clock = format!("{}", state.clock);
    let rx = (ORIGIN_X + board_width(&state.layout)).saturating_sub(clock.len() as u16);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_CLOCK))?;
    out.queue(Print(clock))?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, ORIGIN_Y + board_height(layout) + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑→↓ / WASD : Move   R : Restart   Q : Menu"))?;
    Ok(())
}

// ── Modals ────────────────────────────────────────────────────────────────────

fn board_center(layout: &Layout) -> (u16, u16) {
    (
        ORIGIN_X + board_width(layout) / 2,
        ORIGIN_Y + board_height(layout) / 2,
    )
}

fn draw_info<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    let (cx, cy) = board_center(layout);
    let lines = [
        ("GAME INSTRUCTIONS".to_string(), Color::Cyan),
        ("Collect gems to earn points.".to_string(), Color::White),
        ("The bugs are not friendly: they cost a life.".to_string(), Color::White),
        ("Reach the star before the time runs out.".to_string(), Color::White),
        ("Don't go in the water, you can't swim.".to_string(), Color::White),
        ("ENTER - Resume".to_string(), C_HINT),
    ];
    draw_modal(out, cx, cy, &lines)
}

fn draw_summary<W: Write>(
    out: &mut W,
    state: &ArcadeState,
    status: GameStatus,
) -> std::io::Result<()> {
    let (cx, cy) = board_center(&state.layout);
    let mut lines = match status {
        GameStatus::Won => vec![
            ("CONGRATULATIONS!".to_string(), Color::Green),
            ("You reached the star before the time ran out.".to_string(), Color::White),
            (format!("Total points: {}", state.player.points), Color::Yellow),
        ],
        GameStatus::OutOfLives => vec![
            ("GAME OVER".to_string(), Color::Red),
            ("You ran out of lives...".to_string(), Color::White),
            ("Don't fret, you can always try again.".to_string(), Color::White),
        ],
        _ => vec![
            ("GAME OVER".to_string(), Color::Red),
            ("No more time left...".to_string(), Color::White),
            ("Next time, be quicker!".to_string(), Color::White),
        ],
    };
    lines.push(("ENTER / R - Play Again   Q - Menu".to_string(), C_HINT));
    draw_modal(out, cx, cy, &lines)
}
