/// Memory card grid rendering.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use crossing_games::memory::{Card, MemoryState, MemoryStatus, Symbol, GRID_COLUMNS, MAX_RATING};

use super::{draw_modal, finish_frame};

const CARD_WIDTH: u16 = 10;
const CARD_HEIGHT: u16 = 3;
const GAP: u16 = 1;
const ORIGIN_X: u16 = 2;
const ORIGIN_Y: u16 = 2;

const C_BACK: Color = Color::DarkBlue;
const C_MATCHED: Color = Color::Green;
const C_CURSOR: Color = Color::Yellow;
const C_HUD: Color = Color::White;
const C_STARS: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

fn symbol_label(symbol: Symbol) -> (&'static str, Color) {
    match symbol {
        Symbol::Airplane => ("PLANE", Color::Cyan),
        Symbol::Car => ("CAR", Color::Red),
        Symbol::Doughnut => ("DONUT", Color::Magenta),
        Symbol::EarthGlobe => ("GLOBE", Color::Blue),
        Symbol::Gamepad => ("GAMEPAD", Color::White),
        Symbol::Llama => ("LLAMA", Color::DarkYellow),
        Symbol::Rocket => ("ROCKET", Color::DarkRed),
        Symbol::Squirrel => ("SQUIRREL", Color::DarkGreen),
    }
}

fn grid_rows(state: &MemoryState) -> u16 {
    state.cards.len().div_ceil(GRID_COLUMNS) as u16
}

fn card_origin(index: usize) -> (u16, u16) {
    let col = (index % GRID_COLUMNS) as u16;
    let row = (index / GRID_COLUMNS) as u16;
    (
        ORIGIN_X + col * (CARD_WIDTH + GAP),
        ORIGIN_Y + row * (CARD_HEIGHT + GAP),
    )
}

/// Render one complete memory frame.
pub fn render<W: Write>(out: &mut W, state: &MemoryState) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, state)?;
    for (index, card) in state.cards.iter().enumerate() {
        draw_card(out, index, card, index == state.cursor)?;
    }

    let bottom = ORIGIN_Y + grid_rows(state) * (CARD_HEIGHT + GAP);
    out.queue(cursor::MoveTo(ORIGIN_X, bottom))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑→↓ / WASD : Move   ENTER : Flip   R : Restart   Q : Menu"))?;

    if state.status == MemoryStatus::Won {
        draw_summary(out, state)?;
    }

    finish_frame(out, bottom + 1)
}

fn draw_hud<W: Write>(out: &mut W, state: &MemoryState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(ORIGIN_X, 0))?;
    out.queue(style::SetForegroundColor(C_STARS))?;
    out.queue(Print(format!(
        "{:<3}",
        "★".repeat(state.rating as usize)
    )))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("☆".repeat(MAX_RATING.saturating_sub(state.rating) as usize)))?;

    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "   Moves: {:<4} Time: {}s",
        state.moves, state.elapsed_secs
    )))?;
    Ok(())
}

fn draw_card<W: Write>(
    out: &mut W,
    index: usize,
    card: &Card,
    under_cursor: bool,
) -> std::io::Result<()> {
    let (left, top) = card_origin(index);
    let inner = (CARD_WIDTH - 2) as usize;

    let border = if under_cursor {
        C_CURSOR
    } else if card.matched {
        C_MATCHED
    } else {
        C_BACK
    };

    let (face, face_color) = if card.face_up || card.matched {
        symbol_label(card.symbol)
    } else {
        ("░░░░░░", C_BACK)
    };

    out.queue(style::SetForegroundColor(border))?;
    out.queue(cursor::MoveTo(left, top))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(inner))))?;
    out.queue(cursor::MoveTo(left, top + 1))?;
    out.queue(Print("│"))?;
    out.queue(style::SetForegroundColor(if card.matched { C_MATCHED } else { face_color }))?;
    out.queue(Print(format!("{:^width$}", face, width = inner)))?;
    out.queue(style::SetForegroundColor(border))?;
    out.queue(Print("│"))?;
    out.queue(cursor::MoveTo(left, top + 2))?;
    out.queue(Print(format!("└{}┘", "─".repeat(inner))))?;
    Ok(())
}

fn draw_summary<W: Write>(out: &mut W, state: &MemoryState) -> std::io::Result<()> {
    let width = GRID_COLUMNS as u16 * (CARD_WIDTH + GAP);
    let cx = ORIGIN_X + width / 2;
    let cy = ORIGIN_Y + grid_rows(state) * (CARD_HEIGHT + GAP) / 2;
    let lines = [
        ("ALL PAIRS FOUND!".to_string(), Color::Green),
        (format!("Time: {}s", state.elapsed_secs), Color::White),
        (format!("Moves: {}", state.moves), Color::White),
        (format!("Stars: {}", "★".repeat(state.rating as usize)), C_STARS),
        ("ENTER / R - Play Again   Q - Menu".to_string(), C_HINT),
    ];
    draw_modal(out, cx, cy, &lines)
}
