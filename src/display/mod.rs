/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of a game
/// state.  No game logic is performed; this module only translates state
/// into terminal commands.

pub mod arcade;
pub mod memory;

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

const C_TITLE: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;
const C_MODAL_BORDER: Color = Color::White;

// ── Shared helpers ────────────────────────────────────────────────────────────

/// Print `text` horizontally centred on column `cx`.
fn print_centered<W: Write>(
    out: &mut W,
    cx: u16,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = cx.saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

/// Draw a boxed message centred on (`cx`, `cy`), clearing what is beneath.
fn draw_modal<W: Write>(
    out: &mut W,
    cx: u16,
    cy: u16,
    lines: &[(String, Color)],
) -> std::io::Result<()> {
    let inner = lines
        .iter()
        .map(|(text, _)| text.chars().count())
        .max()
        .unwrap_or(0)
        + 4;
    let left = cx.saturating_sub(inner as u16 / 2 + 1);
    let top = cy.saturating_sub(lines.len() as u16 / 2 + 1);

    out.queue(style::SetForegroundColor(C_MODAL_BORDER))?;
    out.queue(cursor::MoveTo(left, top))?;
    out.queue(Print(format!("╔{}╗", "═".repeat(inner))))?;
    for i in 0..lines.len() as u16 {
        out.queue(cursor::MoveTo(left, top + 1 + i))?;
        out.queue(Print(format!("║{}║", " ".repeat(inner))))?;
    }
    out.queue(cursor::MoveTo(left, top + 1 + lines.len() as u16))?;
    out.queue(Print(format!("╚{}╝", "═".repeat(inner))))?;

    for (i, (text, color)) in lines.iter().enumerate() {
        print_centered(out, cx, top + 1 + i as u16, text, *color)?;
    }
    Ok(())
}

fn finish_frame<W: Write>(out: &mut W, park_row: u16) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, park_row))?;
    out.flush()
}

// ── Menu ──────────────────────────────────────────────────────────────────────

pub fn draw_menu<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    print_centered(out, cx, cy.saturating_sub(5), "★  CROSSING GAMES  ★", C_TITLE)?;
    print_centered(out, cx, cy.saturating_sub(3), "Select a game:", Color::White)?;

    let options: &[(&str, &str, Color, &str)] = &[
        ("1", "Arcade", Color::Green, "Cross the road, grab gems, reach the star"),
        ("2", "Memory", Color::Yellow, "Match all eight pairs of cards"),
    ];
    let left = cx.saturating_sub(24);
    for (i, (key, label, color, desc)) in options.iter().enumerate() {
        out.queue(cursor::MoveTo(left, cy.saturating_sub(1) + i as u16))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<8}", label)))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(format!(" {}", desc)))?;
    }

    print_centered(out, cx, cy + 3, "Q : Quit", C_HINT)?;
    finish_frame(out, height.saturating_sub(1))
}
