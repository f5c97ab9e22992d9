/// Memory (matching pairs) game: data and pure transitions.
///
/// Same shape as the arcade side: every transition takes the current
/// `MemoryState` and returns a new one.

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::Direction;

/// Cards per row of the grid.
pub const GRID_COLUMNS: usize = 4;

pub const MAX_RATING: u8 = 3;

/// Moves above this cost the first star.
pub const FIRST_STAR_MOVES: u32 = 15;

/// Moves above this cost the second star.
pub const SECOND_STAR_MOVES: u32 = 20;

/// How long a resolved pair stays face up before the board accepts clicks.
pub const DEFAULT_FLIP_DELAY_SECS: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    Airplane,
    Car,
    Doughnut,
    EarthGlobe,
    Gamepad,
    Llama,
    Rocket,
    Squirrel,
}

impl Symbol {
    pub const ALL: [Symbol; 8] = [
        Symbol::Airplane,
        Symbol::Car,
        Symbol::Doughnut,
        Symbol::EarthGlobe,
        Symbol::Gamepad,
        Symbol::Llama,
        Symbol::Rocket,
        Symbol::Squirrel,
    ];
}

/// Number of pairs on the board.
pub const PAIRS: usize = Symbol::ALL.len();

#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub symbol: Symbol,
    pub face_up: bool,
    pub matched: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryStatus {
    Playing,
    Won,
}

#[derive(Clone, Debug)]
pub struct MemoryState {
    pub cards: Vec<Card>,
    /// Indices of the face-up, not-yet-resolved cards (at most two).
    pub selected: Vec<usize>,
    /// Seconds left before a resolved pair is cleared, if one is pending.
    pub pending_reset: Option<f32>,
    pub moves: u32,
    pub matches: usize,
    pub rating: u8,
    pub elapsed_secs: u32,
    /// Keyboard cursor over the grid.
    pub cursor: usize,
    pub status: MemoryStatus,
    pub flip_delay_secs: f32,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Deal a double deck, shuffled with Fisher–Yates.
pub fn init_memory(flip_delay_secs: f32, rng: &mut impl Rng) -> MemoryState {
    let mut symbols: Vec<Symbol> = Symbol::ALL.iter().chain(Symbol::ALL.iter()).copied().collect();
    symbols.shuffle(rng);

    info!("memory game dealt {} cards", symbols.len());

    MemoryState {
        cards: symbols
            .into_iter()
            .map(|symbol| Card {
                symbol,
                face_up: false,
                matched: false,
            })
            .collect(),
        selected: Vec::new(),
        pending_reset: None,
        moves: 0,
        matches: 0,
        rating: MAX_RATING,
        elapsed_secs: 0,
        cursor: 0,
        status: MemoryStatus::Playing,
        flip_delay_secs,
    }
}

pub fn restart_memory(state: &MemoryState, rng: &mut impl Rng) -> MemoryState {
    info!("memory game restarted");
    init_memory(state.flip_delay_secs, rng)
}

// ── Rules ────────────────────────────────────────────────────────────────────

/// Star rating after `moves` moves, given the current rating.  Each step
/// only fires from the rating directly above it.
pub fn rating_for(moves: u32, rating: u8) -> u8 {
    if moves > FIRST_STAR_MOVES && rating == MAX_RATING {
        MAX_RATING - 1
    } else if moves > SECOND_STAR_MOVES && rating == MAX_RATING - 1 {
        1
    } else {
        rating
    }
}

/// Flip the card at `index`.  Ignored while a pair is waiting to be
/// cleared, after the game is won, and for matched or already-selected
/// cards.  The second flip counts as one move whatever the outcome.
pub fn select_card(state: &MemoryState, index: usize) -> MemoryState {
    let selectable = state.status == MemoryStatus::Playing
        && state.pending_reset.is_none()
        && state.selected.len() < 2
        && state
            .cards
            .get(index)
            .is_some_and(|card| !card.matched && !state.selected.contains(&index));
    if !selectable {
        return state.clone();
    }

    let mut next = state.clone();
    next.cards[index].face_up = true;
    next.selected.push(index);

    if next.selected.len() == 2 {
        let (first, second) = (next.selected[0], next.selected[1]);
        next.moves += 1;
        next.rating = rating_for(next.moves, next.rating);

        if next.cards[first].symbol == next.cards[second].symbol {
            next.cards[first].matched = true;
            next.cards[second].matched = true;
            next.matches += 1;
            debug!("matched {:?} after {} moves", next.cards[first].symbol, next.moves);

            if next.matches == PAIRS {
                next.status = MemoryStatus::Won;
                info!(
                    "memory game won: {} moves, {}s, {} stars",
                    next.moves, next.elapsed_secs, next.rating
                );
            }
        }
        next.pending_reset = Some(next.flip_delay_secs);
    }
    next
}

pub fn select_at_cursor(state: &MemoryState) -> MemoryState {
    select_card(state, state.cursor)
}

/// Count the flip-back delay down by `dt` seconds.  When it runs out, any
/// unmatched selected cards turn face down and the board takes clicks again.
pub fn advance(state: &MemoryState, dt: f32) -> MemoryState {
    let Some(remaining) = state.pending_reset else {
        return state.clone();
    };

    let mut next = state.clone();
    let remaining = remaining - dt;
    if remaining > 0.0 {
        next.pending_reset = Some(remaining);
        return next;
    }

    for &index in &state.selected {
        if !next.cards[index].matched {
            next.cards[index].face_up = false;
        }
    }
    next.selected.clear();
    next.pending_reset = None;
    next
}

/// One second of wall-clock time has passed.
pub fn tick_stopwatch(state: &MemoryState) -> MemoryState {
    if state.status != MemoryStatus::Playing {
        return state.clone();
    }
    MemoryState {
        elapsed_secs: state.elapsed_secs + 1,
        ..state.clone()
    }
}

pub fn move_cursor(state: &MemoryState, direction: Direction) -> MemoryState {
    let total = state.cards.len();
    if total == 0 {
        return state.clone();
    }
    let column = state.cursor % GRID_COLUMNS;
    let cursor = match direction {
        Direction::Left if column > 0 => state.cursor - 1,
        Direction::Right if column + 1 < GRID_COLUMNS && state.cursor + 1 < total => {
            state.cursor + 1
        }
        Direction::Up if state.cursor >= GRID_COLUMNS => state.cursor - GRID_COLUMNS,
        Direction::Down if state.cursor + GRID_COLUMNS < total => state.cursor + GRID_COLUMNS,
        _ => state.cursor,
    };
    MemoryState {
        cursor,
        ..state.clone()
    }
}
