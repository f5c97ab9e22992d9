use std::collections::HashMap;

use crossing_games::entities::Direction;
use crossing_games::memory::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Unshuffled board: cards 2k and 2k+1 form a pair.
fn make_state() -> MemoryState {
    let cards = Symbol::ALL
        .iter()
        .flat_map(|&symbol| [symbol, symbol])
        .map(|symbol| Card { symbol, face_up: false, matched: false })
        .collect();
    MemoryState {
        cards,
        selected: Vec::new(),
        pending_reset: None,
        moves: 0,
        matches: 0,
        rating: MAX_RATING,
        elapsed_secs: 0,
        cursor: 0,
        status: MemoryStatus::Playing,
        flip_delay_secs: 1.0,
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── init_memory ───────────────────────────────────────────────────────────────

#[test]
fn init_deals_every_symbol_twice_face_down() {
    let s = init_memory(1.0, &mut seeded_rng());
    assert_eq!(s.cards.len(), 2 * PAIRS);

    let mut counts: HashMap<Symbol, usize> = HashMap::new();
    for card in &s.cards {
        assert!(!card.face_up && !card.matched);
        *counts.entry(card.symbol).or_default() += 1;
    }
    assert_eq!(counts.len(), PAIRS);
    assert!(counts.values().all(|&n| n == 2));

    assert_eq!(s.moves, 0);
    assert_eq!(s.matches, 0);
    assert_eq!(s.rating, MAX_RATING);
    assert_eq!(s.status, MemoryStatus::Playing);
}

#[test]
fn init_shuffles_the_deck() {
    let dealt: Vec<Vec<Symbol>> = (0..5)
        .map(|seed| {
            init_memory(1.0, &mut StdRng::seed_from_u64(seed))
                .cards
                .iter()
                .map(|c| c.symbol)
                .collect()
        })
        .collect();
    assert!(dealt.windows(2).any(|w| w[0] != w[1]));
}

// ── select_card ───────────────────────────────────────────────────────────────

#[test]
fn first_selection_flips_without_a_move() {
    let s = select_card(&make_state(), 0);
    assert!(s.cards[0].face_up);
    assert_eq!(s.selected, vec![0]);
    assert_eq!(s.moves, 0);
    assert!(s.pending_reset.is_none());
}

#[test]
fn matching_pair_is_marked_matched() {
    let s = select_card(&make_state(), 0);
    let s = select_card(&s, 1);
    assert!(s.cards[0].matched && s.cards[1].matched);
    assert_eq!(s.matches, 1);
    assert_eq!(s.moves, 1);

    let s = advance(&s, 1.0);
    assert!(s.cards[0].face_up && s.cards[1].face_up);
    assert!(s.selected.is_empty());
    assert_eq!(s.moves, 1);
}

#[test]
fn mismatched_pair_flips_back_after_delay() {
    let s = select_card(&make_state(), 0);
    let s = select_card(&s, 2);
    assert_eq!(s.moves, 1);
    assert!(s.cards[0].face_up && s.cards[2].face_up);
    assert!(!s.cards[0].matched && !s.cards[2].matched);

    let half = advance(&s, 0.5);
    assert!(half.cards[0].face_up && half.cards[2].face_up);

    let done = advance(&half, 0.5);
    assert!(!done.cards[0].face_up && !done.cards[2].face_up);
    assert!(done.selected.is_empty());
    assert!(done.pending_reset.is_none());
    assert_eq!(done.moves, 1);
    assert_eq!(done.matches, 0);
}

#[test]
fn clicks_are_blocked_while_pair_is_showing() {
    let s = select_card(&make_state(), 0);
    let s = select_card(&s, 2);
    let s2 = select_card(&s, 4);
    assert!(!s2.cards[4].face_up);
    assert_eq!(s2.moves, 1);
}

#[test]
fn selecting_the_same_card_twice_is_ignored() {
    let s = select_card(&make_state(), 3);
    let s2 = select_card(&s, 3);
    assert_eq!(s2.selected, vec![3]);
    assert_eq!(s2.moves, 0);
}

#[test]
fn matched_cards_cannot_be_selected() {
    let s = select_card(&make_state(), 0);
    let s = advance(&select_card(&s, 1), 1.0);
    let s2 = select_card(&s, 0);
    assert!(s2.selected.is_empty());
}

#[test]
fn out_of_range_selection_is_ignored() {
    let s = make_state();
    let s2 = select_card(&s, 99);
    assert!(s2.selected.is_empty());
    assert_eq!(s2.cards, s.cards);
}

#[test]
fn every_pair_found_wins_and_stops_stopwatch() {
    let mut s = make_state();
    for pair in 0..PAIRS {
        s = select_card(&s, 2 * pair);
        s = select_card(&s, 2 * pair + 1);
        s = advance(&s, 1.0);
        s = tick_stopwatch(&s);
    }
    assert_eq!(s.status, MemoryStatus::Won);
    assert_eq!(s.matches, PAIRS);
    assert_eq!(s.moves, PAIRS as u32);
    assert_eq!(s.rating, MAX_RATING);

    let after = tick_stopwatch(&s);
    assert_eq!(after.elapsed_secs, s.elapsed_secs);
    assert_eq!(select_card(&after, 0).selected, Vec::<usize>::new());
}

// ── rating ────────────────────────────────────────────────────────────────────

#[test]
fn rating_thresholds() {
    assert_eq!(rating_for(15, 3), 3);
    assert_eq!(rating_for(16, 3), 2);
    assert_eq!(rating_for(20, 2), 2);
    assert_eq!(rating_for(21, 2), 1);
    assert_eq!(rating_for(40, 1), 1);
}

#[test]
fn rating_drops_one_step_at_a_time() {
    assert_eq!(rating_for(25, 3), 2);
}

#[test]
fn rating_follows_moves_through_play() {
    let mut s = make_state();
    // alternate two mismatched cards to rack up moves
    for _ in 0..25 {
        s = select_card(&s, 0);
        s = select_card(&s, 2);
        s = advance(&s, 1.0);
        match s.moves {
            0..=15 => assert_eq!(s.rating, 3),
            16..=20 => assert_eq!(s.rating, 2),
            _ => assert_eq!(s.rating, 1),
        }
    }
    assert_eq!(s.moves, 25);
}

// ── stopwatch / cursor / restart ─────────────────────────────────────────────

#[test]
fn stopwatch_counts_while_playing() {
    let s = tick_stopwatch(&tick_stopwatch(&make_state()));
    assert_eq!(s.elapsed_secs, 2);
}

#[test]
fn cursor_moves_and_clamps() {
    let s = make_state();
    assert_eq!(move_cursor(&s, Direction::Left).cursor, 0);
    assert_eq!(move_cursor(&s, Direction::Up).cursor, 0);
    assert_eq!(move_cursor(&s, Direction::Right).cursor, 1);
    assert_eq!(move_cursor(&s, Direction::Down).cursor, GRID_COLUMNS);

    let mut corner = make_state();
    corner.cursor = 15;
    assert_eq!(move_cursor(&corner, Direction::Right).cursor, 15);
    assert_eq!(move_cursor(&corner, Direction::Down).cursor, 15);
    assert_eq!(move_cursor(&corner, Direction::Left).cursor, 14);
    assert_eq!(move_cursor(&corner, Direction::Up).cursor, 11);

    let mut edge = make_state();
    edge.cursor = 3;
    assert_eq!(move_cursor(&edge, Direction::Right).cursor, 3);
}

#[test]
fn select_at_cursor_flips_the_card_under_it() {
    let mut s = make_state();
    s.cursor = 5;
    let s2 = select_at_cursor(&s);
    assert!(s2.cards[5].face_up);
}

#[test]
fn restart_resets_counters() {
    let mut s = make_state();
    s.moves = 30;
    s.rating = 1;
    s.elapsed_secs = 77;
    s.flip_delay_secs = 0.25;
    let s2 = restart_memory(&s, &mut seeded_rng());
    assert_eq!(s2.moves, 0);
    assert_eq!(s2.rating, MAX_RATING);
    assert_eq!(s2.elapsed_secs, 0);
    assert_eq!(s2.flip_delay_secs, 0.25);
}
