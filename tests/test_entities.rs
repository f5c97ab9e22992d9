use crossing_games::entities::*;

#[test]
fn layout_dimensions() {
    let wide_tall = Layout::new(BoardWidth::Wide, BoardHeight::Tall);
    assert_eq!(wide_tall.columns, 7);
    assert_eq!(wide_tall.lanes, 4);
    assert_eq!(wide_tall.start_x, 3);
    assert_eq!(wide_tall.start_y(), 6);

    let narrow_short = Layout::new(BoardWidth::Narrow, BoardHeight::Short);
    assert_eq!(narrow_short.columns, 4);
    assert_eq!(narrow_short.lanes, 3);
    assert_eq!(narrow_short.start_x, 1);
    assert_eq!(narrow_short.start_y(), 4);

    let medium = Layout::new(BoardWidth::Wide, BoardHeight::Medium);
    assert_eq!(medium.rows, 6);
    assert_eq!(medium.lane_rows(), 1..=3);
}

#[test]
fn layout_special_cells_on_start_row() {
    let layout = Layout::new(BoardWidth::Narrow, BoardHeight::Medium);
    assert_eq!(layout.selector_cell(), (0, 5));
    assert_eq!(layout.info_cell(), (3, 5));
    assert_eq!(layout.water_row(), 0);
}

#[test]
fn player_starts_with_full_lives() {
    let layout = Layout::new(BoardWidth::Wide, BoardHeight::Tall);
    let p = Player::at_start(&layout);
    assert_eq!(p.cell(), (3, 6));
    assert_eq!(p.lives, MAX_LIVES);
    assert_eq!(p.points, 0);
    assert!(!p.has_won && !p.needs_info && !p.is_game_over);
}

#[test]
fn countdown_formats_minutes_and_seconds() {
    let c = Countdown { remaining_secs: 90, paused: false };
    assert_eq!(c.to_string(), "1:30");
    let c = Countdown { remaining_secs: 5, paused: true };
    assert_eq!(c.to_string(), "0:05");
    let c = Countdown { remaining_secs: 0, paused: true };
    assert_eq!(c.to_string(), "0:00");
}

#[test]
fn terminal_statuses() {
    assert!(GameStatus::Won.is_terminal());
    assert!(GameStatus::OutOfLives.is_terminal());
    assert!(GameStatus::OutOfTime.is_terminal());
    assert!(!GameStatus::Playing.is_terminal());
    assert!(!GameStatus::ShowingInfo.is_terminal());
}

#[test]
fn heart_restores_life_gem_does_not() {
    let heart = Collectible { x: 0, y: 1, value: 0, kind: CollectibleKind::Heart };
    let gem = Collectible { x: 0, y: 1, value: 50, kind: CollectibleKind::GreenGem };
    assert!(heart.restores_life());
    assert!(!gem.restores_life());
}

#[test]
fn player_clone_is_independent() {
    let layout = Layout::new(BoardWidth::Wide, BoardHeight::Tall);
    let original = Player::at_start(&layout);
    let mut cloned = original.clone();
    cloned.x = 99;
    cloned.points = 999;
    assert_eq!(original.x, 3);
    assert_eq!(original.points, 0);
}
