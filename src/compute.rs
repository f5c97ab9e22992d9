/// Pure arcade-logic functions.
///
/// Every public transition takes an immutable reference to the current
/// `ArcadeState` (and, where needed, an RNG handle) and returns a brand-new
/// `ArcadeState`.  Side effects are limited to the injected RNG and logging.

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::{
    ArcadeState, Collectible, CollectibleKind, Countdown, Direction, Enemy, GameStatus, Goal,
    Layout, Player, CHARACTER_COUNT, MAX_LIVES,
};

/// Countdown length of a fresh game: 1:30.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 90;

/// Size of the collectible pool generated for each session.
pub const POOL_SIZE: usize = 50;

/// Every n-th pooled collectible is a heart.
const HEART_EVERY: usize = 10;

const GEM_VALUE: u32 = 50;

/// Slowest a bug ever moves, tiles/s.
pub const ENEMY_BASE_SPEED: f32 = 1.0;

/// Where a bug re-enters after leaving the board on the right.
pub const ENEMY_RESPAWN_X: f32 = -1.0;

/// Half-width of the window, in tiles, within which a bug hits the player.
pub const HIT_TOLERANCE: f32 = 0.75;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh session: one bug per lane, a new collectible pool and a
/// random star column.
pub fn init_state(layout: Layout, time_limit_secs: u32, rng: &mut impl Rng) -> ArcadeState {
    let player = Player::at_start(&layout);

    let enemies = layout
        .lane_rows()
        .map(|y| Enemy {
            x: 0.0,
            y,
            speed: random_speed(&layout, rng),
        })
        .collect();

    let pool = generate_pool(&layout, rng);
    let active = pick_collectible(&pool, player.lives, rng).unwrap_or(Collectible {
        x: layout.start_x,
        y: 1,
        value: GEM_VALUE,
        kind: CollectibleKind::BlueGem,
    });

    info!(
        "arcade session started: {}x{} board, {}s on the clock",
        layout.columns, layout.rows, time_limit_secs
    );

    ArcadeState {
        layout,
        player,
        enemies,
        pool,
        active,
        goal: Goal {
            x: random_goal_column(&layout, rng),
            y: layout.water_row(),
        },
        clock: Countdown {
            remaining_secs: time_limit_secs,
            paused: false,
        },
        status: GameStatus::Playing,
        time_limit_secs,
    }
}

/// Throw the session away and start again on the same board.
pub fn restart(state: &ArcadeState, rng: &mut impl Rng) -> ArcadeState {
    info!("arcade session restarted");
    init_state(state.layout, state.time_limit_secs, rng)
}

fn random_speed(layout: &Layout, rng: &mut impl Rng) -> f32 {
    if layout.top_enemy_speed > 0.0 {
        ENEMY_BASE_SPEED + rng.gen_range(0.0..layout.top_enemy_speed)
    } else {
        ENEMY_BASE_SPEED
    }
}

fn random_goal_column(layout: &Layout, rng: &mut impl Rng) -> i32 {
    rng.gen_range(0..layout.columns.max(1))
}

fn generate_pool(layout: &Layout, rng: &mut impl Rng) -> Vec<Collectible> {
    const GEMS: [CollectibleKind; 3] = [
        CollectibleKind::BlueGem,
        CollectibleKind::OrangeGem,
        CollectibleKind::GreenGem,
    ];

    (0..POOL_SIZE)
        .map(|i| {
            let x = rng.gen_range(0..layout.columns.max(1));
            let y = rng.gen_range(layout.lane_rows());
            if i % HEART_EVERY == 0 {
                Collectible {
                    x,
                    y,
                    value: 0,
                    kind: CollectibleKind::Heart,
                }
            } else {
                Collectible {
                    x,
                    y,
                    value: GEM_VALUE,
                    kind: GEMS[rng.gen_range(0..GEMS.len())],
                }
            }
        })
        .collect()
}

/// Draw the next collectible for the board.  Hearts are skipped while the
/// player already has every life.
pub fn pick_collectible(
    pool: &[Collectible],
    lives: u32,
    rng: &mut impl Rng,
) -> Option<Collectible> {
    let eligible: Vec<&Collectible> = pool
        .iter()
        .filter(|c| lives < MAX_LIVES || !c.restores_life())
        .collect();
    eligible.choose(rng).map(|c| (*c).clone())
}

// ── Input-driven transitions (pure) ──────────────────────────────────────────

/// Apply one key press.  `None` stands for an unmapped key and changes
/// nothing.  Position is clamped by the next `update_player`, not here, so
/// bumping into the board edge never counts as stepping on a special cell.
pub fn handle_input(state: &ArcadeState, direction: Option<Direction>) -> ArcadeState {
    let Some(direction) = direction else {
        return state.clone();
    };

    let mut next = state.clone();
    let layout = state.layout;
    let player = &mut next.player;

    if player.has_won || player.is_game_over {
        player.x = layout.start_x;
        player.y = layout.start_y();
        return next;
    }

    match direction {
        Direction::Left => player.x -= player.step,
        Direction::Right => player.x += player.step,
        Direction::Up => player.y -= player.step,
        Direction::Down => player.y += player.step,
    }

    if player.cell() == layout.selector_cell() {
        player.sprite = (player.sprite + 1) % CHARACTER_COUNT;
        player.needs_info = false;
        debug!("character switched to #{}", player.sprite);
    } else if player.cell() == layout.info_cell() {
        player.needs_info = true;
    } else {
        player.needs_info = false;
    }

    next
}

/// Close whichever modal is showing.  Closing a win/game-over summary
/// starts a new game; closing the instructions resumes play.
pub fn dismiss_modal(state: &ArcadeState, rng: &mut impl Rng) -> ArcadeState {
    if state.player.is_game_over || state.player.has_won {
        return restart(state, rng);
    }
    let mut next = state.clone();
    next.player.needs_info = false;
    next.clock.paused = false;
    if next.status == GameStatus::ShowingInfo {
        next.status = GameStatus::Playing;
    }
    next
}

// ── Entity rules ─────────────────────────────────────────────────────────────

/// Move a bug along its lane.  Once it passes the right edge it re-enters
/// from the left with a freshly drawn speed.
pub fn update_enemy(enemy: &Enemy, dt: f32, layout: &Layout, rng: &mut impl Rng) -> Enemy {
    let x = enemy.x + enemy.speed * dt;
    if x > layout.columns as f32 {
        Enemy {
            x: ENEMY_RESPAWN_X,
            speed: random_speed(layout, rng),
            ..enemy.clone()
        }
    } else {
        Enemy { x, ..enemy.clone() }
    }
}

pub fn clamp_player(player: &Player, layout: &Layout) -> Player {
    Player {
        x: player.x.clamp(0, layout.last_column()),
        y: player.y.clamp(layout.water_row(), layout.start_y()),
        ..player.clone()
    }
}

/// Clamp the player onto the board and check whether the star was reached.
pub fn update_player(state: &ArcadeState, rng: &mut impl Rng) -> ArcadeState {
    let mut next = state.clone();
    next.player = clamp_player(&state.player, &state.layout);

    if next.player.cell() == (next.goal.x, next.goal.y) && !next.player.has_won {
        next.player.has_won = true;
        next.player.x = state.layout.start_x;
        next.player.y = state.layout.start_y();
        next.goal.x = random_goal_column(&state.layout, rng);
        info!("goal reached with {} points", next.player.points);
    }
    next
}

pub fn enemy_hits_player(enemy: &Enemy, player: &Player) -> bool {
    let px = player.x as f32;
    enemy.y == player.y && enemy.x > px - HIT_TOLERANCE && enemy.x < px + HIT_TOLERANCE
}

/// On the water row anywhere but under the star.
pub fn in_water(player: &Player, goal: &Goal, layout: &Layout) -> bool {
    player.y == layout.water_row() && player.x != goal.x
}

/// Resolve bug hits and falls into the water.  At most one life is lost per
/// call: the first hit sends the player back to start, off every lane.
pub fn check_collisions(state: &ArcadeState, rng: &mut impl Rng) -> ArcadeState {
    let layout = state.layout;
    let hit = state
        .enemies
        .iter()
        .any(|e| enemy_hits_player(e, &state.player));
    let drowned = !hit && in_water(&state.player, &state.goal, &layout);

    if !hit && !drowned {
        return state.clone();
    }

    let mut next = state.clone();
    next.player.x = layout.start_x;
    next.player.y = layout.start_y();
    if drowned {
        next.goal.x = random_goal_column(&layout, rng);
    }
    next.player.lives = next.player.lives.saturating_sub(1);
    if next.player.lives == 0 {
        next.player.is_game_over = true;
        info!("out of lives with {} points", next.player.points);
    } else {
        debug!(
            "life lost ({}), {} left",
            if drowned { "water" } else { "bug" },
            next.player.lives
        );
    }
    next
}

/// Consume the collectible under the player, if any, and put a new one on
/// the board.
pub fn grab_collectible(state: &ArcadeState, rng: &mut impl Rng) -> ArcadeState {
    if state.active.x != state.player.x || state.active.y != state.player.y {
        return state.clone();
    }

    let mut next = state.clone();
    if state.active.restores_life() {
        if next.player.lives < MAX_LIVES {
            next.player.lives += 1;
        }
    } else {
        next.player.points += state.active.value;
    }
    debug!(
        "picked up {:?}: {} points, {} lives",
        state.active.kind, next.player.points, next.player.lives
    );

    if let Some(replacement) = pick_collectible(&next.pool, next.player.lives, rng) {
        next.active = replacement;
    }
    next
}

// ── Per-frame state machine ──────────────────────────────────────────────────

fn terminal_status(player: &Player) -> Option<GameStatus> {
    if player.is_game_over {
        Some(if player.lives == 0 {
            GameStatus::OutOfLives
        } else {
            GameStatus::OutOfTime
        })
    } else if player.has_won {
        Some(GameStatus::Won)
    } else {
        None
    }
}

/// Advance the session by one rendered frame of `dt` seconds.
///
/// Checked in priority order: game over, won, instructions requested, and
/// only then the regular update (bugs, player, pickup, collisions).
pub fn frame(state: &ArcadeState, dt: f32, rng: &mut impl Rng) -> ArcadeState {
    if let Some(status) = terminal_status(&state.player) {
        let mut next = state.clone();
        next.status = status;
        next.clock.paused = true;
        return next;
    }

    if state.player.needs_info {
        let mut next = state.clone();
        next.status = GameStatus::ShowingInfo;
        next.clock.paused = true;
        return next;
    }

    let mut next = state.clone();
    next.status = GameStatus::Playing;
    next.clock.paused = false;
    next.enemies = state
        .enemies
        .iter()
        .map(|e| update_enemy(e, dt, &state.layout, rng))
        .collect();

    let next = update_player(&next, rng);
    let next = grab_collectible(&next, rng);
    let mut next = check_collisions(&next, rng);

    if let Some(status) = terminal_status(&next.player) {
        next.status = status;
        next.clock.paused = true;
    }
    next
}

/// One second of wall-clock time has passed.
pub fn tick_clock(state: &ArcadeState) -> ArcadeState {
    if state.clock.paused || state.status.is_terminal() || state.player.is_game_over {
        return state.clone();
    }

    let mut next = state.clone();
    next.clock.remaining_secs = next.clock.remaining_secs.saturating_sub(1);
    if next.clock.remaining_secs == 0 {
        next.player.is_game_over = true;
        next.clock.paused = true;
        next.status = GameStatus::OutOfTime;
        info!("time ran out with {} points", next.player.points);
    }
    next
}
