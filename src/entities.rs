/// Arcade game entity types — pure data, no logic.
///
/// Positions are in tile units.  Row 0 is the water row, rows `1..=lanes`
/// are the stone lanes the bugs run along, and the bottom row is where the
/// player starts.

use std::fmt;

/// Lives the player starts with; hearts never restore beyond this.
pub const MAX_LIVES: u32 = 3;

/// Number of selectable player characters.
pub const CHARACTER_COUNT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

// ── Board layout ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardWidth {
    /// 7 columns, fast bugs.
    Wide,
    /// 4 columns, slower bugs.
    Narrow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardHeight {
    /// 4 lanes, 2 grass rows.
    Tall,
    /// 3 lanes, 2 grass rows.
    Medium,
    /// 3 lanes, 1 grass row.
    Short,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub columns: i32,
    pub lanes: i32,
    pub rows: i32,
    pub start_x: i32,
    /// Upper bound (exclusive) of the random part of a bug's speed, tiles/s.
    pub top_enemy_speed: f32,
}

impl Layout {
    pub fn new(width: BoardWidth, height: BoardHeight) -> Self {
        let (columns, start_x, top_enemy_speed) = match width {
            BoardWidth::Wide => (7, 3, 5.0),
            BoardWidth::Narrow => (4, 1, 2.0),
        };
        let (lanes, rows) = match height {
            BoardHeight::Tall => (4, 7),
            BoardHeight::Medium => (3, 6),
            BoardHeight::Short => (3, 5),
        };
        Layout {
            columns,
            lanes,
            rows,
            start_x,
            top_enemy_speed,
        }
    }

    pub fn water_row(&self) -> i32 {
        0
    }

    pub fn start_y(&self) -> i32 {
        self.rows - 1
    }

    pub fn last_column(&self) -> i32 {
        self.columns - 1
    }

    pub fn lane_rows(&self) -> std::ops::RangeInclusive<i32> {
        1..=self.lanes
    }

    /// Stepping on this cell cycles the player's character.
    pub fn selector_cell(&self) -> (i32, i32) {
        (0, self.start_y())
    }

    /// Stepping on this cell opens the instructions.
    pub fn info_cell(&self) -> (i32, i32) {
        (self.last_column(), self.start_y())
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    /// Tiles moved per key press.
    pub step: i32,
    pub lives: u32,
    pub points: u32,
    /// Index into the character list, `0..CHARACTER_COUNT`.
    pub sprite: usize,
    pub has_won: bool,
    pub needs_info: bool,
    pub is_game_over: bool,
}

impl Player {
    pub fn at_start(layout: &Layout) -> Self {
        Player {
            x: layout.start_x,
            y: layout.start_y(),
            step: 1,
            lives: MAX_LIVES,
            points: 0,
            sprite: 0,
            has_won: false,
            needs_info: false,
            is_game_over: false,
        }
    }

    pub fn cell(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

// ── Bugs ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    /// Continuous horizontal position, fractional tiles.
    pub x: f32,
    /// Lane row, fixed for the enemy's lifetime.
    pub y: i32,
    /// Tiles per second.
    pub speed: f32,
}

// ── Gems, hearts and the star ────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectibleKind {
    BlueGem,
    OrangeGem,
    GreenGem,
    /// Worth no points; restores one life.
    Heart,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Collectible {
    pub x: i32,
    pub y: i32,
    pub value: u32,
    pub kind: CollectibleKind,
}

impl Collectible {
    pub fn restores_life(&self) -> bool {
        self.value == 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Goal {
    pub x: i32,
    pub y: i32,
}

// ── Countdown ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Countdown {
    pub remaining_secs: u32,
    pub paused: bool,
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Instructions on screen; clock paused, bugs frozen.
    ShowingInfo,
    Won,
    OutOfLives,
    OutOfTime,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::Won | GameStatus::OutOfLives | GameStatus::OutOfTime
        )
    }
}

/// One arcade session.  Cloneable so pure update functions can return a new
/// copy without mutating the original.
#[derive(Clone, Debug)]
pub struct ArcadeState {
    pub layout: Layout,
    pub player: Player,
    /// One bug per lane.
    pub enemies: Vec<Enemy>,
    /// Every collectible that can appear during this session.
    pub pool: Vec<Collectible>,
    /// The single collectible currently on the board.
    pub active: Collectible,
    pub goal: Goal,
    pub clock: Countdown,
    pub status: GameStatus,
    /// Countdown length used on restart.
    pub time_limit_secs: u32,
}
