//! Shared types module - constants, piece kinds and input events
//!
//! Everything in here is plain data with no behaviour beyond parsing and
//! formatting, so the core engine, the controller and any presentation shell
//! can agree on the same vocabulary.
//!
//! # Board Dimensions
//!
//! The default playfield is 25 rows by 10 columns:
//!
//! - **Rows**: 25 (indexed 0-24, row 0 is the top)
//! - **Columns**: 10 (indexed 0-9)
//! - **Danger zone**: rows 0 and 1, hidden, only used for game-over detection
//! - **Spawn position**: (x = 4, y = 0)
//!
//! # Cell Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | empty |
//! | 1-7 | one of the seven piece colours (see [`PieceKind::code`]) |
//! | other | filled, unknown colour |
//!
//! # Scoring
//!
//! | Lines | Base bonus (multiplied by level) |
//! |-------|------|
//! | 1 | 100 |
//! | 2 | 300 |
//! | 3 | 500 |
//! | 4 | 800 |
//!
//! Soft drop awards 1 point per user-initiated step, hard drop 2 points per row.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{EventSource, EventType, InputEvent, PieceKind, BOARD_COLS, BOARD_ROWS};
//!
//! assert_eq!(PieceKind::T.code(), 6);
//! assert_eq!(PieceKind::from_code(6), Some(PieceKind::T));
//!
//! let event = InputEvent::user(EventType::HardDrop);
//! assert_eq!(event.source, EventSource::User);
//! assert_eq!(InputEvent::tick().source, EventSource::Timer);
//!
//! assert_eq!(BOARD_ROWS, 25);
//! assert_eq!(BOARD_COLS, 10);
//! ```

/// Default board height in rows (25, including the two hidden rows)
pub const BOARD_ROWS: usize = 25;

/// Default board width in columns (10)
pub const BOARD_COLS: usize = 10;

/// Column of a freshly spawned piece's bounding box
pub const SPAWN_X: i32 = 4;

/// Row of a freshly spawned piece's bounding box
pub const SPAWN_Y: i32 = 0;

/// Number of hidden rows at the top that end the game once occupied
pub const DANGER_ZONE_ROWS: usize = 2;

/// Code of an empty cell
pub const EMPTY_CELL: u8 = 0;

/// Level a new game starts at
pub const INITIAL_LEVEL: u32 = 1;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: i32 = 10;

/// Line clear bonus by number of rows removed at once (multiplied by level)
pub const LINE_CLEAR_SCORES: [i64; 5] = [0, 100, 300, 500, 800];

/// Points for each user-initiated soft drop step
pub const SOFT_DROP_POINTS: i64 = 1;

/// Points for each row travelled during a hard drop
pub const HARD_DROP_POINTS_PER_ROW: i64 = 2;

/// Upper bound on rotation states a piece may define
pub const MAX_ROTATIONS: usize = 4;

/// Side of the square box the standard pieces are authored in
pub const PIECE_BOX: usize = 4;

/// Fall interval at level 1 (milliseconds per row)
pub const INITIAL_FALL_MS: u64 = 400;

/// Fall interval shaved off per level gained
pub const FALL_STEP_MS: u64 = 50;

/// Fastest fall interval
pub const MIN_FALL_MS: u64 = 100;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All seven kinds in generator pool order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Cell code written into the grid for this kind
    pub fn code(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Map a cell code back to its kind (None for empty or unknown codes)
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// Discrete input the controller understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventType {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    HardDrop,
    Tick,
    NewGame,
}

/// Who produced an event; soft drop points are only awarded to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventSource {
    User,
    Timer,
}

/// An input event tagged with its source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputEvent {
    pub kind: EventType,
    pub source: EventSource,
}

impl InputEvent {
    pub fn new(kind: EventType, source: EventSource) -> Self {
        Self { kind, source }
    }

    /// Event produced by the player
    pub fn user(kind: EventType) -> Self {
        Self::new(kind, EventSource::User)
    }

    /// Automatic gravity step produced by the fall timer
    pub fn tick() -> Self {
        Self::new(EventType::Tick, EventSource::Timer)
    }
}
