//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the client.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (board reduction, rendering, command parsing, publishing).
//!
//! # Board Dimensions
//!
//! - **Rows / columns**: 3 x 3
//! - **Cells**: 9, stored row-major (`row * 3 + col`)
//! - **User coordinates**: 1-indexed, `"row,col"` (e.g. `"1,3"`)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `POLL_INTERVAL_MS` | 100 | Bounded wait per subscriber read |
//! | `PUBLISH_TIMEOUT_MS` | 1000 | Grace period for a publisher process |
//! | `SETTLE_DELAY_MS` | 100 | Pause after every publish |
//! | `RESET_PAUSE_MS` | 500 | Pause after sending a reset |
//! | `INVALID_INPUT_PAUSE_MS` | 1000 | Pause after rejected input |
//! | `AUTOPLAY_INTERVAL_MS` | 1500 | Time between autoplay moves |
//!
//! # Examples
//!
//! ```
//! use tictactoe_mqtt_types::{Mark, Move, BOARD_CELLS};
//!
//! assert_eq!(Mark::from_char('o'), Some(Mark::O));
//!
//! let mv = Move::new(2, 3).unwrap();
//! assert_eq!(mv.to_string(), "2,3");
//! assert_eq!(mv.index(), 5);
//!
//! assert_eq!(BOARD_CELLS, 9);
//! ```

use std::fmt;

/// Board side length (3 rows, 3 columns)
pub const BOARD_SIDE: usize = 3;

/// Total number of cells on the board
pub const BOARD_CELLS: usize = BOARD_SIDE * BOARD_SIDE;

/// Default topic root shared by every client of one game
pub const DEFAULT_TOPIC_ROOT: &str = "TTT";

/// Default broker host handed to the pub/sub tools
pub const DEFAULT_HOST: &str = "localhost";

/// Default subscriber executable
pub const DEFAULT_SUBSCRIBER: &str = "mosquitto_sub";

/// Default publisher executable
pub const DEFAULT_PUBLISHER: &str = "mosquitto_pub";

/// Outbound payload asking the game server to reset the board
pub const RESET_COMMAND: &str = "r";

/// Bounded wait for each read of the subscriber stream
pub const POLL_INTERVAL_MS: u64 = 100;

/// How long a publish waits for its process before moving on
pub const PUBLISH_TIMEOUT_MS: u64 = 1000;

/// Pause after every publish so the broker round-trip can land
pub const SETTLE_DELAY_MS: u64 = 100;

/// Pause after sending a reset
pub const RESET_PAUSE_MS: u64 = 500;

/// Pause after an invalid command so the diagnostic stays readable
pub const INVALID_INPUT_PAUSE_MS: u64 = 1000;

/// Delay between autoplay moves (one second per move plus half a second of pacing)
pub const AUTOPLAY_INTERVAL_MS: u64 = 1500;

/// Largest partial line retained between subscriber reads (64 KiB)
pub const MAX_FRAGMENT_BYTES: usize = 64 * 1024;

/// A player mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Parse a mark from a character (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tictactoe_mqtt_types::Mark;
    ///
    /// assert_eq!(Mark::from_char('X'), Some(Mark::X));
    /// assert_eq!(Mark::from_char('o'), Some(Mark::O));
    /// assert_eq!(Mark::from_char(' '), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'X' | 'x' => Some(Mark::X),
            'O' | 'o' => Some(Mark::O),
            _ => None,
        }
    }

    /// Uppercase character used on the wire and on screen
    pub fn as_char(&self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl Default for Mark {
    fn default() -> Self {
        Mark::X
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Mark)`: Cell taken by the specified player
pub type Cell = Option<Mark>;

/// Character for a cell as the `board` topic encodes it
pub fn cell_char(cell: Cell) -> char {
    cell.map(|m| m.as_char()).unwrap_or(' ')
}

/// A board coordinate as typed by the user and published to the broker
///
/// Rows and columns are 1-indexed and always within `1..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    row: u8,
    col: u8,
}

impl Move {
    /// Create a move, returning `None` when either coordinate is outside `1..=3`
    pub fn new(row: u8, col: u8) -> Option<Self> {
        let side = BOARD_SIDE as u8;
        if (1..=side).contains(&row) && (1..=side).contains(&col) {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Move for a row-major cell index (0..9)
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= BOARD_CELLS {
            return None;
        }
        Some(Self {
            row: (index / BOARD_SIDE) as u8 + 1,
            col: (index % BOARD_SIDE) as u8 + 1,
        })
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// Row-major cell index (0..9)
    pub fn index(&self) -> usize {
        (self.row as usize - 1) * BOARD_SIDE + (self.col as usize - 1)
    }

    /// All nine moves in row-major order
    pub fn all() -> [Move; BOARD_CELLS] {
        let mut out = [Move { row: 1, col: 1 }; BOARD_CELLS];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = Move {
                row: (i / BOARD_SIDE) as u8 + 1,
                col: (i % BOARD_SIDE) as u8 + 1,
            };
        }
        out
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Commands the interactive loop understands
///
/// Produced from raw console lines by the input crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Publish a move
    Move(Move),
    /// Publish the reset command
    Reset,
    /// Turn autoplay on or off
    ToggleAutoplay,
    /// Leave the game
    Quit,
    /// Parsed as `row,col` but a coordinate is outside 1..=3
    OutOfRange { row: i64, col: i64 },
    /// Anything else
    Invalid(String),
}
