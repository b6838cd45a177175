//! Core client logic module - pure, deterministic, and testable
//!
//! This module contains everything the client does with broker data that
//! does not involve a process or a terminal. It has **no I/O**, making it:
//!
//! - **Deterministic**: Same seed produces identical autoplay sequences
//! - **Testable**: Framing and routing are plain functions over bytes and strings
//! - **Portable**: Usable by the subprocess bridge, tests and benches alike
//!
//! # Module Structure
//!
//! - [`framer`]: reassembles subscriber output chunks into complete lines
//! - [`router`]: classifies `(topic, payload)` events and reduces them into the board
//! - [`board`]: 3x3 mirrored board state and its shared, lock-guarded handle
//! - [`rng`]: shuffled 9-cell move pool for autoplay
//!
//! # Example
//!
//! ```
//! use tictactoe_mqtt_core::{apply, BoardState, LineFramer, RouteOutcome};
//! use tictactoe_mqtt_core::framer::split_event;
//! use tictactoe_mqtt_types::Mark;
//!
//! let mut framer = LineFramer::new();
//! let mut board = BoardState::new();
//!
//! // A line can arrive in pieces.
//! assert!(framer.feed(b"TTT/pla").is_empty());
//! for line in framer.feed(b"yer O\n") {
//!     let (topic, payload) = split_event(&line).unwrap();
//!     assert_eq!(apply(&mut board, "TTT", topic, payload), RouteOutcome::BoardChanged);
//! }
//!
//! assert_eq!(board.current_player(), Mark::O);
//! ```

pub mod board;
pub mod framer;
pub mod rng;
pub mod router;

pub use tictactoe_mqtt_types as types;

// Re-export commonly used types for convenience
pub use board::{BoardState, SharedBoard};
pub use framer::LineFramer;
pub use rng::{MovePool, SimpleRng};
pub use router::{apply, classify, Notice, Route, RouteOutcome};
