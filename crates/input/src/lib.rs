//! Console input module.
//!
//! This module is independent of any terminal library. It maps raw console
//! lines into [`crate::types::Command`] values and provides a background
//! line reader that the game loop can poll with a timeout.

pub mod console;
pub mod map;

pub use tictactoe_mqtt_types as types;

pub use console::{Console, ConsoleInput, Interrupter};
pub use map::parse_command;
