//! Terminal rendering module.
//!
//! A small line-oriented renderer for the mirrored board. Encoding into
//! bytes ([`board_view`]) is kept apart from writing to the terminal
//! ([`renderer`]) so the layout can be tested without a TTY.
//!
//! Colours follow the classic client: yellow banner, green current player,
//! red marks, green wins, blue draws and moves, yellow resets.

pub mod board_view;
pub mod renderer;

pub use tictactoe_mqtt_core as core;
pub use tictactoe_mqtt_types as types;

pub use board_view::{
    encode_board_into, encode_message_into, encode_notice_into, notice_line, Tone,
};
pub use renderer::TerminalRenderer;
