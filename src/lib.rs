//! Tic-tac-toe over MQTT (workspace facade crate).
//!
//! This package re-exports the workspace crates under stable short names
//! (`tictactoe_mqtt::{types,core,bridge,input,term}`) and holds the
//! foreground game loop in [`app`].

pub mod app;

pub use tictactoe_mqtt_bridge as bridge;
pub use tictactoe_mqtt_core as core;
pub use tictactoe_mqtt_input as input;
pub use tictactoe_mqtt_term as term;
pub use tictactoe_mqtt_types as types;
