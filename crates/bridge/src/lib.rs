//! Bridge module - broker access through pub/sub command-line tools
//!
//! The client never speaks MQTT itself. It runs an external subscriber
//! (`mosquitto_sub` by default) for as long as the game is open, and an
//! external publisher (`mosquitto_pub`) once per outbound message.
//!
//! # Data Flow
//!
//! ```text
//! publisher process -> broker -> subscriber process stdout
//!     -> LineFramer -> (topic, payload) -> router -> SharedBoard -> BridgeEvents
//! ```
//!
//! # Process Conventions
//!
//! - **Subscriber**: `<sub> -h <host> [-p <port>] -t <root>/# -v`, one
//!   `<topic> <payload>` line per message
//! - **Publisher**: `<pub> -h <host> [-p <port>] -t <root> -m <message>`, exit
//!   status 0 on success
//!
//! # Environment Variables
//!
//! - `TTT_MQTT_HOST`: Broker host (default: "localhost")
//! - `TTT_MQTT_PORT`: Broker port (default: tool default)
//! - `TTT_TOPIC`: Topic root (default: "TTT")
//! - `TTT_MQTT_SUB` / `TTT_MQTT_PUB`: Executables to run
//! - `TTT_POLL_MS`, `TTT_PUBLISH_TIMEOUT_MS`, `TTT_MAX_FRAGMENT_BYTES`: Tuning
//!
//! # Implementation
//!
//! - [`Bridge`] owns a small **tokio** runtime; callers stay synchronous
//! - [`supervisor`] runs the subscriber and its single reader task
//! - [`publisher`] runs one bounded-wait publisher process per message
//!
//! # Testing
//!
//! Point the bridge at a local mosquitto broker:
//!
//! ```bash
//! mosquitto -p 1883 &
//! TTT_MQTT_HOST=127.0.0.1 cargo run
//! mosquitto_pub -h 127.0.0.1 -t TTT/board -m 'XO  X   O'
//! ```

pub mod config;
pub mod publisher;
pub mod runtime;
pub mod supervisor;

pub use tictactoe_mqtt_core as core;
pub use tictactoe_mqtt_types as types;

pub use config::BridgeConfig;
pub use publisher::{
    publisher_args, CommandPublisher, PublishOutcome, Publisher, RecordingPublisher,
};
pub use runtime::Bridge;
pub use supervisor::{subscriber_args, BridgeEvents, NoopEvents, Supervisor};
