//! Terminal tic-tac-toe client (default binary).
//!
//! Mirrors a shared board published under an MQTT topic root and sends
//! moves to it, using `mosquitto_sub` / `mosquitto_pub` as the transport.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use tictactoe_mqtt::app::{App, AppConfig, Screen, TerminalEvents};
use tictactoe_mqtt::bridge::config::normalize_root;
use tictactoe_mqtt::bridge::{Bridge, BridgeConfig};
use tictactoe_mqtt::input::Console;
use tictactoe_mqtt::term::{TerminalRenderer, Tone};

/// Command-line flags; each overrides the matching `TTT_*` environment variable.
#[derive(Debug, Parser)]
#[command(name = "tictactoe-mqtt", version, about)]
struct Cli {
    /// Broker host
    #[arg(long)]
    host: Option<String>,

    /// Broker port
    #[arg(long)]
    port: Option<u16>,

    /// Topic root shared by all players
    #[arg(long)]
    topic: Option<String>,

    /// Subscriber executable
    #[arg(long = "sub")]
    subscriber: Option<String>,

    /// Publisher executable
    #[arg(long = "pub")]
    publisher: Option<String>,

    /// Start with autoplay enabled
    #[arg(long)]
    autoplay: bool,
}

impl Cli {
    fn bridge_config(&self) -> BridgeConfig {
        let mut config = BridgeConfig::from_env();
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = Some(port);
        }
        if let Some(topic) = &self.topic {
            config.topic_root = normalize_root(topic);
        }
        if let Some(program) = &self.subscriber {
            config.subscriber_program = program.clone();
        }
        if let Some(program) = &self.publisher {
            config.publisher_program = program.clone();
        }
        config
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = cli.bridge_config();
    log::info!("using {:?}", config);

    let renderer = Arc::new(TerminalRenderer::new());
    let events = Arc::new(TerminalEvents::new(Arc::clone(&renderer)));
    let bridge = Bridge::new(config, events)?;

    let console = Console::stdin();
    let interrupter = console.interrupter();
    ctrlc::set_handler(move || interrupter.interrupt())
        .context("failed to install signal handler")?;

    let result = run(&bridge, renderer.as_ref(), &console, cli.autoplay);

    // Always stop the subscriber, whatever ended the loop.
    bridge.stop_listener();
    Screen::say(renderer.as_ref(), Tone::Plain, "MQTT listener stopped");
    Screen::say(renderer.as_ref(), Tone::Plain, "Thanks for playing!");
    result
}

fn run(
    bridge: &Bridge,
    renderer: &TerminalRenderer,
    console: &Console,
    autoplay: bool,
) -> Result<()> {
    match bridge.start_listener() {
        Ok(()) => Screen::say(renderer, Tone::Plain, "MQTT subscriber started"),
        Err(e) => Screen::say(
            renderer,
            Tone::Error,
            &format!("Could not start MQTT subscriber: {:#}", e),
        ),
    }

    let app_config = AppConfig {
        autoplay,
        ..AppConfig::default()
    };
    App::new(bridge, renderer, bridge.board().clone(), app_config).run(console)
}
