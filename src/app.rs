//! Foreground game loop.
//!
//! Draws the mirrored board, then either plays the next autoplay move or
//! waits for a console command, and turns commands into publishes. The loop
//! never touches the subscriber; board updates arrive through the bridge and
//! are drawn by [`TerminalEvents`].

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;

use crate::bridge::{BridgeEvents, Publisher};
use crate::core::{BoardState, MovePool, Notice, SharedBoard};
use crate::input::{parse_command, Console, ConsoleInput};
use crate::term::{TerminalRenderer, Tone};
use crate::types::{
    Command, AUTOPLAY_INTERVAL_MS, INVALID_INPUT_PAUSE_MS, RESET_COMMAND, RESET_PAUSE_MS,
};

/// Where the loop draws. Implemented by the terminal renderer and by test recorders.
pub trait Screen {
    fn draw(&self, board: &BoardState);
    fn say(&self, tone: Tone, text: &str);
    fn prompt(&self);
}

impl Screen for TerminalRenderer {
    fn draw(&self, board: &BoardState) {
        if let Err(e) = self.draw_board(board) {
            log::debug!("draw failed: {}", e);
        }
    }

    fn say(&self, tone: Tone, text: &str) {
        if let Err(e) = TerminalRenderer::say(self, tone, text) {
            log::debug!("write failed: {}", e);
        }
    }

    fn prompt(&self) {
        if let Err(e) = TerminalRenderer::prompt(self) {
            log::debug!("write failed: {}", e);
        }
    }
}

/// Draws what the subscriber reader applies
pub struct TerminalEvents {
    renderer: Arc<TerminalRenderer>,
}

impl TerminalEvents {
    pub fn new(renderer: Arc<TerminalRenderer>) -> Self {
        Self { renderer }
    }
}

impl BridgeEvents for TerminalEvents {
    fn board_changed(&self, board: &BoardState) {
        Screen::draw(self.renderer.as_ref(), board);
    }

    fn notice(&self, notice: &Notice) {
        if let Err(e) = self.renderer.announce(notice) {
            log::debug!("write failed: {}", e);
        }
    }

    fn stream_ended(&self) {
        Screen::say(
            self.renderer.as_ref(),
            Tone::Warning,
            "MQTT subscriber exited; board updates have stopped",
        );
    }
}

/// Pacing of the foreground loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub autoplay_interval: Duration,
    pub reset_pause: Duration,
    pub invalid_pause: Duration,
    /// Start with autoplay already on
    pub autoplay: bool,
    /// Fixed autoplay seed; `None` seeds from the clock on every activation
    pub autoplay_seed: Option<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            autoplay_interval: Duration::from_millis(AUTOPLAY_INTERVAL_MS),
            reset_pause: Duration::from_millis(RESET_PAUSE_MS),
            invalid_pause: Duration::from_millis(INVALID_INPUT_PAUSE_MS),
            autoplay: false,
            autoplay_seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// The interactive loop
pub struct App<'a, P: Publisher + ?Sized, S: Screen + ?Sized> {
    publisher: &'a P,
    screen: &'a S,
    board: SharedBoard,
    config: AppConfig,
    autoplay: Option<MovePool>,
}

impl<'a, P: Publisher + ?Sized, S: Screen + ?Sized> App<'a, P, S> {
    pub fn new(publisher: &'a P, screen: &'a S, board: SharedBoard, config: AppConfig) -> Self {
        let mut app = Self {
            publisher,
            screen,
            board,
            config,
            autoplay: None,
        };
        if app.config.autoplay {
            app.toggle_autoplay();
        }
        app
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_some()
    }

    /// Run until quit, end of input or interrupt.
    pub fn run(&mut self, console: &Console) -> Result<()> {
        loop {
            self.screen.draw(&self.board.snapshot());

            let input = if self.autoplay.is_some() {
                self.autoplay_step();
                match console.recv_timeout(self.config.autoplay_interval) {
                    Some(input) => input,
                    None => continue,
                }
            } else {
                self.screen.prompt();
                console.recv()
            };

            if self.handle_input(input) == Flow::Quit {
                return Ok(());
            }
        }
    }

    fn handle_input(&mut self, input: ConsoleInput) -> Flow {
        match input {
            ConsoleInput::Line(line) => self.handle_command(parse_command(&line)),
            ConsoleInput::Eof => Flow::Quit,
            ConsoleInput::Interrupted => {
                self.screen.say(Tone::Plain, "\nReceived interrupt. Exiting...");
                Flow::Quit
            }
        }
    }

    fn handle_command(&mut self, command: Command) -> Flow {
        match command {
            Command::Quit => return Flow::Quit,
            Command::Move(mv) => {
                self.send(&mv.to_string());
            }
            Command::Reset => {
                self.send(RESET_COMMAND);
                self.screen.say(Tone::Plain, "Game reset command sent");
                thread::sleep(self.config.reset_pause);
            }
            Command::ToggleAutoplay => self.toggle_autoplay(),
            Command::OutOfRange { .. } => {
                self.screen.say(
                    Tone::Error,
                    "Invalid move! Row and column must be between 1 and 3.",
                );
                thread::sleep(self.config.invalid_pause);
            }
            Command::Invalid(_) => {
                self.screen.say(
                    Tone::Error,
                    "Invalid input! Enter 'row,col', 'r' to reset, 'a' to toggle autoplay, or 'q' to quit.",
                );
                thread::sleep(self.config.invalid_pause);
            }
        }
        Flow::Continue
    }

    fn toggle_autoplay(&mut self) {
        if self.autoplay.take().is_some() {
            self.screen.say(Tone::Plain, "Autoplay disabled");
            return;
        }

        let pool = match self.config.autoplay_seed {
            Some(seed) => MovePool::new(seed),
            None => MovePool::from_time(),
        };
        self.autoplay = Some(pool);
        self.screen.say(Tone::Plain, "Autoplay enabled");
    }

    fn autoplay_step(&mut self) {
        let Some(pool) = self.autoplay.as_mut() else {
            return;
        };
        if pool.is_exhausted() {
            self.screen
                .say(Tone::Plain, "All positions played. Restarting board...");
        }
        let mv = pool.next_move().to_string();

        // Announced whether or not the publish succeeded.
        self.send(&mv);
        self.screen
            .say(Tone::Plain, &format!("Random move sent: {}", mv));
    }

    /// Publish one message, reporting failure on screen.
    fn send(&self, message: &str) {
        self.screen.say(Tone::Plain, &format!("Sending: {}", message));
        let outcome = self.publisher.publish(message);
        if !outcome.is_success() {
            self.screen
                .say(Tone::Error, &format!("Failed to send {}: {}", message, outcome));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{PublishOutcome, RecordingPublisher};
    use std::io::Cursor;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingScreen {
        lines: Mutex<Vec<String>>,
        draws: Mutex<usize>,
    }

    impl Screen for RecordingScreen {
        fn draw(&self, _board: &BoardState) {
            *self.draws.lock().unwrap() += 1;
        }
        fn say(&self, _tone: Tone, text: &str) {
            self.lines.lock().unwrap().push(text.to_string());
        }
        fn prompt(&self) {}
    }

    fn quick() -> AppConfig {
        AppConfig {
            autoplay_interval: Duration::from_millis(1),
            reset_pause: Duration::ZERO,
            invalid_pause: Duration::ZERO,
            autoplay: false,
            autoplay_seed: Some(7),
        }
    }

    #[test]
    fn toggle_autoplay_twice_turns_it_off() {
        let publisher = RecordingPublisher::new();
        let screen = RecordingScreen::default();
        let mut app = App::new(&publisher, &screen, SharedBoard::new(), quick());

        assert_eq!(app.handle_command(Command::ToggleAutoplay), Flow::Continue);
        assert!(app.is_autoplaying());
        app.handle_command(Command::ToggleAutoplay);
        assert!(!app.is_autoplaying());
        assert!(publisher.sent().is_empty());
    }

    #[test]
    fn failed_publish_is_reported_and_loop_continues() {
        let publisher = RecordingPublisher::failing_with(PublishOutcome::Failed { code: Some(5) });
        let screen = RecordingScreen::default();
        let console = Console::from_reader(Cursor::new("2,3\nq\n"));

        App::new(&publisher, &screen, SharedBoard::new(), quick())
            .run(&console)
            .unwrap();

        assert_eq!(publisher.sent(), vec!["2,3"]);
        let lines = screen.lines.lock().unwrap();
        assert!(lines
            .iter()
            .any(|l| l == "Failed to send 2,3: publisher exited with status 5"));
    }

    #[test]
    fn autoplay_announces_move_even_when_publish_fails() {
        let publisher = RecordingPublisher::failing_with(PublishOutcome::TimedOut);
        let screen = RecordingScreen::default();
        let mut app = App::new(&publisher, &screen, SharedBoard::new(), quick());

        app.toggle_autoplay();
        app.autoplay_step();

        let sent = publisher.sent();
        assert_eq!(sent.len(), 1);
        let lines = screen.lines.lock().unwrap();
        let failed = format!("Failed to send {}: publisher still running after timeout", sent[0]);
        let announced = format!("Random move sent: {}", sent[0]);
        let failed_at = lines.iter().position(|l| *l == failed).unwrap();
        let announced_at = lines.iter().position(|l| *l == announced).unwrap();
        assert!(failed_at < announced_at);
    }
}
