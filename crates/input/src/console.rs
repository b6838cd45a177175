//! Console line reader.
//!
//! Reads lines on a background thread and hands them to the game loop over
//! a channel, so the loop can wait for input with a timeout (autoplay keeps
//! ticking while still honouring `a` and `q`). Interrupts from a signal
//! handler arrive on the same channel.

use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

/// One item of console input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// A line, without its newline
    Line(String),
    /// Input closed (Ctrl+D or end of piped input)
    Eof,
    /// Termination requested by a signal handler
    Interrupted,
}

/// Cloneable handle that injects [`ConsoleInput::Interrupted`]
#[derive(Debug, Clone)]
pub struct Interrupter {
    tx: Sender<ConsoleInput>,
}

impl Interrupter {
    pub fn interrupt(&self) {
        let _ = self.tx.send(ConsoleInput::Interrupted);
    }
}

/// Receiving end of the console reader
#[derive(Debug)]
pub struct Console {
    rx: Receiver<ConsoleInput>,
    tx: Sender<ConsoleInput>,
}

impl Console {
    /// Read lines from stdin
    pub fn stdin() -> Self {
        let (tx, rx) = mpsc::channel();
        let reader_tx = tx.clone();
        let spawned = thread::Builder::new()
            .name("ttt-console".to_string())
            .spawn(move || {
                let stdin = io::stdin();
                pump(stdin.lock(), &reader_tx);
            });
        if let Err(e) = spawned {
            log::error!("failed to start console reader: {}", e);
            let _ = tx.send(ConsoleInput::Eof);
        }
        Self { rx, tx }
    }

    /// Read lines from any buffered reader (used by tests)
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let reader_tx = tx.clone();
        thread::spawn(move || pump(reader, &reader_tx));
        Self { rx, tx }
    }

    pub fn interrupter(&self) -> Interrupter {
        Interrupter {
            tx: self.tx.clone(),
        }
    }

    /// Block until the next input
    pub fn recv(&self) -> ConsoleInput {
        self.rx.recv().unwrap_or(ConsoleInput::Eof)
    }

    /// Wait up to `timeout` for the next input; `None` if nothing arrived
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ConsoleInput> {
        match self.rx.recv_timeout(timeout) {
            Ok(input) => Some(input),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(ConsoleInput::Eof),
        }
    }
}

fn pump<R: BufRead>(mut reader: R, tx: &Sender<ConsoleInput>) {
    let mut buf = Vec::with_capacity(128);
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                // Undecodable bytes become U+FFFD and reach the parser as invalid input.
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(|c| c == '\n' || c == '\r');
                if tx.send(ConsoleInput::Line(line.to_string())).is_err() {
                    return;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                log::warn!("console read failed: {}", e);
                break;
            }
        }
    }
    let _ = tx.send(ConsoleInput::Eof);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_lines_then_eof() {
        let console = Console::from_reader(Cursor::new("1,1\nq\n"));
        assert_eq!(console.recv(), ConsoleInput::Line("1,1".to_string()));
        assert_eq!(console.recv(), ConsoleInput::Line("q".to_string()));
        assert_eq!(console.recv(), ConsoleInput::Eof);
    }

    #[test]
    fn test_undecodable_line_does_not_end_input() {
        let console = Console::from_reader(Cursor::new(b"\xff\n1,1\nq\n".to_vec()));
        assert_eq!(console.recv(), ConsoleInput::Line("\u{fffd}".to_string()));
        assert_eq!(console.recv(), ConsoleInput::Line("1,1".to_string()));
        assert_eq!(console.recv(), ConsoleInput::Line("q".to_string()));
        assert_eq!(console.recv(), ConsoleInput::Eof);
    }

    #[test]
    fn test_crlf_and_unterminated_last_line() {
        let console = Console::from_reader(Cursor::new("2,2\r\nr"));
        assert_eq!(console.recv(), ConsoleInput::Line("2,2".to_string()));
        assert_eq!(console.recv(), ConsoleInput::Line("r".to_string()));
        assert_eq!(console.recv(), ConsoleInput::Eof);
    }

    #[test]
    fn test_interrupter_reaches_loop() {
        let console = Console::from_reader(Cursor::new(""));
        assert_eq!(console.recv(), ConsoleInput::Eof);

        console.interrupter().interrupt();
        assert_eq!(
            console.recv_timeout(Duration::from_secs(1)),
            Some(ConsoleInput::Interrupted)
        );
    }

    #[test]
    fn test_recv_timeout_without_input() {
        let (tx, rx) = mpsc::channel();
        let console = Console { rx, tx };
        assert_eq!(console.recv_timeout(Duration::from_millis(20)), None);
    }
}
