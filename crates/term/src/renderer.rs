//! TerminalRenderer: flushes encoded board frames and messages to stdout.
//!
//! Both the subscriber reader task and the foreground loop draw, so writes
//! go through one lock and each frame or line is written in a single flush.

use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::Result;

use crate::board_view::{encode_board_into, encode_message_into, encode_notice_into, Tone};
use crate::core::{BoardState, Notice};

pub struct TerminalRenderer {
    buf: Mutex<Vec<u8>>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            buf: Mutex::new(Vec::with_capacity(4 * 1024)),
        }
    }

    /// Clear the screen and draw the board.
    pub fn draw_board(&self, board: &BoardState) -> Result<()> {
        self.emit(|out| encode_board_into(board, out))
    }

    /// Print an announcement from the broker.
    pub fn announce(&self, notice: &Notice) -> Result<()> {
        self.emit(|out| encode_notice_into(notice, out))
    }

    /// Print one message line.
    pub fn say(&self, tone: Tone, text: &str) -> Result<()> {
        self.emit(|out| encode_message_into(tone, text, out))
    }

    /// Print the input prompt without a newline.
    pub fn prompt(&self) -> Result<()> {
        self.emit(|out| {
            out.extend_from_slice(b"> ");
            Ok(())
        })
    }

    fn emit(&self, encode: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> Result<()> {
        let mut buf = self.buf.lock().unwrap_or_else(|e| e.into_inner());
        buf.clear();
        encode(&mut buf)?;

        let mut stdout = io::stdout().lock();
        stdout.write_all(&buf)?;
        stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}
