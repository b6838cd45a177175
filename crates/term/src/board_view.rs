//! BoardView: encodes the mirrored board and announcements as terminal bytes.
//!
//! This module is pure (no I/O). Everything is queued into a `Vec<u8>` so it
//! can be unit-tested without a terminal.

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::core::{BoardState, Notice};
use crate::types::{cell_char, BOARD_SIDE};

const BANNER_RULE: &str = "===========================";
const BANNER_TITLE: &str = "Tic-Tac-Toe Game Board";

/// Colour of a one-line message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Success,
    Info,
    Warning,
    Error,
}

impl Tone {
    fn color(&self) -> Option<Color> {
        match self {
            Tone::Plain => None,
            Tone::Success => Some(Color::DarkGreen),
            Tone::Info => Some(Color::DarkBlue),
            Tone::Warning => Some(Color::DarkYellow),
            Tone::Error => Some(Color::DarkRed),
        }
    }
}

/// Encode a full-screen board redraw into `out`.
pub fn encode_board_into(board: &BoardState, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    out.queue(SetForegroundColor(Color::DarkYellow))?;
    out.queue(Print(format!(
        "{rule}\n{title}\n{rule}\n\n",
        rule = BANNER_RULE,
        title = BANNER_TITLE
    )))?;
    out.queue(ResetColor)?;

    out.queue(Print("Current Player: "))?;
    out.queue(SetForegroundColor(Color::DarkGreen))?;
    out.queue(Print(format!("{}\n\n", board.current_player())))?;
    out.queue(ResetColor)?;

    out.queue(Print("    1   2   3\n"))?;
    out.queue(Print("  +-----------+\n"))?;

    for (i, row) in board.rows().enumerate() {
        out.queue(Print(format!("{} | ", i + 1)))?;
        for (j, &cell) in row.iter().enumerate() {
            out.queue(SetForegroundColor(Color::DarkRed))?;
            out.queue(Print(cell_char(cell)))?;
            out.queue(ResetColor)?;
            if j + 1 < BOARD_SIDE {
                out.queue(Print(" | "))?;
            }
        }
        out.queue(Print(" |\n"))?;
        if i + 1 < BOARD_SIDE {
            out.queue(Print("  |-----------|\n"))?;
        }
    }

    out.queue(Print("  +-----------+\n\n"))?;
    out.queue(Print("Enter move as 'row,col' (e.g. '1,3')\n"))?;
    out.queue(Print("Or 'r' to reset, 'q' to quit, 'a' to automate\n\n"))?;
    Ok(())
}

/// Encode a coloured single-line message into `out`.
pub fn encode_message_into(tone: Tone, text: &str, out: &mut Vec<u8>) -> Result<()> {
    match tone.color() {
        Some(color) => {
            out.queue(SetForegroundColor(color))?;
            out.queue(Print(text))?;
            out.queue(ResetColor)?;
        }
        None => {
            out.queue(Print(text))?;
        }
    }
    out.queue(Print("\n"))?;
    Ok(())
}

/// Text and tone for an announcement from the broker.
pub fn notice_line(notice: &Notice) -> (Tone, String) {
    match notice {
        Notice::Win(status) => (Tone::Success, format!("Player {}!", status)),
        Notice::Draw => (Tone::Info, "Game ended in a draw!".to_string()),
        Notice::Reset => (Tone::Warning, "Game has been reset.".to_string()),
        Notice::Move(desc) => (Tone::Info, format!("Move made: {}", desc)),
    }
}

/// Encode an announcement into `out`.
pub fn encode_notice_into(notice: &Notice, out: &mut Vec<u8>) -> Result<()> {
    let (tone, text) = notice_line(notice);
    encode_message_into(tone, &text, out)
}
