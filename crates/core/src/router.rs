//! Topic router - reduces inbound broker events into board state
//!
//! Every event is classified by topic against the configured root, in a
//! fixed order (board, player, status, moves), first match wins. Unknown
//! topics and unusable payloads are ignored; routing never fails.
//!
//! Announcements are returned as [`Notice`] values instead of printed, so
//! the caller decides how to surface them.

use crate::board::BoardState;
use crate::types::Mark;

/// Known subtopics under the topic root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `<root>/board`: 9-char grid snapshot
    Board,
    /// `<root>/player`: mark whose turn it is
    Player,
    /// `<root>/status`: win/draw/reset announcements
    Status,
    /// any topic containing `/moves`: free-form move annotation
    Moves,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Board => "board",
            Route::Player => "player",
            Route::Status => "status",
            Route::Moves => "moves",
        }
    }
}

/// Announcement produced by a status or moves event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Status payload mentioning "wins", kept verbatim (e.g. "X wins")
    Win(String),
    Draw,
    Reset,
    /// Payload of a moves event
    Move(String),
}

/// Result of applying one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Grid or current player was written
    BoardChanged,
    /// Nothing changed, but there is something to announce
    Notice(Notice),
    /// Unknown topic or unusable payload
    Ignored,
}

/// Classify a topic. `root` is the configured topic root without a trailing slash.
pub fn classify(root: &str, topic: &str) -> Option<Route> {
    if let Some(sub) = topic
        .strip_prefix(root)
        .and_then(|rest| rest.strip_prefix('/'))
    {
        match sub {
            "board" => return Some(Route::Board),
            "player" => return Some(Route::Player),
            "status" => return Some(Route::Status),
            _ => {}
        }
    }

    if topic.contains("/moves") {
        return Some(Route::Moves);
    }

    None
}

/// Interpret a status payload
pub fn parse_status(payload: &str) -> Option<Notice> {
    if payload.contains("wins") {
        Some(Notice::Win(payload.to_string()))
    } else if payload == "draw" {
        Some(Notice::Draw)
    } else if payload == "reset" {
        Some(Notice::Reset)
    } else {
        None
    }
}

/// Apply one `(topic, payload)` event to the board.
pub fn apply(board: &mut BoardState, root: &str, topic: &str, payload: &str) -> RouteOutcome {
    let Some(route) = classify(root, topic) else {
        return RouteOutcome::Ignored;
    };
    log::trace!("{} event: {:?}", route.as_str(), payload);

    match route {
        Route::Board => {
            board.load_wire(payload);
            RouteOutcome::BoardChanged
        }
        Route::Player => match payload.chars().next().and_then(Mark::from_char) {
            Some(mark) => {
                board.set_current_player(mark);
                RouteOutcome::BoardChanged
            }
            None => RouteOutcome::Ignored,
        },
        Route::Status => parse_status(payload)
            .map(RouteOutcome::Notice)
            .unwrap_or(RouteOutcome::Ignored),
        Route::Moves => RouteOutcome::Notice(Notice::Move(payload.to_string())),
    }
}
