//! Line framer - turns arbitrary pipe reads into complete lines
//!
//! Subscriber output arrives in chunks whose boundaries have nothing to do
//! with message boundaries. The framer keeps the incomplete tail of the
//! stream between calls and hands back only whole, non-empty lines.

use crate::types::MAX_FRAGMENT_BYTES;

/// Stateful newline framer, one per subscriber session
#[derive(Debug, Clone)]
pub struct LineFramer {
    /// Partial line carried over from the previous chunk
    fragment: Vec<u8>,
    /// Cap on `fragment`; 0 means unbounded
    max_fragment: usize,
    /// Set after an overflow: drop bytes until the next newline
    discarding: bool,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::with_max_fragment(MAX_FRAGMENT_BYTES)
    }

    /// Framer that discards a partial line once it grows past `max_fragment` bytes.
    ///
    /// `0` disables the cap.
    pub fn with_max_fragment(max_fragment: usize) -> Self {
        Self {
            fragment: Vec::new(),
            max_fragment,
            discarding: false,
        }
    }

    /// Feed one chunk and collect every line it completes.
    ///
    /// Lines are returned without their `\n` (or `\r\n`) delimiter. Empty lines are skipped.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        let mut rest = chunk;

        while let Some(pos) = rest.iter().position(|&b| b == b'\n') {
            let (head, tail) = rest.split_at(pos);
            rest = &tail[1..];

            if self.discarding {
                self.discarding = false;
                continue;
            }

            self.fragment.extend_from_slice(head);
            if let Some(line) = self.take_line() {
                lines.push(line);
            }
        }

        if !self.discarding {
            self.fragment.extend_from_slice(rest);
            if self.max_fragment > 0 && self.fragment.len() > self.max_fragment {
                log::warn!(
                    "dropping {} byte partial line (limit {}), resyncing at next newline",
                    self.fragment.len(),
                    self.max_fragment
                );
                self.fragment.clear();
                self.discarding = true;
            }
        }

        lines
    }

    /// Bytes currently held back waiting for a newline
    pub fn pending(&self) -> usize {
        self.fragment.len()
    }

    /// Forget any partial line
    pub fn reset(&mut self) {
        self.fragment.clear();
        self.discarding = false;
    }

    fn take_line(&mut self) -> Option<String> {
        if self.fragment.last() == Some(&b'\r') {
            self.fragment.pop();
        }
        if self.fragment.is_empty() {
            return None;
        }
        let line = String::from_utf8_lossy(&self.fragment).into_owned();
        self.fragment.clear();
        Some(line)
    }
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a framed subscriber line into `(topic, payload)` at the first space.
///
/// Returns `None` for lines without a space.
pub fn split_event(line: &str) -> Option<(&str, &str)> {
    line.split_once(' ')
}
