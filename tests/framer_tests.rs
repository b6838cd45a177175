//! Line framer tests - chunk boundaries must never change the framed lines

use tictactoe_mqtt::core::framer::split_event;
use tictactoe_mqtt::core::LineFramer;

const LINES: [&str; 5] = [
    "TTT/board XOX O  X ",
    "TTT/player O",
    "TTT/status X wins",
    "TTT/moves X played 1,3 at last",
    "TTT/status reset",
];

fn stream() -> Vec<u8> {
    let mut bytes = Vec::new();
    for line in LINES {
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
    }
    bytes
}

fn feed_in_chunks(bytes: &[u8], size: usize) -> Vec<String> {
    let mut framer = LineFramer::new();
    let mut out = Vec::new();
    for chunk in bytes.chunks(size) {
        out.extend(framer.feed(chunk));
    }
    assert_eq!(framer.pending(), 0);
    out
}

#[test]
fn test_every_chunk_size_yields_same_lines() {
    let bytes = stream();
    for size in 1..=bytes.len() {
        assert_eq!(feed_in_chunks(&bytes, size), LINES, "chunk size {}", size);
    }
}

#[test]
fn test_uneven_chunking() {
    let bytes = stream();
    let cuts = [3usize, 1, 17, 2, 40, 5, 9];
    let mut framer = LineFramer::new();
    let mut out = Vec::new();
    let mut pos = 0;
    let mut i = 0;
    while pos < bytes.len() {
        let end = (pos + cuts[i % cuts.len()]).min(bytes.len());
        out.extend(framer.feed(&bytes[pos..end]));
        pos = end;
        i += 1;
    }
    assert_eq!(out, LINES);
}

#[test]
fn test_no_trailing_newline_holds_fragment() {
    let mut framer = LineFramer::new();
    assert!(framer.feed(b"TTT/status ").is_empty());
    assert!(framer.feed(b"dr").is_empty());
    assert!(framer.pending() > 0);

    assert_eq!(framer.feed(b"aw\n"), vec!["TTT/status draw"]);
    assert_eq!(framer.pending(), 0);
}

#[test]
fn test_payload_keeps_inner_spaces() {
    let mut framer = LineFramer::new();
    let lines = framer.feed(b"TTT/moves X played 2,2\n");
    assert_eq!(
        split_event(&lines[0]),
        Some(("TTT/moves", "X played 2,2"))
    );
}
