//! Board module - local mirror of the shared game grid
//!
//! The board is a 3x3 grid where each cell can be empty or hold a mark.
//! Uses a flat array, row-major (row * 3 + col), with 0-indexed coordinates.
//! The broker is the source of truth; this state only ever follows it.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::types::{cell_char, Cell, Mark, BOARD_CELLS, BOARD_SIDE};

/// Mirrored board plus whose turn the broker says it is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardState {
    /// Flat array of cells, row-major order (row * 3 + col)
    cells: [Cell; BOARD_CELLS],
    current_player: Mark,
}

impl BoardState {
    /// Empty board, X to move
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_CELLS],
            current_player: Mark::X,
        }
    }

    #[inline(always)]
    fn index(row: usize, col: usize) -> Option<usize> {
        if row >= BOARD_SIDE || col >= BOARD_SIDE {
            return None;
        }
        Some(row * BOARD_SIDE + col)
    }

    /// Get cell at (row, col), 0-indexed
    /// Returns None if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col), 0-indexed
    /// Returns false if out of bounds
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }

    /// Rows as slices, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(BOARD_SIDE)
    }

    pub fn current_player(&self) -> Mark {
        self.current_player
    }

    pub fn set_current_player(&mut self, mark: Mark) {
        self.current_player = mark;
    }

    /// Overwrite the grid from a `board` topic payload.
    ///
    /// Characters map row-major onto the nine cells. `X`/`O` (any case) become marks,
    /// every other character an empty cell. A short payload leaves the missing
    /// trailing cells empty; characters past the ninth are ignored.
    pub fn load_wire(&mut self, payload: &str) {
        let mut chars = payload.chars();
        for cell in self.cells.iter_mut() {
            *cell = chars.next().and_then(Mark::from_char);
        }
    }

    /// The grid in `board` topic encoding (9 chars, space for empty)
    pub fn to_wire(&self) -> String {
        self.cells.iter().map(|&c| cell_char(c)).collect()
    }

    /// Number of occupied cells
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

/// Board shared between the subscriber reader task and the foreground loop
#[derive(Debug, Clone, Default)]
pub struct SharedBoard {
    inner: Arc<Mutex<BoardState>>,
}

impl SharedBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock for mutation. A poisoned lock still yields the board; every write leaves it valid.
    pub fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> BoardState {
        *self.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty_x_to_move() {
        let board = BoardState::new();
        assert_eq!(board.filled(), 0);
        assert_eq!(board.current_player(), Mark::X);
        assert_eq!(board.to_wire(), "         ");
    }

    #[test]
    fn test_get_set_bounds() {
        let mut board = BoardState::new();
        assert!(board.set(2, 1, Some(Mark::O)));
        assert_eq!(board.get(2, 1), Some(Some(Mark::O)));
        assert_eq!(board.cells()[7], Some(Mark::O));
        assert!(!board.set(3, 0, Some(Mark::X)));
        assert_eq!(board.get(0, 3), None);
    }

    #[test]
    fn test_load_wire_row_major() {
        let mut board = BoardState::new();
        board.load_wire("XOXOXOXO ");
        let rows: Vec<Vec<Cell>> = board.rows().map(|r| r.to_vec()).collect();
        assert_eq!(rows[0], vec![Some(Mark::X), Some(Mark::O), Some(Mark::X)]);
        assert_eq!(rows[1], vec![Some(Mark::O), Some(Mark::X), Some(Mark::O)]);
        assert_eq!(rows[2], vec![Some(Mark::X), Some(Mark::O), None]);
        assert_eq!(board.to_wire(), "XOXOXOXO ");
    }

    #[test]
    fn test_load_wire_short_payload_pads_empty() {
        let mut board = BoardState::new();
        board.load_wire("XXXXXXXXX");
        board.load_wire("OO");
        assert_eq!(board.to_wire(), "OO       ");
    }

    #[test]
    fn test_load_wire_ignores_extra_and_unknown_chars() {
        let mut board = BoardState::new();
        board.load_wire("x-o.....Xtrailing");
        assert_eq!(board.to_wire(), "X O     X");
    }

    #[test]
    fn test_shared_snapshot_is_a_copy() {
        let shared = SharedBoard::new();
        let before = shared.snapshot();
        shared.lock().set_current_player(Mark::O);
        assert_eq!(before.current_player(), Mark::X);
        assert_eq!(shared.snapshot().current_player(), Mark::O);
    }
}
