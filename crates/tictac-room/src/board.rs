//! The 3x3 board and win detection.

use tictac_protocol::{BOARD_CELLS, BoardCells, Symbol};

/// Every line that wins the game, in the order they are checked:
/// rows, then columns, then the two diagonals.
pub const WIN_PATTERNS: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Nine cells, row-major. A set cell is only cleared by [`Board::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: BoardCells,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the symbol in `index`, or `None` if the cell is empty or
    /// the index is off the board.
    pub fn get(&self, index: usize) -> Option<Symbol> {
        self.cells.get(index).copied().flatten()
    }

    /// Returns `true` if `index` is on the board and nobody played there.
    pub fn is_free(&self, index: usize) -> bool {
        index < BOARD_CELLS && self.cells[index].is_none()
    }

    /// Writes `symbol` into a free cell. Returns `false` (and leaves the
    /// board untouched) if the cell is taken or off the board.
    pub fn place(&mut self, index: usize, symbol: Symbol) -> bool {
        if !self.is_free(index) {
            return false;
        }
        self.cells[index] = Some(symbol);
        true
    }

    /// Returns `true` once every cell holds a symbol.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_CELLS];
    }

    /// Returns the wire form of the board.
    pub fn cells(&self) -> BoardCells {
        self.cells
    }
}

impl From<BoardCells> for Board {
    fn from(cells: BoardCells) -> Self {
        Self { cells }
    }
}

/// Returns the symbol of the first winning line in [`WIN_PATTERNS`]
/// order, or `None` if no line is three of a kind.
pub fn check_winner(board: &Board) -> Option<Symbol> {
    WIN_PATTERNS.iter().find_map(|&[a, b, c]| {
        let first = board.get(a)?;
        (board.get(b) == Some(first) && board.get(c) == Some(first))
            .then_some(first)
    })
}
