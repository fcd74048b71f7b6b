//! Board structure with turn and terminal-state tracking

use std::fmt;
use std::str::FromStr;

use derive_more::{Display, Error};

use super::{Cell, Player, Pos};
use crate::rules;

/// Outcome of the game as seen from the current position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

impl GameStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Reason a placement was rejected. The board is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PlaceError {
    #[display("cell ({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },
    #[display("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },
    #[display("game is already over")]
    GameOver,
    #[display("it is {expected}'s turn, not {got}'s")]
    WrongTurn { expected: Player, got: Player },
}

/// Failure to read a board from its text form
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ParseBoardError {
    #[display("board text has no rows")]
    Empty,
    #[display("row {row} has {len} cells, expected {size}")]
    Ragged { row: usize, len: usize, size: usize },
    #[display("unexpected character {ch:?} (use X, O or .)")]
    InvalidChar { ch: char },
    #[display("{x} X marks and {o} O marks cannot arise from alternating play")]
    ImpossibleCounts { x: usize, o: usize },
    #[display("both players hold a line")]
    BothWon,
    #[display("{winner} holds a line but did not move last ({x} X, {o} O)")]
    ImpossibleWin { winner: Player, x: usize, o: usize },
}

/// N×N game board
///
/// Cells are stored row-major in a single vector (`row * size + col`).
/// `game_over` is true exactly when some player holds a full line or every
/// cell is occupied; once set, no placement succeeds until [`Board::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    current_player: Player,
    game_over: bool,
    winner: Option<Player>,
}

impl Board {
    /// Create an empty board with X to move.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size >= 1, "board size must be at least 1");
        Self::empty(size)
    }

    /// Like [`Board::new`] but returns `None` for a zero size
    pub fn try_new(size: usize) -> Option<Self> {
        (size >= 1).then(|| Self::empty(size))
    }

    fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
            current_player: Player::X,
            game_over: false,
            winner: None,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// All cells in row-major order
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Flat index of `pos`, or `None` when it is off the board
    #[inline]
    pub fn index(&self, pos: Pos) -> Option<usize> {
        pos.is_within(self.size).then(|| pos.to_index(self.size))
    }

    /// Get cell at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Check if position is on the board and unoccupied
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        matches!(self.get(pos), Some(Cell::Empty))
    }

    #[inline]
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// Winner of a finished game; `None` while ongoing or after a draw
    #[inline]
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn status(&self) -> GameStatus {
        match (self.game_over, self.winner) {
            (false, _) => GameStatus::InProgress,
            (true, Some(player)) => GameStatus::Won(player),
            (true, None) => GameStatus::Draw,
        }
    }

    /// Number of cells held by `player`
    pub fn count(&self, player: Player) -> usize {
        let cell = Cell::from(player);
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(move |(idx, _)| Pos::from_index(idx, size))
    }

    /// True if `player` fills a row, a column or a main diagonal.
    /// Recomputed from scratch on every call.
    #[inline]
    pub fn has_line(&self, player: Player) -> bool {
        rules::has_line(self, player)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Place `player`'s mark at `pos`.
    ///
    /// On success the terminal state is re-evaluated and, if the game goes on,
    /// the turn passes to the opponent.
    pub fn place(&mut self, pos: Pos, player: Player) -> Result<GameStatus, PlaceError> {
        if self.game_over {
            return Err(PlaceError::GameOver);
        }
        let idx = self.index(pos).ok_or(PlaceError::OutOfBounds {
            row: pos.row,
            col: pos.col,
            size: self.size,
        })?;
        if !self.cells[idx].is_empty() {
            return Err(PlaceError::Occupied {
                row: pos.row,
                col: pos.col,
            });
        }
        if player != self.current_player {
            return Err(PlaceError::WrongTurn {
                expected: self.current_player,
                got: player,
            });
        }

        self.cells[idx] = Cell::from(player);
        let status = self.evaluate_terminal();
        if !status.is_terminal() {
            self.current_player = player.opponent();
        }
        Ok(status)
    }

    /// Clear every cell and hand the first move back to X.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
        self.current_player = Player::X;
        self.game_over = false;
        self.winner = None;
    }

    /// Write a mark without touching turn or terminal state.
    /// Search only; every call must be paired with [`Board::unmark`].
    #[inline]
    pub(crate) fn mark(&mut self, pos: Pos, player: Player) {
        debug_assert!(self.is_empty(pos));
        let idx = pos.to_index(self.size);
        self.cells[idx] = Cell::from(player);
    }

    #[inline]
    pub(crate) fn unmark(&mut self, pos: Pos) {
        let idx = pos.to_index(self.size);
        self.cells[idx] = Cell::Empty;
    }

    /// X line, then O line, then full board.
    fn evaluate_terminal(&mut self) -> GameStatus {
        let status = rules::check_status(self);
        match status {
            GameStatus::InProgress => {}
            GameStatus::Won(player) => {
                self.game_over = true;
                self.winner = Some(player);
            }
            GameStatus::Draw => {
                self.game_over = true;
                self.winner = None;
            }
        }
        status
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.chunks(self.size).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in cells {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::X => 'X',
                    Cell::O => 'O',
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

/// Parse rows of `X`, `O` and `.` separated by `/` or newlines.
///
/// ```
/// use tictactoe::{Board, Player};
///
/// let board: Board = "XO./.X./...".parse().unwrap();
/// assert_eq!(board.size(), 3);
/// assert_eq!(board.current_player(), Player::O);
/// ```
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<char>> = s
            .split(['/', '\n'])
            .map(|row| row.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        let size = rows.len();
        if size == 0 {
            return Err(ParseBoardError::Empty);
        }

        let mut board = Board::new(size);
        for (row, chars) in rows.iter().enumerate() {
            if chars.len() != size {
                return Err(ParseBoardError::Ragged {
                    row,
                    len: chars.len(),
                    size,
                });
            }
            for (col, &ch) in chars.iter().enumerate() {
                board.cells[row * size + col] = match ch {
                    'X' | 'x' => Cell::X,
                    'O' | 'o' => Cell::O,
                    '.' | '_' | '-' => Cell::Empty,
                    _ => return Err(ParseBoardError::InvalidChar { ch }),
                };
            }
        }

        let x = board.count(Player::X);
        let o = board.count(Player::O);
        if x < o || x - o > 1 {
            return Err(ParseBoardError::ImpossibleCounts { x, o });
        }

        // The game stops at the first line, so only the last mover can hold one
        match (board.has_line(Player::X), board.has_line(Player::O)) {
            (true, true) => return Err(ParseBoardError::BothWon),
            (true, false) if x != o + 1 => {
                return Err(ParseBoardError::ImpossibleWin { winner: Player::X, x, o });
            }
            (false, true) if x != o => {
                return Err(ParseBoardError::ImpossibleWin { winner: Player::O, x, o });
            }
            _ => {}
        }

        board.current_player = if x == o { Player::X } else { Player::O };
        if board.evaluate_terminal().is_terminal() {
            // The turn does not pass on a finishing move
            board.current_player = board.current_player.opponent();
        }
        Ok(board)
    }
}
