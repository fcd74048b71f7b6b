//! Engine surface used by the presentation layer
//!
//! This module is the only thing a front end needs: start a game, place
//! human moves, ask the computer to move, read the state back, and reset
//! the round. Every operation is total. Illegal requests (occupied cell,
//! off-board coordinate, game already over) are rejected with `false` or
//! `None` and leave the board untouched.
//!
//! # Example
//!
//! ```
//! use tictactoe::engine::{self, COMPUTER};
//! use tictactoe::Player;
//!
//! let mut board = engine::new_game(3);
//! assert!(engine::attempt_place(&mut board, 1, 1));
//! assert!(!engine::attempt_place(&mut board, 1, 1)); // occupied
//!
//! assert_eq!(engine::current_turn(&board), COMPUTER);
//! let reply = engine::computer_move(&mut board).unwrap();
//! assert_ne!((reply.row, reply.col), (1, 1));
//! assert_eq!(engine::current_turn(&board), Player::X);
//! ```

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, instrument};

use crate::board::{Board, GameStatus, PlaceError, Player, Pos};
use crate::search::{SearchResult, Searcher};

/// The computer always plays O
pub const COMPUTER: Player = Player::O;

/// Result of a computer move search with timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Minimax value of the move from O's point of view
    pub score: i32,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn from_search(result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            time_ms,
            nodes: result.nodes,
        }
    }
}

/// Computer opponent.
///
/// Wraps a [`Searcher`] and times each search.
///
/// ```
/// use tictactoe::{AIEngine, Board, Pos};
///
/// let mut engine = AIEngine::new();
/// let board: Board = "XX./.O./...".parse().unwrap();
///
/// let result = engine.get_move_with_stats(&board);
/// assert_eq!(result.best_move, Some(Pos::new(0, 2)));
/// ```
#[derive(Debug, Default)]
pub struct AIEngine {
    searcher: Searcher,
}

impl AIEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine whose searches give up once `stop` is set
    #[must_use]
    pub fn with_stop_flag(stop: Arc<AtomicBool>) -> Self {
        Self {
            searcher: Searcher::with_stop_flag(stop),
        }
    }

    /// Search a copy of `board` for the computer's best move.
    ///
    /// The caller's board is never touched, so this may run on a worker
    /// thread while the live board stays with the front end.
    #[must_use]
    pub fn get_move_with_stats(&mut self, board: &Board) -> MoveResult {
        let mut work_board = board.clone();
        self.search(&mut work_board, COMPUTER)
    }

    /// Best move for `player`, used for hints in two-player games.
    #[must_use]
    pub fn suggest(&mut self, board: &Board, player: Player) -> MoveResult {
        let mut work_board = board.clone();
        self.search(&mut work_board, player)
    }

    /// Search `board` in place and apply the computer's move through the
    /// same placement path as a human move.
    ///
    /// Returns `None` without touching the board when the game is over or it
    /// is not the computer's turn.
    #[instrument(skip(self, board), fields(size = board.size()))]
    pub fn play(&mut self, board: &mut Board) -> Option<MoveResult> {
        if board.is_over() {
            debug!("game is over, computer does not move");
            return None;
        }
        if board.current_player() != COMPUTER {
            debug!(turn = %board.current_player(), "not the computer's turn");
            return None;
        }

        let result = self.search(board, COMPUTER);
        let pos = result.best_move?;
        match board.place(pos, COMPUTER) {
            Ok(status) => {
                info!(
                    %pos,
                    score = result.score,
                    nodes = result.nodes,
                    time_ms = result.time_ms,
                    "computer moved"
                );
                log_status(status);
                Some(result)
            }
            Err(err) => {
                // The search only proposes empty cells of an ongoing game
                error!(%pos, %err, "search proposed an illegal move");
                None
            }
        }
    }

    fn search(&mut self, board: &mut Board, player: Player) -> MoveResult {
        let start = Instant::now();
        let result = self.searcher.best_move_for(board, player);
        MoveResult::from_search(result, start.elapsed().as_millis() as u64)
    }
}

/// Start a fresh game on an N×N board with X to move.
///
/// # Panics
///
/// Panics if `size` is zero.
#[instrument]
pub fn new_game(size: usize) -> Board {
    debug!("new game");
    Board::new(size)
}

/// Like [`new_game`] but refuses a zero size instead of panicking.
#[instrument]
pub fn try_new_game(size: usize) -> Option<Board> {
    let board = Board::try_new(size);
    if board.is_none() {
        debug!("board size must be at least 1");
    }
    board
}

/// Place the current player's mark at (`row`, `col`).
///
/// Returns `true` when the move was accepted and the state updated, `false`
/// for an occupied cell, an off-board coordinate, or a finished game.
#[instrument(skip(board))]
pub fn attempt_place(board: &mut Board, row: usize, col: usize) -> bool {
    try_place(board, row, col).is_ok()
}

/// Like [`attempt_place`] but reports why a move was rejected.
pub fn try_place(board: &mut Board, row: usize, col: usize) -> Result<GameStatus, PlaceError> {
    let player = board.current_player();
    match board.place(Pos::new(row, col), player) {
        Ok(status) => {
            debug!(%player, row, col, "move accepted");
            log_status(status);
            Ok(status)
        }
        Err(err) => {
            debug!(%player, row, col, %err, "move rejected");
            Err(err)
        }
    }
}

/// Let the computer (O) choose and play its move.
///
/// Call only when it is O's turn and the game is not over; otherwise
/// nothing happens and `None` is returned.
pub fn computer_move(board: &mut Board) -> Option<Pos> {
    AIEngine::new().play(board).and_then(|result| result.best_move)
}

#[inline]
pub fn is_over(board: &Board) -> bool {
    board.is_over()
}

#[inline]
pub fn winner(board: &Board) -> Option<Player> {
    board.winner()
}

#[inline]
pub fn current_turn(board: &Board) -> Player {
    board.current_player()
}

/// Start a new round on the same board. Scores held elsewhere are untouched.
#[instrument(skip(board), fields(size = board.size()))]
pub fn reset_board(board: &mut Board) {
    board.reset();
    debug!("board reset");
}

fn log_status(status: GameStatus) {
    match status {
        GameStatus::InProgress => {}
        GameStatus::Won(player) => info!(%player, "game won"),
        GameStatus::Draw => info!("game drawn"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let board = new_game(4);
        assert_eq!(board.size(), 4);
        assert_eq!(current_turn(&board), Player::X);
        assert!(!is_over(&board));
        assert_eq!(winner(&board), None);
    }

    #[test]
    fn test_try_new_game_rejects_zero_size() {
        assert_eq!(try_new_game(0), None);
        assert_eq!(try_new_game(4), Some(new_game(4)));
    }

    #[test]
    fn test_computer_takes_first_drawing_corner() {
        // All four corners draw against a center opening
        let mut board = new_game(3);
        assert!(attempt_place(&mut board, 1, 1));
        assert_eq!(computer_move(&mut board), Some(Pos::new(0, 0)));
    }

    #[test]
    fn test_attempt_place_switches_turn() {
        let mut board = new_game(3);
        assert!(attempt_place(&mut board, 0, 0));
        assert_eq!(current_turn(&board), Player::O);
        assert!(attempt_place(&mut board, 2, 2));
        assert_eq!(current_turn(&board), Player::X);
    }

    #[test]
    fn test_attempt_place_rejections() {
        let mut board = new_game(3);
        assert!(attempt_place(&mut board, 1, 1));
        let snapshot = board.clone();

        assert!(!attempt_place(&mut board, 1, 1));
        assert!(!attempt_place(&mut board, 3, 1));
        assert!(!attempt_place(&mut board, 0, 9));
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_try_place_reports_reason() {
        let mut board = new_game(3);
        assert_eq!(try_place(&mut board, 0, 0), Ok(GameStatus::InProgress));
        assert_eq!(
            try_place(&mut board, 0, 0),
            Err(PlaceError::Occupied { row: 0, col: 0 })
        );
    }

    #[test]
    fn test_computer_move_blocks() {
        let mut board: Board = "XX./.O./...".parse().unwrap();
        assert_eq!(computer_move(&mut board), Some(Pos::new(0, 2)));
        assert_eq!(current_turn(&board), Player::X);
        assert_eq!(board.count(Player::O), 2);
    }

    #[test]
    fn test_computer_move_wins() {
        let mut board: Board = "XX./OO./X..".parse().unwrap();
        assert_eq!(computer_move(&mut board), Some(Pos::new(1, 2)));
        assert!(is_over(&board));
        assert_eq!(winner(&board), Some(Player::O));
        // The turn stays with the player who finished the game
        assert_eq!(current_turn(&board), Player::O);
    }

    #[test]
    fn test_computer_move_refuses_on_x_turn() {
        let mut board = new_game(3);
        let snapshot = board.clone();
        assert_eq!(computer_move(&mut board), None);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_computer_move_refuses_after_game_over() {
        let mut board: Board = "XXX/OO./...".parse().unwrap();
        let snapshot = board.clone();
        assert_eq!(computer_move(&mut board), None);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_get_move_with_stats_leaves_board() {
        let mut engine = AIEngine::new();
        let board: Board = "X../.../...".parse().unwrap();
        let snapshot = board.clone();

        let result = engine.get_move_with_stats(&board);
        assert_eq!(result.best_move, Some(Pos::new(1, 1)));
        assert!(result.nodes > 0);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_suggest_for_x() {
        let mut engine = AIEngine::new();
        let board: Board = "XX./OO./...".parse().unwrap();

        let result = engine.suggest(&board, Player::X);
        assert_eq!(result.best_move, Some(Pos::new(0, 2)));
    }

    #[test]
    fn test_reset_board() {
        let mut board: Board = "XXX/OO./...".parse().unwrap();
        reset_board(&mut board);
        assert_eq!(board, new_game(3));
        assert!(attempt_place(&mut board, 0, 0));
    }
}
